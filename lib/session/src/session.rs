//! Signed-in console sessions.
//!
//! A session is created after the backend accepts the user's credentials.
//! It owns the backend token and the profile fetched with it; the browser
//! only ever sees the opaque session id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::profile::UserProfile;
use crate::token::AuthToken;

/// Unique identifier for a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh, unguessable session ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("sess_{}", Ulid::new()))
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    token: AuthToken,
    profile: UserProfile,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub fn new(id: SessionId, token: AuthToken, profile: UserProfile) -> Self {
        Self {
            id,
            token,
            profile,
            created_at: Utc::now(),
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the backend token.
    #[must_use]
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Returns the user's profile.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if the underlying token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.token.is_expired()
    }

    /// Returns true if the session can still be used for backend calls.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.token.is_valid()
    }

    /// Replaces the profile, e.g. after the user's assignments changed.
    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }
}
