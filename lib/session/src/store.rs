//! In-memory session registry.
//!
//! The store is owned by the application state and handed to request
//! handlers explicitly; there is no global session table.

use paydesk_core::Result;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::error::AuthenticationError;
use crate::profile::UserProfile;
use crate::session::{Session, SessionId};

/// Registry of active sessions keyed by session ID.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session, replacing any session with the same ID.
    pub fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.insert(session.id().clone(), session);
    }

    /// Returns a snapshot of a valid session.
    ///
    /// Expired sessions are evicted on lookup.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` for unknown IDs and `SessionExpired` when the
    /// session's token is no longer valid.
    pub fn get(&self, id: &SessionId) -> Result<Session, AuthenticationError> {
        {
            let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
            match sessions.get(id) {
                None => {
                    return Err(AuthenticationError::SessionNotFound {
                        session_id: id.to_string(),
                    }
                    .into());
                }
                Some(session) if session.is_valid() => return Ok(session.clone()),
                Some(_) => {}
            }
        }

        self.remove(id);
        debug!(session_id = %id, "evicted expired session");
        Err(AuthenticationError::SessionExpired {
            session_id: id.to_string(),
        }
        .into())
    }

    /// Replaces the profile stored with a session.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the session no longer exists.
    pub fn update_profile(
        &self,
        id: &SessionId,
        profile: UserProfile,
    ) -> Result<(), AuthenticationError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| AuthenticationError::SessionNotFound {
                session_id: id.to_string(),
            })?;
        session.set_profile(profile);
        Ok(())
    }

    /// Removes a session, returning it if it existed.
    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.remove(id)
    }

    /// Removes every expired session and returns their IDs.
    pub fn purge_expired(&self) -> Vec<SessionId> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let expired: Vec<SessionId> = sessions
            .values()
            .filter(|s| !s.is_valid())
            .map(|s| s.id().clone())
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }

    /// Returns the number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
