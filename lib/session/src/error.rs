//! Error types for the session crate.
//!
//! Errors are designed for layered context using rootcause.

use std::fmt;

/// Errors from authentication and session lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// No session cookie or token was presented.
    NotAuthenticated,
    /// The session is unknown to the store.
    SessionNotFound { session_id: String },
    /// The session's token has expired.
    SessionExpired { session_id: String },
    /// The backend rejected the supplied credentials.
    InvalidCredentials,
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::SessionNotFound { session_id } => {
                write!(f, "session not found: {session_id}")
            }
            Self::SessionExpired { session_id } => {
                write!(f, "session has expired: {session_id}")
            }
            Self::InvalidCredentials => write!(f, "invalid credentials"),
        }
    }
}

impl std::error::Error for AuthenticationError {}
