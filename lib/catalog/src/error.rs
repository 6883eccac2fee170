//! Error types for backend fetches.

use std::fmt;

/// Why a backend fetch failed.
///
/// Callers decide what to suppress; the catalog store treats every variant
/// as non-fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No valid token, or the backend rejected it.
    Unauthenticated,
    /// The token is valid but may not read this resource.
    Forbidden { resource: String },
    /// Timeout, connection failure, or an unexpected status.
    Transient { resource: String, reason: String },
    /// The response body could not be decoded.
    Malformed { resource: String, reason: String },
}

impl FetchError {
    /// Returns true if the failure may succeed on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }

    /// Returns true if the failure means the user may not see the resource.
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Forbidden { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "not authenticated"),
            Self::Forbidden { resource } => write!(f, "access to {resource} denied"),
            Self::Transient { resource, reason } => {
                write!(f, "failed to fetch {resource}: {reason}")
            }
            Self::Malformed { resource, reason } => {
                write!(f, "malformed {resource} response: {reason}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
