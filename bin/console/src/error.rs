//! Domain error types for server operations.
//!
//! Each enum carries enough detail for logging, and converts into a
//! user-safe `ServerFnError` via `into_server_error`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Session-related errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session cookie on the request.
    NotAuthenticated,
    /// Session was not found in the store.
    NotFound { session_id: String },
    /// Session token has expired.
    Expired { session_id: String },
    /// Application state was not available to the request.
    Unavailable { details: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::NotFound { session_id } => write!(f, "session '{session_id}' not found"),
            Self::Expired { session_id } => write!(f, "session '{session_id}' has expired"),
            Self::Unavailable { details } => write!(f, "session state unavailable: {details}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl SessionError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            SessionError::NotAuthenticated => ServerFnError::new("Not authenticated"),
            SessionError::NotFound { .. } => ServerFnError::new("Session not found"),
            SessionError::Expired { .. } => ServerFnError::new("Session expired"),
            SessionError::Unavailable { .. } => ServerFnError::new("Service unavailable"),
        }
    }
}

#[cfg(feature = "ssr")]
impl From<&paydesk_session::AuthenticationError> for SessionError {
    fn from(err: &paydesk_session::AuthenticationError) -> Self {
        use paydesk_session::AuthenticationError;

        match err {
            AuthenticationError::SessionNotFound { session_id } => Self::NotFound {
                session_id: session_id.clone(),
            },
            AuthenticationError::SessionExpired { session_id } => Self::Expired {
                session_id: session_id.clone(),
            },
            AuthenticationError::NotAuthenticated | AuthenticationError::InvalidCredentials => {
                Self::NotAuthenticated
            }
        }
    }
}

/// Errors from the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Username or password missing or rejected by the backend.
    InvalidCredentials,
    /// The backend could not be reached or answered unexpectedly.
    BackendUnavailable { reason: String },
}

impl LoginError {
    /// Value of the `error` query parameter on the login page.
    #[must_use]
    pub fn query_value(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid",
            Self::BackendUnavailable { .. } => "unavailable",
        }
    }

    /// Message shown on the login page for an `error` query value.
    #[must_use]
    pub fn message_for(query_value: &str) -> &'static str {
        match query_value {
            "invalid" => "Invalid username or password.",
            "unavailable" => "The service is temporarily unavailable. Please try again.",
            _ => "Sign in failed. Please try again.",
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::BackendUnavailable { reason } => write!(f, "backend unavailable: {reason}"),
        }
    }
}

impl std::error::Error for LoginError {}

#[cfg(feature = "ssr")]
impl From<&paydesk_catalog::FetchError> for LoginError {
    fn from(err: &paydesk_catalog::FetchError) -> Self {
        if err.is_access_denied() {
            Self::InvalidCredentials
        } else {
            Self::BackendUnavailable {
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_do_not_leak_session_ids() {
        let err = SessionError::Expired {
            session_id: "sess_secret".to_string(),
        }
        .into_server_error();
        assert!(!err.to_string().contains("sess_secret"));
    }

    #[test]
    fn login_errors_map_to_query_values() {
        assert_eq!(LoginError::InvalidCredentials.query_value(), "invalid");
        let unavailable = LoginError::BackendUnavailable {
            reason: "timeout".to_string(),
        };
        assert_eq!(unavailable.query_value(), "unavailable");
        assert_eq!(
            LoginError::message_for(unavailable.query_value()),
            "The service is temporarily unavailable. Please try again."
        );
        assert_eq!(
            LoginError::message_for("other"),
            "Sign in failed. Please try again."
        );
    }

    #[cfg(feature = "ssr")]
    #[test]
    fn fetch_errors_classify_login_failures() {
        use paydesk_catalog::FetchError;

        assert_eq!(
            LoginError::from(&FetchError::Unauthenticated),
            LoginError::InvalidCredentials
        );
        assert_eq!(
            LoginError::from(&FetchError::Forbidden {
                resource: "login".to_string()
            }),
            LoginError::InvalidCredentials
        );
        assert!(matches!(
            LoginError::from(&FetchError::Transient {
                resource: "login".to_string(),
                reason: "timed out".to_string()
            }),
            LoginError::BackendUnavailable { .. }
        ));
    }
}
