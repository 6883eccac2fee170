//! Helper functions for server functions with proper error handling and logging.

use crate::auth::{AppState, SESSION_COOKIE};
use crate::error::SessionError;
use axum::Extension;
use paydesk_session::{Session, SessionId};
use std::sync::Arc;

/// Authenticated session information.
pub struct AuthenticatedSession {
    pub session: Session,
    pub state: Arc<AppState>,
}

/// Gets the application state from the request extensions.
pub async fn get_app_state() -> Result<Arc<AppState>, SessionError> {
    let Extension(state): Extension<Arc<AppState>> =
        leptos_axum::extract().await.map_err(|e| {
            tracing::error!(error = %e, "Application state missing from request");
            SessionError::Unavailable {
                details: e.to_string(),
            }
        })?;
    Ok(state)
}

/// Extracts and validates the current session from the request.
///
/// Expired sessions are evicted by the lookup, so a stale cookie only fails
/// once.
pub async fn get_authenticated_session() -> Result<AuthenticatedSession, SessionError> {
    let session_id_str = leptos_axum::extract::<axum_extra::extract::CookieJar>()
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Failed to extract cookie jar");
            SessionError::NotAuthenticated
        })?
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or(SessionError::NotAuthenticated)?;

    let state = get_app_state().await?;
    let session_id = SessionId::new(session_id_str);

    let session = state.sessions.get(&session_id).map_err(|report| {
        let err = SessionError::from(report.current_context());
        tracing::debug!(session_id = %session_id, error = %err, "Session rejected");
        if matches!(err, SessionError::Expired { .. }) {
            state.catalogs.close(&session_id);
        }
        err
    })?;

    Ok(AuthenticatedSession { session, state })
}
