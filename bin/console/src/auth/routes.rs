//! Authentication routes for sign-in and sign-out.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use paydesk_session::{Session, SessionId};
use serde::Deserialize;
use std::sync::Arc;
use time::Duration as TimeDuration;

use super::{AppState, SESSION_COOKIE};
use crate::error::LoginError;

/// Sign-in form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Exchanges credentials with the backend and opens a session.
///
/// On success the session's catalog is loaded before redirecting to the
/// dashboard, so the first render already has navigation.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, LoginError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Err(LoginError::InvalidCredentials);
    }

    let token = state
        .backend
        .login(username, &form.password)
        .await
        .map_err(|e| LoginError::from(e.current_context()))?;

    let profile = state
        .backend
        .fetch_profile(&token)
        .await
        .map_err(|e| LoginError::from(e.current_context()))?;

    let session = Session::new(SessionId::generate(), token, profile);
    let max_age = session.token().remaining().num_seconds();
    state.sessions.insert(session.clone());

    let catalog = state
        .catalogs
        .open(session.id())
        .load(state.backend.as_ref(), &session)
        .await;

    tracing::info!(
        session_id = %session.id(),
        user = session.profile().label(),
        modules = catalog.modules().len(),
        menus = catalog.menus().len(),
        "User signed in"
    );

    let session_cookie = Cookie::build((SESSION_COOKIE, session.id().as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(max_age));

    Ok((jar.add(session_cookie), Redirect::to("/dashboard")))
}

/// Logs out the user by ending their session and dropping its catalog.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::new(session_cookie.value().to_string());
        state.end_session(&session_id);
        tracing::info!(session_id = %session_id, "User signed out");
    }

    let remove_session = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO);

    (jar.add(remove_session), Redirect::to("/login"))
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidCredentials => tracing::info!("Sign-in rejected"),
            Self::BackendUnavailable { reason } => {
                tracing::warn!(reason = %reason, "Sign-in failed, backend unavailable");
            }
        }

        Redirect::to(&format!("/login?error={}", self.query_value())).into_response()
    }
}
