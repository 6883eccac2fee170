//! Authentication and per-session state for the console.
//!
//! This module provides:
//! - The shared [`AppState`]: session store, catalog registry, and backend
//! - Password sign-in against the admin backend, and sign-out
//!
//! The browser only holds an opaque session id cookie. The backend token,
//! the user's profile, and the session's catalog snapshot stay on the server
//! and are dropped together on logout or expiry.

pub mod routes;

use crate::config::SessionConfig;
use crate::error::SessionError;
use paydesk_catalog::{CatalogRegistry, CatalogSource, RetryPolicy};
use paydesk_navigation::Catalog;
use paydesk_session::{Session, SessionId, SessionStore};
use std::sync::Arc;

pub use routes::{login, logout};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Shared application state.
pub struct AppState {
    /// Signed-in sessions.
    pub sessions: SessionStore,
    /// Catalog snapshots, one per session.
    pub catalogs: CatalogRegistry,
    /// Admin backend.
    pub backend: Arc<dyn CatalogSource>,
    /// Session configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        backend: Arc<dyn CatalogSource>,
        session_config: SessionConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            catalogs: CatalogRegistry::new(retry),
            backend,
            session_config,
        }
    }

    /// Ends a session and drops its catalog.
    pub fn end_session(&self, id: &SessionId) {
        self.sessions.remove(id);
        self.catalogs.close(id);
    }

    /// Returns the catalog of a signed-in session, loading it on first use.
    ///
    /// Returns `None` once the session's catalog has been closed; a closed
    /// catalog is never reopened here.
    pub async fn session_catalog(&self, session: &Session) -> Option<Catalog> {
        let store = self.catalogs.get(session.id())?;
        if store.generation() == 0 {
            Some(store.load(self.backend.as_ref(), session).await)
        } else {
            Some(store.snapshot())
        }
    }

    /// Re-fetches a session's profile and catalog from the backend.
    ///
    /// A failed profile fetch keeps the previous assignments.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if the session ended while the reload was
    /// in flight.
    pub async fn reload_session(
        &self,
        mut session: Session,
    ) -> Result<(Session, Catalog), SessionError> {
        match self.backend.fetch_profile(session.token()).await {
            Ok(profile) => session.set_profile(profile),
            Err(e) => {
                tracing::warn!(
                    session_id = %session.id(),
                    error = %e,
                    "Failed to refresh profile, keeping previous assignments"
                );
            }
        }

        if let Err(e) = self
            .sessions
            .update_profile(session.id(), session.profile().clone())
        {
            tracing::debug!(session_id = %session.id(), error = %e, "Session ended during reload");
            return Err(SessionError::NotAuthenticated);
        }

        let store = self
            .catalogs
            .get(session.id())
            .ok_or(SessionError::NotAuthenticated)?;
        let catalog = store.load(self.backend.as_ref(), &session).await;

        Ok((session, catalog))
    }

    /// Removes expired sessions together with their catalogs.
    ///
    /// Returns the number of sessions removed.
    pub fn purge_expired(&self) -> usize {
        let expired = self.sessions.purge_expired();
        for id in &expired {
            self.catalogs.close(id);
        }
        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use paydesk_catalog::{BackendConfig, HttpBackend};
    use paydesk_session::{AuthToken, Session, UserProfile};

    fn state() -> AppState {
        let backend = HttpBackend::new(BackendConfig::new("http://127.0.0.1:9")).expect("client");
        AppState::new(
            Arc::new(backend),
            SessionConfig::default(),
            RetryPolicy::none(),
        )
    }

    fn session(lifetime: Duration) -> Session {
        Session::new(
            SessionId::generate(),
            AuthToken::new("tok".to_string(), lifetime),
            UserProfile::new("alice"),
        )
    }

    #[test]
    fn purge_removes_expired_sessions_and_catalogs() {
        let state = state();
        let live = session(Duration::minutes(5));
        let expired = session(Duration::seconds(-1));
        let (live_id, expired_id) = (live.id().clone(), expired.id().clone());

        state.sessions.insert(live);
        state.sessions.insert(expired);
        state.catalogs.open(&live_id);
        state.catalogs.open(&expired_id);

        assert_eq!(state.purge_expired(), 1);
        assert_eq!(state.sessions.len(), 1);
        assert!(state.catalogs.get(&live_id).is_some());
        assert!(state.catalogs.get(&expired_id).is_none());
    }

    #[tokio::test]
    async fn reload_after_sign_out_does_not_reopen_catalog() {
        let state = state();
        let s = session(Duration::minutes(5));
        let id = s.id().clone();
        state.sessions.insert(s.clone());
        state.catalogs.open(&id);

        state.end_session(&id);
        let result = state.reload_session(s).await;

        assert_eq!(result.err(), Some(SessionError::NotAuthenticated));
        assert!(state.catalogs.is_empty());
        assert!(state.sessions.is_empty());
    }

    #[tokio::test]
    async fn reload_keeps_profile_when_backend_is_down() {
        let state = state();
        let s = session(Duration::minutes(5));
        let id = s.id().clone();
        state.sessions.insert(s.clone());
        state.catalogs.open(&id);

        let (reloaded, catalog) = state.reload_session(s).await.expect("reload");

        assert_eq!(reloaded.profile().username(), Some("alice"));
        assert!(catalog.is_empty());
        assert_eq!(state.catalogs.len(), 1);
    }

    #[tokio::test]
    async fn closed_catalog_is_not_reopened_for_navigation() {
        let state = state();
        let s = session(Duration::minutes(5));
        let id = s.id().clone();
        state.sessions.insert(s.clone());
        state.catalogs.open(&id);

        state.end_session(&id);

        assert!(state.session_catalog(&s).await.is_none());
        assert!(state.catalogs.is_empty());
    }

    #[test]
    fn end_session_drops_everything() {
        let state = state();
        let s = session(Duration::minutes(5));
        let id = s.id().clone();
        state.sessions.insert(s);
        state.catalogs.open(&id);

        state.end_session(&id);

        assert!(state.sessions.is_empty());
        assert!(state.catalogs.is_empty());
    }
}
