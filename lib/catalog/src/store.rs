//! Per-session catalog cache.
//!
//! Each session owns a [`CatalogStore`]. A successful load replaces the
//! snapshot wholesale; a failed load leaves it untouched. Loads are tagged
//! with a generation number, and only the most recently started load may
//! publish its result. A load, retries included, is bounded by the retry
//! policy's deadline.

use paydesk_core::Result;
use paydesk_navigation::Catalog;
use paydesk_session::{AuthToken, Session, SessionId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::client::CatalogSource;
use crate::config::RetryPolicy;
use crate::error::FetchError;

/// Cached catalog snapshot for one session.
#[derive(Debug, Default)]
pub struct CatalogStore {
    snapshot: RwLock<Catalog>,
    generation: AtomicU64,
    retry: RetryPolicy,
}

impl CatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            snapshot: RwLock::new(Catalog::empty()),
            generation: AtomicU64::new(0),
            retry,
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Catalog {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the generation of the most recently started load or clear.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Loads the catalog for a session, never failing.
    ///
    /// - no valid session: empty catalog, no backend call
    /// - unauthenticated or forbidden: empty catalog, snapshot kept
    /// - transient or malformed: logged, current snapshot returned
    pub async fn load(&self, source: &dyn CatalogSource, session: &Session) -> Catalog {
        if !session.is_valid() {
            debug!(session_id = %session.id(), "no valid session, skipping catalog fetch");
            return Catalog::empty();
        }

        match self.try_load(source, session.token()).await {
            Ok(catalog) => catalog,
            Err(report) => {
                let error = report.current_context();
                if error.is_access_denied() {
                    debug!(session_id = %session.id(), %error, "catalog access denied");
                    Catalog::empty()
                } else {
                    warn!(session_id = %session.id(), %error, "catalog fetch failed, keeping cached snapshot");
                    self.snapshot()
                }
            }
        }
    }

    /// Fetches modules and menus and publishes them as the new snapshot.
    ///
    /// If another load or a clear happened after this one started, the
    /// fetched catalog is discarded and the current snapshot is returned.
    ///
    /// # Errors
    ///
    /// Returns the first fetch failure after retries are exhausted, or
    /// `Transient` when the deadline passes first.
    pub async fn try_load(
        &self,
        source: &dyn CatalogSource,
        token: &AuthToken,
    ) -> Result<Catalog, FetchError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetch = async {
            tokio::try_join!(
                self.with_retry("modules", || source.fetch_modules(token)),
                self.with_retry("menus", || source.fetch_menus(token)),
            )
        };
        let (modules, menus) = match self.retry.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, fetch).await {
                Ok(fetched) => fetched?,
                Err(_) => {
                    return Err(FetchError::Transient {
                        resource: "catalog".to_string(),
                        reason: format!("no complete response within {deadline:?}"),
                    }
                    .into());
                }
            },
            None => fetch.await?,
        };
        let catalog = Catalog::new(modules, menus);

        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) == ticket {
            *snapshot = catalog.clone();
            debug!(
                generation = ticket,
                modules = catalog.modules().len(),
                menus = catalog.menus().len(),
                "published catalog"
            );
            Ok(catalog)
        } else {
            debug!(generation = ticket, "discarding stale catalog fetch");
            Ok(snapshot.clone())
        }
    }

    /// Drops the snapshot and invalidates in-flight loads.
    pub fn clear(&self) {
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::SeqCst);
        *snapshot = Catalog::empty();
    }

    async fn with_retry<T, F, Fut>(&self, resource: &str, mut fetch: F) -> Result<T, FetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 0;
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(report)
                    if attempt < self.retry.attempts && report.current_context().is_transient() =>
                {
                    attempt += 1;
                    let delay = self.retry.delay(attempt);
                    debug!(resource, attempt, ?delay, error = %report, "retrying transient failure");
                    tokio::time::sleep(delay).await;
                }
                Err(report) => return Err(report),
            }
        }
    }
}

/// Catalog stores keyed by session.
#[derive(Debug, Default)]
pub struct CatalogRegistry {
    stores: RwLock<HashMap<SessionId, Arc<CatalogStore>>>,
    retry: RetryPolicy,
}

impl CatalogRegistry {
    #[must_use]
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            stores: RwLock::new(HashMap::new()),
            retry,
        }
    }

    /// Returns the store for a session, creating it if needed.
    pub fn open(&self, id: &SessionId) -> Arc<CatalogStore> {
        if let Some(store) = self.get(id) {
            return store;
        }
        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        stores
            .entry(id.clone())
            .or_insert_with(|| Arc::new(CatalogStore::new(self.retry)))
            .clone()
    }

    /// Returns the store for a session if one is open.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<Arc<CatalogStore>> {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Clears and removes the store for a session.
    pub fn close(&self, id: &SessionId) {
        let removed = self
            .stores
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if let Some(store) = removed {
            store.clear();
            info!(session_id = %id, "closed catalog");
        }
    }

    /// Returns the number of open stores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use paydesk_navigation::{Menu, Module};
    use paydesk_session::UserProfile;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;
    use tokio::sync::Notify;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::HttpBackend;
    use crate::config::BackendConfig;

    type Outcome<T> = std::result::Result<T, FetchError>;

    /// In-memory backend that replays scripted module responses.
    #[derive(Default)]
    struct FakeSource {
        modules: Mutex<VecDeque<Outcome<Vec<Module>>>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn replying(outcomes: Vec<Outcome<Vec<Module>>>) -> Self {
            Self {
                modules: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn login(&self, _username: &str, _password: &str) -> Result<AuthToken, FetchError> {
            Err(FetchError::Unauthenticated.into())
        }

        async fn fetch_profile(&self, _token: &AuthToken) -> Result<UserProfile, FetchError> {
            Ok(UserProfile::new("alice"))
        }

        async fn fetch_modules(&self, _token: &AuthToken) -> Result<Vec<Module>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self
                .modules
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()));
            next.map_err(Into::into)
        }

        async fn fetch_menus(&self, _token: &AuthToken) -> Result<Vec<Menu>, FetchError> {
            Ok(vec![Menu::new(10, "risk_mgmt", "Risk").with_module_code("lcm")])
        }
    }

    fn session(lifetime: Duration) -> Session {
        Session::new(
            SessionId::generate(),
            AuthToken::new("tok".to_string(), lifetime),
            UserProfile::new("alice"),
        )
    }

    fn transient() -> FetchError {
        FetchError::Transient {
            resource: "modules".to_string(),
            reason: "connection reset".to_string(),
        }
    }

    fn token_manager() -> Vec<Module> {
        vec![Module::new(1, "lcm", "Token Manager")]
    }

    #[tokio::test]
    async fn load_without_valid_session_makes_no_call() {
        let source = FakeSource::replying(vec![Ok(token_manager())]);
        let store = CatalogStore::new(RetryPolicy::none());

        let catalog = store.load(&source, &session(Duration::seconds(-1))).await;

        assert!(catalog.is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn successful_load_replaces_snapshot() {
        let source = FakeSource::replying(vec![Ok(token_manager())]);
        let store = CatalogStore::new(RetryPolicy::none());

        let catalog = store.load(&source, &session(Duration::minutes(5))).await;

        assert_eq!(catalog.modules().len(), 1);
        assert_eq!(catalog.menus().len(), 1);
        assert_eq!(store.snapshot(), catalog);
    }

    #[tokio::test]
    async fn transient_failure_keeps_stale_snapshot() {
        let source = FakeSource::replying(vec![Ok(token_manager()), Err(transient())]);
        let store = CatalogStore::new(RetryPolicy::none());
        let session = session(Duration::minutes(5));

        let first = store.load(&source, &session).await;
        let second = store.load(&source, &session).await;

        assert_eq!(first, second);
        assert_eq!(store.snapshot().modules().len(), 1);
    }

    #[tokio::test]
    async fn forbidden_yields_empty_without_clearing_cache() {
        let source = FakeSource::replying(vec![
            Ok(token_manager()),
            Err(FetchError::Forbidden {
                resource: "modules".to_string(),
            }),
        ]);
        let store = CatalogStore::new(RetryPolicy::none());
        let session = session(Duration::minutes(5));

        store.load(&source, &session).await;
        let denied = store.load(&source, &session).await;

        assert!(denied.is_empty());
        assert_eq!(store.snapshot().modules().len(), 1);
    }

    #[tokio::test]
    async fn transient_failures_are_retried() {
        let source = FakeSource::replying(vec![Err(transient()), Ok(token_manager())]);
        let store = CatalogStore::new(RetryPolicy {
            attempts: 2,
            backoff: std::time::Duration::from_millis(1),
            deadline: None,
        });

        let catalog = store.load(&source, &session(Duration::minutes(5))).await;

        assert_eq!(catalog.modules().len(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let source =
            FakeSource::replying(vec![Err(transient()), Err(transient()), Err(transient())]);
        let store = CatalogStore::new(RetryPolicy {
            attempts: 1,
            backoff: std::time::Duration::from_millis(1),
            deadline: None,
        });

        let err = store
            .try_load(&source, &AuthToken::new("tok".to_string(), Duration::minutes(5)))
            .await
            .unwrap_err();

        assert!(err.current_context().is_transient());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn malformed_responses_are_not_retried() {
        let source = FakeSource::replying(vec![Err(FetchError::Malformed {
            resource: "modules".to_string(),
            reason: "expected array".to_string(),
        })]);
        let store = CatalogStore::new(RetryPolicy {
            attempts: 3,
            backoff: std::time::Duration::from_millis(1),
            deadline: None,
        });

        let catalog = store.load(&source, &session(Duration::minutes(5))).await;

        assert!(catalog.is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn clear_discards_in_flight_results() {
        /// Source whose module fetch clears the store mid-flight.
        struct ClearingSource<'a> {
            store: &'a CatalogStore,
        }

        #[async_trait]
        impl CatalogSource for ClearingSource<'_> {
            async fn login(&self, _: &str, _: &str) -> Result<AuthToken, FetchError> {
                Err(FetchError::Unauthenticated.into())
            }

            async fn fetch_profile(&self, _: &AuthToken) -> Result<UserProfile, FetchError> {
                Err(FetchError::Unauthenticated.into())
            }

            async fn fetch_modules(&self, _: &AuthToken) -> Result<Vec<Module>, FetchError> {
                self.store.clear();
                Ok(vec![Module::new(1, "lcm", "Token Manager")])
            }

            async fn fetch_menus(&self, _: &AuthToken) -> Result<Vec<Menu>, FetchError> {
                Ok(Vec::new())
            }
        }

        let store = CatalogStore::new(RetryPolicy::none());
        let source = ClearingSource { store: &store };

        let fetched = store
            .try_load(&source, &AuthToken::new("tok".to_string(), Duration::minutes(5)))
            .await
            .expect("load");

        assert!(fetched.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn older_load_finishing_last_does_not_overwrite_newer() {
        /// Source whose first module fetch waits until released.
        #[derive(Default)]
        struct GatedSource {
            release: Notify,
            calls: AtomicUsize,
        }

        #[async_trait]
        impl CatalogSource for GatedSource {
            async fn login(&self, _: &str, _: &str) -> Result<AuthToken, FetchError> {
                Err(FetchError::Unauthenticated.into())
            }

            async fn fetch_profile(&self, _: &AuthToken) -> Result<UserProfile, FetchError> {
                Err(FetchError::Unauthenticated.into())
            }

            async fn fetch_modules(&self, _: &AuthToken) -> Result<Vec<Module>, FetchError> {
                if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    self.release.notified().await;
                    Ok(vec![Module::new(1, "lcm", "Token Manager")])
                } else {
                    Ok(vec![Module::new(2, "itcp", "Issuer TSP")])
                }
            }

            async fn fetch_menus(&self, _: &AuthToken) -> Result<Vec<Menu>, FetchError> {
                Ok(Vec::new())
            }
        }

        let store = CatalogStore::new(RetryPolicy::none());
        let source = GatedSource::default();
        let token = AuthToken::new("tok".to_string(), Duration::minutes(5));

        let (older, newer) = tokio::join!(store.try_load(&source, &token), async {
            let newer = store.try_load(&source, &token).await;
            source.release.notify_one();
            newer
        });

        let older = older.expect("older load");
        let newer = newer.expect("newer load");
        assert_eq!(newer.modules()[0].code, "itcp");
        assert_eq!(store.snapshot(), newer);
        assert_eq!(older, newer);
    }

    #[tokio::test]
    async fn stalled_backend_is_cut_off_at_the_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = BackendConfig::new(server.uri());
        config.timeout_seconds = 1;
        let store = CatalogStore::new(config.retry_policy());
        let backend = HttpBackend::new(config).expect("client");

        let started = Instant::now();
        let catalog = store.load(&backend, &session(Duration::minutes(5))).await;

        assert!(catalog.is_empty());
        assert!(
            started.elapsed() < std::time::Duration::from_millis(2500),
            "load took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn registry_opens_one_store_per_session() {
        let registry = CatalogRegistry::new(RetryPolicy::none());
        let id = SessionId::from("sess_a");

        let first = registry.open(&id);
        let second = registry.open(&id);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn closing_a_session_clears_its_catalog() {
        let source = FakeSource::replying(vec![Ok(token_manager())]);
        let registry = CatalogRegistry::new(RetryPolicy::none());
        let session = session(Duration::minutes(5));

        let store = registry.open(session.id());
        store.load(&source, &session).await;
        assert!(!store.snapshot().is_empty());

        registry.close(session.id());

        assert!(store.snapshot().is_empty());
        assert!(registry.get(session.id()).is_none());
        assert!(registry.is_empty());
    }
}
