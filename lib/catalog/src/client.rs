//! Access to the admin backend.
//!
//! [`CatalogSource`] is the seam between the console and the backend; the
//! console holds it as `Arc<dyn CatalogSource>` and tests substitute
//! in-memory implementations. [`HttpBackend`] is the reqwest implementation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use paydesk_core::Result;
use paydesk_navigation::{Menu, Module};
use paydesk_session::{AuthToken, UserProfile};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::config::BackendConfig;
use crate::error::FetchError;

/// Operations the console needs from the backend.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, FetchError>;

    /// Fetches the signed-in user's profile, including assigned modules and menus.
    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, FetchError>;

    /// Fetches every module the backend knows about.
    async fn fetch_modules(&self, token: &AuthToken) -> Result<Vec<Module>, FetchError>;

    /// Fetches every menu the backend knows about.
    async fn fetch_menus(&self, token: &AuthToken) -> Result<Vec<Menu>, FetchError>;
}

/// List responses arrive either bare or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    fn into_item(self) -> T {
        match self {
            Self::Wrapped { data: item } | Self::Bare(item) => item,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
    /// Lifetime in seconds.
    #[serde(default, alias = "expires_in")]
    expires_in: Option<i64>,
    #[serde(default, alias = "expires_at")]
    expires_at: Option<DateTime<Utc>>,
}

/// Backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
    token_lifetime: Duration,
}

impl HttpBackend {
    /// Creates a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `Transient` if the underlying HTTP client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FetchError::Transient {
                resource: "backend".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            config,
            token_lifetime: Duration::minutes(30),
        })
    }

    /// Sets the token lifetime used when the backend does not report one.
    #[must_use]
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    async fn send(
        &self,
        resource: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Vec<u8>, FetchError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, resource, "backend request failed");
            FetchError::Transient {
                resource: resource.to_string(),
                reason: if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    e.to_string()
                },
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, resource, body = %body, "backend returned error status");
            return Err(status_error(resource, status).into());
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transient {
            resource: resource.to_string(),
            reason: e.to_string(),
        })?;
        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        path: &str,
        token: &AuthToken,
    ) -> Result<T, FetchError> {
        if !token.is_valid() {
            return Err(FetchError::Unauthenticated.into());
        }

        let request = self
            .client
            .get(self.config.url(path))
            .bearer_auth(token.value());
        let body = self.send(resource, request).await?;
        decode(resource, &body)
    }
}

fn status_error(resource: &str, status: StatusCode) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthenticated,
        StatusCode::FORBIDDEN => FetchError::Forbidden {
            resource: resource.to_string(),
        },
        other => FetchError::Transient {
            resource: resource.to_string(),
            reason: format!("HTTP {other}"),
        },
    }
}

fn decode<T: DeserializeOwned>(resource: &str, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, resource, "failed to decode backend response");
        FetchError::Malformed {
            resource: resource.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[async_trait]
impl CatalogSource for HttpBackend {
    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<AuthToken, FetchError> {
        let request = self
            .client
            .post(self.config.url(&self.config.login_path))
            .json(&json!({ "username": username, "password": password }));
        let body = self.send("login", request).await?;
        let response = decode::<ItemEnvelope<LoginResponse>>("login", &body)?.into_item();

        if response.token.trim().is_empty() {
            return Err(FetchError::Malformed {
                resource: "login".to_string(),
                reason: "empty token".to_string(),
            }
            .into());
        }

        let token = match (response.expires_at, response.expires_in) {
            (Some(expires_at), _) => AuthToken::with_expiry(response.token, expires_at),
            (None, Some(seconds)) => AuthToken::new(response.token, Duration::seconds(seconds)),
            (None, None) => AuthToken::new(response.token, self.token_lifetime),
        };
        debug!(expires_at = %token.expires_at(), "backend issued token");
        Ok(token)
    }

    #[instrument(skip_all)]
    async fn fetch_profile(&self, token: &AuthToken) -> Result<UserProfile, FetchError> {
        let envelope: ItemEnvelope<UserProfile> = self
            .get_json("profile", &self.config.profile_path, token)
            .await?;
        Ok(envelope.into_item())
    }

    #[instrument(skip_all)]
    async fn fetch_modules(&self, token: &AuthToken) -> Result<Vec<Module>, FetchError> {
        let envelope: ListEnvelope<Module> = self
            .get_json("modules", &self.config.modules_path, token)
            .await?;
        let modules = envelope.into_items();
        debug!(count = modules.len(), "fetched modules");
        Ok(modules)
    }

    #[instrument(skip_all)]
    async fn fetch_menus(&self, token: &AuthToken) -> Result<Vec<Menu>, FetchError> {
        let envelope: ListEnvelope<Menu> = self
            .get_json("menus", &self.config.menus_path, token)
            .await?;
        let menus = envelope.into_items();
        debug!(count = menus.len(), "fetched menus");
        Ok(menus)
    }
}
