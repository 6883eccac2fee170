//! Backend connection configuration.

use serde::Deserialize;
use std::time::Duration;

/// Configuration for the admin backend the console talks to.
///
/// Loaded by the console from `BACKEND__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `https://admin-api.internal`.
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_modules_path")]
    pub modules_path: String,

    #[serde(default = "default_menus_path")]
    pub menus_path: String,

    /// Endpoint returning the signed-in user's profile.
    #[serde(default = "default_profile_path")]
    pub profile_path: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Extra attempts after a transient failure.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Base delay between attempts; attempt `n` waits `n` times this.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_modules_path() -> String {
    "/api/modules".to_string()
}

fn default_menus_path() -> String {
    "/api/menus".to_string()
}

fn default_profile_path() -> String {
    "/api/users/me".to_string()
}

fn default_login_path() -> String {
    "/api/auth/login".to_string()
}

fn default_retry_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    250
}

impl BackendConfig {
    /// Creates a configuration with defaults for everything but the base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: default_timeout_seconds(),
            modules_path: default_modules_path(),
            menus_path: default_menus_path(),
            profile_path: default_profile_path(),
            login_path: default_login_path(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Joins an endpoint path onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.retry_attempts,
            backoff: Duration::from_millis(self.retry_backoff_ms),
            deadline: Some(self.timeout()),
        }
    }
}

/// Bounded, linear retry for transient fetch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
    /// Overall time allowed for one catalog load, retries included.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            attempts: 0,
            backoff: Duration::ZERO,
            deadline: None,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            backoff: Duration::from_millis(default_retry_backoff_ms()),
            deadline: Some(Duration::from_secs(default_timeout_seconds())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_config_has_correct_defaults() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"base_url": "http://backend"}"#).expect("deserialize");
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.modules_path, "/api/modules");
        assert_eq!(config.menus_path, "/api/menus");
        assert_eq!(config.profile_path, "/api/users/me");
        assert_eq!(config.login_path, "/api/auth/login");
        assert_eq!(config.retry_attempts, 2);
        assert_eq!(config.retry_backoff_ms, 250);
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let config = BackendConfig::new("http://backend/");
        assert_eq!(config.url("/api/modules"), "http://backend/api/modules");
        assert_eq!(config.url("api/menus"), "http://backend/api/menus");
    }

    #[test]
    fn retry_delay_grows_linearly() {
        let policy = BackendConfig::new("http://backend").retry_policy();
        assert_eq!(policy.delay(1), Duration::from_millis(250));
        assert_eq!(policy.delay(2), Duration::from_millis(500));
        assert_eq!(RetryPolicy::none().delay(3), Duration::ZERO);
    }

    #[test]
    fn retries_share_the_request_timeout() {
        let mut config = BackendConfig::new("http://backend");
        config.timeout_seconds = 4;
        assert_eq!(config.retry_policy().deadline, Some(Duration::from_secs(4)));
        assert_eq!(RetryPolicy::default().deadline, Some(Duration::from_secs(15)));
        assert_eq!(RetryPolicy::none().deadline, None);
    }
}
