//! Centralized console configuration.
//!
//! Loaded via the `config` crate from environment variables, e.g.
//! `BACKEND__BASE_URL` or `SESSION__DURATION_MINUTES`.
//!
//! See [`BackendConfig`] for the backend connection settings.

use paydesk_catalog::BackendConfig;
use serde::Deserialize;

/// Console configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Admin backend connection.
    pub backend: BackendConfig,

    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session duration in minutes, used when the backend does not report a
    /// token lifetime.
    #[serde(default = "default_session_duration_minutes")]
    pub duration_minutes: i64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_session_duration_minutes() -> i64 {
    30
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_session_duration_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_has_correct_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.duration_minutes, 30);
        assert_eq!(config.cleanup_interval_seconds, 300);
        assert!(config.secure_cookies);
    }

    #[test]
    fn server_config_requires_only_backend_url() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"backend": {"base_url": "http://backend"}}"#)
                .expect("deserialize");
        assert_eq!(config.backend.base_url, "http://backend");
        assert_eq!(config.backend.timeout_seconds, 15);
        assert_eq!(config.session.duration_minutes, 30);
    }
}
