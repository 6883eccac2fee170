//! Backend-issued bearer tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bearer token with a known expiry.
///
/// The token value is opaque to the console; it is only replayed to the
/// backend in `Authorization` headers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    value: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Creates a token that is valid for `lifetime` from now.
    #[must_use]
    pub fn new(value: String, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            value,
            issued_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Creates a token with an explicit expiry.
    #[must_use]
    pub fn with_expiry(value: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            value,
            issued_at: Utc::now(),
            expires_at,
        }
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns when the token was issued.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns when the token expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the token has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Returns true if the token is non-empty and not expired.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.value.trim().is_empty() && !self.is_expired()
    }

    /// Returns the remaining lifetime, or zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        let left = self.expires_at - Utc::now();
        if left < Duration::zero() {
            Duration::zero()
        } else {
            left
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_valid() {
        let token = AuthToken::new("abc".to_string(), Duration::minutes(5));
        assert!(token.is_valid());
        assert!(!token.is_expired());
        assert!(token.remaining() > Duration::minutes(4));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = AuthToken::new("abc".to_string(), Duration::seconds(-1));
        assert!(token.is_expired());
        assert!(!token.is_valid());
        assert_eq!(token.remaining(), Duration::zero());
    }

    #[test]
    fn blank_token_is_invalid() {
        let token = AuthToken::new("  ".to_string(), Duration::minutes(5));
        assert!(!token.is_valid());
    }

    #[test]
    fn explicit_expiry_is_kept() {
        let expires = Utc::now() + Duration::hours(2);
        let token = AuthToken::with_expiry("abc".to_string(), expires);
        assert_eq!(token.expires_at(), expires);
    }

    #[test]
    fn debug_output_redacts_value() {
        let token = AuthToken::new("super-secret".to_string(), Duration::minutes(5));
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
