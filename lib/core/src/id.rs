//! Normalized identifiers for backend entities.
//!
//! The backend is inconsistent about identifier shapes: the same module may
//! be referenced as `7`, `"7"`, or `{"id": 7, ...}`. [`EntityKey`] is the
//! single comparable form every lookup goes through.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a key from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a usable entity key: {:?}", self.input)
    }
}

impl std::error::Error for ParseKeyError {}

/// A backend identifier coerced to a comparable form.
///
/// Anything that looks numeric becomes [`EntityKey::Numeric`]; everything
/// else keeps its trimmed textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKey {
    /// An integral identifier (`7`, `"7"`, `7.0`).
    Numeric(i64),
    /// A non-numeric identifier such as a UUID or slug.
    Text(String),
}

impl EntityKey {
    /// Parses a raw string, coercing numeric-looking input.
    ///
    /// Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(n) => Some(Self::Numeric(n)),
            Err(_) => Some(Self::Text(trimmed.to_string())),
        }
    }

    /// Extracts a key from a JSON value.
    ///
    /// Numbers and strings are coerced directly; objects contribute their
    /// `id` field. Anything else yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Self::Numeric(i));
                }
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                    .map(|f| Self::Numeric(f as i64))
                    .or_else(|| Some(Self::Text(n.to_string())))
            }
            Value::String(s) => Self::parse(s),
            Value::Object(map) => map.get("id").and_then(Self::from_value),
            _ => None,
        }
    }

    /// Returns the numeric form, if this key is numeric.
    #[must_use]
    pub fn as_numeric(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns true if this key matches the given textual code,
    /// ignoring ASCII case.
    #[must_use]
    pub fn matches_code(&self, code: &str) -> bool {
        match self {
            Self::Text(text) => text.eq_ignore_ascii_case(code.trim()),
            Self::Numeric(_) => false,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseKeyError {
            input: s.to_string(),
        })
    }
}

impl From<i64> for EntityKey {
    fn from(n: i64) -> Self {
        Self::Numeric(n)
    }
}

impl From<i32> for EntityKey {
    fn from(n: i32) -> Self {
        Self::Numeric(i64::from(n))
    }
}

impl From<&str> for EntityKey {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| Self::Text(String::new()))
    }
}

impl Serialize for EntityKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Numeric(n) => serializer.serialize_i64(*n),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for EntityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom(format!("unusable entity key: {value}")))
    }
}
