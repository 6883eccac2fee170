//! Normalization of a user's module/menu assignments.
//!
//! Profiles list assigned modules and menus as a JSON array, as a string
//! containing a JSON-encoded array, or not at all. Each element is either a
//! bare identifier or a fully embedded object. [`AccessList`] accepts all of
//! these once, at the deserialization boundary, and exposes a single tagged
//! form ([`AccessEntry`]) to everything downstream.

use crate::id::EntityKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

/// A full object embedded in an access list, kept as delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedObject(Map<String, Value>);

impl EmbeddedObject {
    /// Wraps a JSON object.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the normalized `id` of the object, if it has a usable one.
    #[must_use]
    pub fn key(&self) -> Option<EntityKey> {
        self.0.get("id").and_then(EntityKey::from_value)
    }

    /// Returns the raw fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the object as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// One normalized access-list element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEntry {
    /// A bare identifier that must be looked up in the catalog.
    Identifier(EntityKey),
    /// An object the backend already resolved for us.
    Resolved(EmbeddedObject),
}

impl AccessEntry {
    /// Normalizes a single JSON element.
    ///
    /// Returns `None` for elements that carry no usable identifier
    /// (null, booleans, nested arrays, blank strings).
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::Resolved(EmbeddedObject::new(map.clone()))),
            other => EntityKey::from_value(other).map(Self::Identifier),
        }
    }

    /// Returns the key of this entry, if one can be determined.
    #[must_use]
    pub fn key(&self) -> Option<EntityKey> {
        match self {
            Self::Identifier(key) => Some(key.clone()),
            Self::Resolved(object) => object.key(),
        }
    }

    /// Returns true if this entry is an embedded object.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// A normalized, ordered list of access entries.
///
/// An empty list means "no restriction configured", which callers treat as
/// access to the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessList {
    entries: Vec<AccessEntry>,
}

impl AccessList {
    /// Creates an empty list.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a list from already-normalized entries.
    #[must_use]
    pub fn from_entries(entries: Vec<AccessEntry>) -> Self {
        Self { entries }
    }

    /// Creates a list of bare identifiers.
    #[must_use]
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<EntityKey>,
    {
        Self {
            entries: keys
                .into_iter()
                .map(|k| AccessEntry::Identifier(k.into()))
                .collect(),
        }
    }

    /// Normalizes any supported JSON shape.
    ///
    /// - arrays are normalized element by element
    /// - strings are parsed as JSON; a parse failure yields an empty list
    /// - a single identifier or object becomes a one-element list
    /// - `null` yields an empty list
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::empty(),
            Value::Array(items) => Self::from_items(items),
            Value::String(encoded) => Self::parse_encoded(encoded),
            other => Self {
                entries: AccessEntry::from_value(other).into_iter().collect(),
            },
        }
    }

    /// Parses a JSON-encoded access list.
    ///
    /// Blank input is an empty list. Unparsable input is logged and treated
    /// as an empty list.
    #[must_use]
    pub fn parse_encoded(encoded: &str) -> Self {
        let trimmed = encoded.trim();
        if trimmed.is_empty() {
            return Self::empty();
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::String(inner)) => {
                // Double-encoded lists decode to another string.
                if inner.trim_start().starts_with('[') {
                    Self::parse_encoded(&inner)
                } else {
                    Self {
                        entries: AccessEntry::from_value(&Value::String(inner))
                            .into_iter()
                            .collect(),
                    }
                }
            }
            Ok(decoded) => Self::from_value(&decoded),
            Err(e) => {
                warn!(error = %e, input = %trimmed, "unparsable access list, treating as empty");
                Self::empty()
            }
        }
    }

    fn from_items(items: &[Value]) -> Self {
        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match AccessEntry::from_value(item) {
                Some(entry) => entries.push(entry),
                None => warn!(element = %item, "skipping access list element without identifier"),
            }
        }
        Self { entries }
    }

    /// Returns the entries in their original order.
    #[must_use]
    pub fn entries(&self) -> &[AccessEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, AccessEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if every entry is an embedded object.
    #[must_use]
    pub fn all_resolved(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(AccessEntry::is_resolved)
    }
}

impl<'a> IntoIterator for &'a AccessList {
    type Item = &'a AccessEntry;
    type IntoIter = std::slice::Iter<'a, AccessEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for AccessList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let values: Vec<Value> = self
            .entries
            .iter()
            .map(|entry| match entry {
                AccessEntry::Identifier(key) => match key {
                    EntityKey::Numeric(n) => Value::from(*n),
                    EntityKey::Text(s) => Value::from(s.clone()),
                },
                AccessEntry::Resolved(object) => object.to_value(),
            })
            .collect();
        values.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AccessList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
