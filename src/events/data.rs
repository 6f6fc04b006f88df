//! Event payload values.
//!
//! Payloads are open maps: each event name documents which keys it seeds
//! and what type each holds (see [`names`](super::names)), but the bus
//! does not enforce a closed schema — modules routinely add keys that
//! other modules read. The value side *is* typed: accessors return an
//! [`EventError`](super::EventError) on a contract violation instead of
//! panicking mid-dispatch.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::core::UserId;

use super::error::EventError;

/// A typed payload value.
#[derive(Clone, Debug, PartialEq)]
pub enum EventValue {
    /// A flag.
    Bool(bool),
    /// A number.
    Int(i64),
    /// A single string (role name, winner, message key).
    Text(String),
    /// A set of users (targets, dying players, night actors).
    Users(BTreeSet<UserId>),
    /// A set of names (possible roles, categories).
    Names(BTreeSet<String>),
    /// Ordered display lines.
    Lines(Vec<String>),
    /// Name-to-count table (role metadata).
    Counts(FxHashMap<String, i64>),
}

impl EventValue {
    /// The type name used in error reports.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            EventValue::Bool(_) => "bool",
            EventValue::Int(_) => "int",
            EventValue::Text(_) => "text",
            EventValue::Users(_) => "users",
            EventValue::Names(_) => "names",
            EventValue::Lines(_) => "lines",
            EventValue::Counts(_) => "counts",
        }
    }
}

impl From<bool> for EventValue {
    fn from(v: bool) -> Self {
        EventValue::Bool(v)
    }
}

impl From<i64> for EventValue {
    fn from(v: i64) -> Self {
        EventValue::Int(v)
    }
}

impl From<&str> for EventValue {
    fn from(v: &str) -> Self {
        EventValue::Text(v.to_string())
    }
}

impl From<String> for EventValue {
    fn from(v: String) -> Self {
        EventValue::Text(v)
    }
}

impl From<BTreeSet<UserId>> for EventValue {
    fn from(v: BTreeSet<UserId>) -> Self {
        EventValue::Users(v)
    }
}

/// The mutable key/value payload of one event.
///
/// Pre-populated by the dispatch initiator with the keys the event's
/// contract names; read and written by listeners in priority order.
/// Mutations by one listener are visible to the next.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventData {
    entries: FxHashMap<&'static str, EventValue>,
}

impl EventData {
    /// Create an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value.
    pub fn set(&mut self, key: &'static str, value: impl Into<EventValue>) {
        self.entries.insert(key, value.into());
    }

    /// Get a raw value.
    #[must_use]
    pub fn get(&self, key: &'static str) -> Option<&EventValue> {
        self.entries.get(key)
    }

    /// Does the payload contain this key?
    #[must_use]
    pub fn contains(&self, key: &'static str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the payload empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn require(&self, key: &'static str) -> Result<&EventValue, EventError> {
        self.entries.get(key).ok_or(EventError::DataMissing { key })
    }

    fn require_mut(&mut self, key: &'static str) -> Result<&mut EventValue, EventError> {
        self.entries
            .get_mut(key)
            .ok_or(EventError::DataMissing { key })
    }

    // === Typed accessors ===

    /// Read a bool value.
    pub fn bool(&self, key: &'static str) -> Result<bool, EventError> {
        match self.require(key)? {
            EventValue::Bool(v) => Ok(*v),
            other => Err(type_error(key, "bool", other)),
        }
    }

    /// Read an int value.
    pub fn int(&self, key: &'static str) -> Result<i64, EventError> {
        match self.require(key)? {
            EventValue::Int(v) => Ok(*v),
            other => Err(type_error(key, "int", other)),
        }
    }

    /// Read a text value.
    pub fn text(&self, key: &'static str) -> Result<&str, EventError> {
        match self.require(key)? {
            EventValue::Text(v) => Ok(v),
            other => Err(type_error(key, "text", other)),
        }
    }

    /// Mutable access to a user set.
    pub fn users_mut(
        &mut self,
        key: &'static str,
    ) -> Result<&mut BTreeSet<UserId>, EventError> {
        match self.require_mut(key)? {
            EventValue::Users(v) => Ok(v),
            other => Err(type_error(key, "users", other)),
        }
    }

    /// Read a user set.
    pub fn users(&self, key: &'static str) -> Result<&BTreeSet<UserId>, EventError> {
        match self.require(key)? {
            EventValue::Users(v) => Ok(v),
            other => Err(type_error(key, "users", other)),
        }
    }

    /// Mutable access to a name set.
    pub fn names_mut(
        &mut self,
        key: &'static str,
    ) -> Result<&mut BTreeSet<String>, EventError> {
        match self.require_mut(key)? {
            EventValue::Names(v) => Ok(v),
            other => Err(type_error(key, "names", other)),
        }
    }

    /// Read a name set.
    pub fn names(&self, key: &'static str) -> Result<&BTreeSet<String>, EventError> {
        match self.require(key)? {
            EventValue::Names(v) => Ok(v),
            other => Err(type_error(key, "names", other)),
        }
    }

    /// Mutable access to display lines.
    pub fn lines_mut(&mut self, key: &'static str) -> Result<&mut Vec<String>, EventError> {
        match self.require_mut(key)? {
            EventValue::Lines(v) => Ok(v),
            other => Err(type_error(key, "lines", other)),
        }
    }

    /// Mutable access to a count table.
    pub fn counts_mut(
        &mut self,
        key: &'static str,
    ) -> Result<&mut FxHashMap<String, i64>, EventError> {
        match self.require_mut(key)? {
            EventValue::Counts(v) => Ok(v),
            other => Err(type_error(key, "counts", other)),
        }
    }

    /// Read a count table.
    pub fn counts(&self, key: &'static str) -> Result<&FxHashMap<String, i64>, EventError> {
        match self.require(key)? {
            EventValue::Counts(v) => Ok(v),
            other => Err(type_error(key, "counts", other)),
        }
    }
}

fn type_error(key: &'static str, expected: &'static str, found: &EventValue) -> EventError {
    EventError::DataType {
        key,
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut data = EventData::new();
        data.set("role", "wolf");
        data.set("count", 3i64);
        data.set("handled", true);

        assert_eq!(data.text("role").unwrap(), "wolf");
        assert_eq!(data.int("count").unwrap(), 3);
        assert!(data.bool("handled").unwrap());
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_missing_key() {
        let data = EventData::new();
        let err = data.text("role").unwrap_err();
        assert!(matches!(err, EventError::DataMissing { key: "role" }));
    }

    #[test]
    fn test_type_mismatch() {
        let mut data = EventData::new();
        data.set("role", "wolf");

        let err = data.int("role").unwrap_err();
        match err {
            EventError::DataType {
                key,
                expected,
                found,
            } => {
                assert_eq!(key, "role");
                assert_eq!(expected, "int");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_users_mutation() {
        let mut data = EventData::new();
        data.set("targets", EventValue::Users(BTreeSet::new()));

        data.users_mut("targets").unwrap().insert(UserId::new(7));
        assert!(data.users("targets").unwrap().contains(&UserId::new(7)));
    }

    #[test]
    fn test_names_and_counts() {
        let mut data = EventData::new();
        data.set("possible", EventValue::Names(BTreeSet::new()));
        data.set("metadata", EventValue::Counts(FxHashMap::default()));

        data.names_mut("possible").unwrap().insert("wolf".into());
        data.counts_mut("metadata")
            .unwrap()
            .insert("wolf".into(), 2);

        assert!(data.names("possible").unwrap().contains("wolf"));
        assert_eq!(data.counts("metadata").unwrap()["wolf"], 2);
    }
}
