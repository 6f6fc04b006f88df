//! Map wrapper that logs mutations in debug builds.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use super::history::History;

/// A map that records its mutation history in debug builds.
///
/// Reads go straight through. `insert`, `remove` and `clear` append a
/// [`MutationRecord`](super::MutationRecord) with the caller's location
/// when `debug_assertions` are on; in release builds no recording happens
/// and the wrapper costs a branch on a constant.
///
/// ## Example
///
/// ```
/// use lupine::debug::TrackedMap;
///
/// let mut map: TrackedMap<u32, &str> = TrackedMap::new("final_roles");
/// map.insert(1, "wolf");
/// assert_eq!(map.get(&1), Some(&"wolf"));
/// #[cfg(debug_assertions)]
/// assert_eq!(map.history().records()[0].op, "insert");
/// ```
#[derive(Clone, Debug)]
pub struct TrackedMap<K, V> {
    inner: FxHashMap<K, V>,
    history: History,
}

impl<K, V> TrackedMap<K, V>
where
    K: Eq + Hash + Debug,
    V: Debug,
{
    /// Create an empty tracked map with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: FxHashMap::default(),
            history: History::new(name),
        }
    }

    /// Insert a value, returning the previous one if present.
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if cfg!(debug_assertions) {
            self.history.add(
                "insert",
                Some(format!("{:?}", key)),
                Some(format!("{:?}", value)),
            );
        }
        self.inner.insert(key, value)
    }

    /// Remove a key, returning its value if present.
    #[track_caller]
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if cfg!(debug_assertions) {
            self.history.add("remove", Some(format!("{:?}", key)), None);
        }
        self.inner.remove(key)
    }

    /// Remove every entry.
    #[track_caller]
    pub fn clear(&mut self) {
        if cfg!(debug_assertions) {
            self.history.add("clear", None, None);
        }
        self.inner.clear();
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Does the map contain this key?
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Is the map empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.inner.iter()
    }

    /// The recorded mutation history.
    ///
    /// Empty in release builds.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_reads() {
        let mut map: TrackedMap<&str, i64> = TrackedMap::new("test");
        map.insert("a", 1);
        map.insert("b", 2);

        assert_eq!(map.get(&"a"), Some(&1));
        assert!(map.contains_key(&"b"));
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut map: TrackedMap<&str, i64> = TrackedMap::new("test");
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(1));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut map: TrackedMap<&str, i64> = TrackedMap::new("test");
        map.insert("a", 1);

        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.remove(&"a"), None);

        map.insert("b", 2);
        map.clear();
        assert!(map.is_empty());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_history_records_mutations() {
        let mut map: TrackedMap<&str, i64> = TrackedMap::new("test");
        map.insert("a", 1);
        map.remove(&"a");
        map.clear();
        map.get(&"a");

        let ops: Vec<_> = map.history().records().iter().map(|r| r.op).collect();
        assert_eq!(ops, vec!["insert", "remove", "clear"]);
        assert_eq!(map.history().records()[0].key.as_deref(), Some("\"a\""));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_history_captures_caller() {
        let mut map: TrackedMap<&str, i64> = TrackedMap::new("test");
        map.insert("a", 1);

        // #[track_caller] attributes the mutation to this call site.
        let location = map.history().records()[0].location;
        assert!(location.file().ends_with("tracked.rs"));
        assert!(location.line() > 0);
    }
}
