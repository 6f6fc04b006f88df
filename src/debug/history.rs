//! Chronological mutation log for a tracked container.

use std::panic::Location;

/// One recorded mutation.
///
/// Key and value are captured pre-rendered so the record stays valid
/// after the container moves on.
#[derive(Clone, Debug)]
pub struct MutationRecord {
    /// Operation name (`insert`, `remove`, `clear`).
    pub op: &'static str,

    /// Rendered key, if the operation had one.
    pub key: Option<String>,

    /// Rendered value, if the operation had one.
    pub value: Option<String>,

    /// Call site that performed the mutation.
    pub location: &'static Location<'static>,
}

impl std::fmt::Display for MutationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.op)?;
        if let Some(key) = &self.key {
            write!(f, " {}", key)?;
        }
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
        }
        write!(f, " at {}:{}", self.location.file(), self.location.line())
    }
}

/// Named, ordered sequence of mutation records.
#[derive(Clone, Debug)]
pub struct History {
    name: String,
    records: Vec<MutationRecord>,
}

impl History {
    /// Create an empty history for a container with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// The container name this history belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a record.
    #[track_caller]
    pub fn add(&mut self, op: &'static str, key: Option<String>, value: Option<String>) {
        let record = MutationRecord {
            op,
            key,
            value,
            location: Location::caller(),
        };
        log::trace!("{}: {}", self.name, record);
        self.records.push(record);
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[MutationRecord] {
        &self.records
    }

    /// Number of recorded mutations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Has anything been recorded?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_records_in_order() {
        let mut history = History::new("test");
        history.add("insert", Some("a".into()), Some("1".into()));
        history.add("remove", Some("a".into()), None);

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].op, "insert");
        assert_eq!(history.records()[1].op, "remove");
    }

    #[test]
    fn test_record_captures_call_site() {
        let mut history = History::new("test");
        history.add("clear", None, None);

        let record = &history.records()[0];
        assert!(record.location.file().ends_with("history.rs"));
        assert!(format!("{}", record).starts_with("clear at "));
    }
}
