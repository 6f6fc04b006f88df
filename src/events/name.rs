//! Event names and listener priorities.

use serde::{Deserialize, Serialize};

/// Identifier for an event kind.
///
/// Names are opaque to the bus; modules declare constants for the events
/// they initiate and document the payload contract on the constant (see
/// [`names`](super::names)). Two names are the same event if the strings
/// are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EventName(&'static str);

impl EventName {
    /// Create a new event name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Get the name as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listener ordering key. Lower priorities fire first.
///
/// Ties are broken by registration order, which is stable across
/// dispatches for a fixed registry state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(pub i32);

impl Priority {
    /// The default priority for listeners that do not care about ordering.
    pub const DEFAULT: Priority = Priority(5);

    /// Create a new priority.
    #[must_use]
    pub const fn new(priority: i32) -> Self {
        Self(priority)
    }

    /// Get the raw priority value.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name_equality() {
        const A: EventName = EventName::new("chk_win");
        let b = EventName::new("chk_win");
        assert_eq!(A, b);
        assert_eq!(format!("{}", A), "chk_win");
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::new(1) < Priority::new(3));
        assert_eq!(Priority::default(), Priority::new(5));
    }
}
