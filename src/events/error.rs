//! Error types for the event bus.

use thiserror::Error;

use super::registry::ListenerToken;

/// Failure during event dispatch or payload access.
///
/// A listener returning any of these aborts the dispatch; the error
/// surfaces to the initiator with no later listener run.
#[derive(Debug, Error)]
pub enum EventError {
    /// A payload key the contract requires was never seeded.
    #[error("event data key `{key}` is missing")]
    DataMissing {
        /// The missing key.
        key: &'static str,
    },

    /// A payload key holds a different value type than the contract says.
    #[error("event data key `{key}` holds {found}, expected {expected}")]
    DataType {
        /// The offending key.
        key: &'static str,
        /// Type the caller asked for.
        expected: &'static str,
        /// Type actually stored.
        found: &'static str,
    },

    /// A module's listener reported a failure of its own.
    #[error("module `{module}` failed handling `{event}`: {reason}")]
    Module {
        /// The module that failed.
        module: String,
        /// The event being handled.
        event: String,
        /// What went wrong.
        reason: String,
    },
}

/// Failure in listener registry bookkeeping.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The token was never issued or has already been unregistered.
    /// Always a caller bug — unregistration is not idempotent.
    #[error("unregistering unknown listener token {0}")]
    UnknownToken(ListenerToken),
}
