//! Debug-only mutation tracing for shared containers.
//!
//! Game state lives a long time and is mutated from many handlers; when a
//! value is wrong it is rarely obvious *which* dispatch put it there.
//! [`TrackedMap`] wraps a map and records every mutation (operation, key,
//! value, call site) into an ordered [`History`] in debug builds. Release
//! builds compile the recording away; the wrapper is a plain passthrough.

pub mod history;
pub mod tracked;

pub use history::{History, MutationRecord};
pub use tracked::TrackedMap;
