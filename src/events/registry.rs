//! Listener registry.
//!
//! Pure bookkeeping: per event name, an ordered list of listeners.
//! Insertion keeps ascending priority order with ties in registration
//! order, so resolving is a plain copy of the list — no sort on the
//! dispatch path.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::GameState;

use super::error::{EventError, RegistryError};
use super::event::Event;
use super::name::{EventName, Priority};

/// A registered listener callable.
///
/// Listeners capture their owning module's state explicitly (usually an
/// `Arc<Mutex<..>>` clone); the bus never discovers handlers by any other
/// means. Returning `Err` aborts the dispatch and surfaces the error to
/// the initiator.
pub type Handler =
    dyn Fn(&mut Event, &mut GameState) -> Result<(), EventError> + Send + Sync;

/// Token identifying one registration.
///
/// Returned by [`ListenerRegistry::register`]; required to unregister.
/// Owned by the module that registered the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

impl std::fmt::Display for ListenerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

/// One registered listener.
#[derive(Clone)]
pub struct ListenerEntry {
    /// Registration token.
    pub token: ListenerToken,
    /// Ordering key; lower fires first.
    pub priority: Priority,
    /// The callable.
    pub handler: Arc<Handler>,
}

impl std::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("token", &self.token)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// Ordered listener storage, one list per event name.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: FxHashMap<EventName, SmallVec<[ListenerEntry; 4]>>,
    tokens: FxHashMap<ListenerToken, EventName>,
    next_token: u64,
}

impl ListenerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for an event name.
    ///
    /// The listener is inserted after every existing listener with the
    /// same or lower priority, so equal priorities fire in registration
    /// order.
    pub fn register(
        &mut self,
        name: EventName,
        priority: Priority,
        handler: Arc<Handler>,
    ) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;

        let list = self.listeners.entry(name).or_default();
        let position = list.partition_point(|entry| entry.priority <= priority);
        list.insert(
            position,
            ListenerEntry {
                token,
                priority,
                handler,
            },
        );
        self.tokens.insert(token, name);

        log::trace!("registered {} for `{}` at priority {}", token, name, priority);
        token
    }

    /// Unregister a listener by token.
    ///
    /// # Errors
    ///
    /// Unknown or already-released tokens are a caller bug and return
    /// [`RegistryError::UnknownToken`]; other registrations are never
    /// disturbed.
    pub fn unregister(&mut self, token: ListenerToken) -> Result<(), RegistryError> {
        let name = self
            .tokens
            .remove(&token)
            .ok_or(RegistryError::UnknownToken(token))?;

        if let Some(list) = self.listeners.get_mut(&name) {
            list.retain(|entry| entry.token != token);
            if list.is_empty() {
                self.listeners.remove(&name);
            }
        }

        log::trace!("unregistered {} from `{}`", token, name);
        Ok(())
    }

    /// Snapshot the ordered listener sequence for an event name.
    ///
    /// The snapshot is what a dispatch iterates; registry mutations made
    /// after the snapshot affect only future dispatches.
    #[must_use]
    pub fn resolve(&self, name: EventName) -> Vec<ListenerEntry> {
        self.listeners
            .get(&name)
            .map(|list| list.to_vec())
            .unwrap_or_default()
    }

    /// Number of listeners registered for an event name.
    #[must_use]
    pub fn listener_count(&self, name: EventName) -> usize {
        self.listeners.get(&name).map_or(0, |list| list.len())
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the registry empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
