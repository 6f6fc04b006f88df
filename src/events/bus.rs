//! The event bus: registry behind the process lock, plus dispatch entry
//! points.

use std::sync::{Arc, Mutex, PoisonError};

use crate::core::GameState;

use super::error::{EventError, RegistryError};
use super::event::{Event, EventParams};
use super::name::{EventName, Priority};
use super::registry::{Handler, ListenerEntry, ListenerRegistry, ListenerToken};

/// The event bus.
///
/// Owns the [`ListenerRegistry`] behind a lock so modules can register
/// from anywhere, while dispatch itself stays single-threaded: the lock
/// is held only to snapshot the listener sequence, never while listeners
/// run. One dispatch is in flight at a time per process — the caller
/// serializes through the [`SharedGame`](crate::core::SharedGame) lock
/// that hands out the `&mut GameState`.
///
/// Registry mutations made while a dispatch is running affect only
/// future dispatches.
#[derive(Default)]
pub struct EventBus {
    registry: Mutex<ListenerRegistry>,
}

impl EventBus {
    /// Create a bus with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener closure.
    pub fn register<F>(&self, name: EventName, priority: Priority, handler: F) -> ListenerToken
    where
        F: Fn(&mut Event, &mut GameState) -> Result<(), EventError> + Send + Sync + 'static,
    {
        self.register_arc(name, priority, Arc::new(handler))
    }

    /// Register an already-shared listener.
    pub fn register_arc(
        &self,
        name: EventName,
        priority: Priority,
        handler: Arc<Handler>,
    ) -> ListenerToken {
        self.lock_registry().register(name, priority, handler)
    }

    /// Unregister a listener.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownToken`] for tokens never issued or already
    /// released.
    pub fn unregister(&self, token: ListenerToken) -> Result<(), RegistryError> {
        self.lock_registry().unregister(token)
    }

    /// Number of listeners currently registered for an event name.
    #[must_use]
    pub fn listener_count(&self, name: EventName) -> usize {
        self.lock_registry().listener_count(name)
    }

    /// Dispatch an event with an empty payload and params.
    ///
    /// Shorthand for building an [`Event`] and calling
    /// [`Event::dispatch`]; use the builder for events that seed data.
    ///
    /// # Errors
    ///
    /// The first listener fault, verbatim.
    pub fn dispatch(
        &self,
        name: EventName,
        state: &mut GameState,
        params: EventParams,
    ) -> Result<Event, EventError> {
        Event::new(name).with_params(params).dispatch(self, state)
    }

    /// Snapshot the ordered listener sequence for a dispatch.
    pub(crate) fn snapshot(&self, name: EventName) -> Vec<ListenerEntry> {
        self.lock_registry().resolve(name)
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, ListenerRegistry> {
        // Registry operations cannot panic mid-mutation; a poisoned lock
        // still holds consistent bookkeeping.
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
