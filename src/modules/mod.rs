//! Module lifecycle.
//!
//! Game modes, roles and tooling plug into the bus as modules: on
//! activation a module registers its listeners, on deactivation it must
//! unregister every one of them or stale handlers keep firing against a
//! module no longer considered active. [`ModuleBindings`] records the
//! tokens so teardown cannot miss one.

use std::sync::Arc;

use crate::core::GameState;
use crate::events::{
    Event, EventBus, EventError, EventName, ListenerToken, Priority, RegistryError,
};

pub mod dreams;
pub mod turncoat;

pub use dreams::DreamsModule;
pub use turncoat::TurncoatModule;

/// The registration tokens a module holds while active.
#[derive(Debug, Default)]
pub struct ModuleBindings {
    tokens: Vec<ListenerToken>,
}

impl ModuleBindings {
    /// Create an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and record its token.
    pub fn bind<F>(&mut self, bus: &EventBus, name: EventName, priority: Priority, handler: F)
    where
        F: Fn(&mut Event, &mut GameState) -> Result<(), EventError> + Send + Sync + 'static,
    {
        self.tokens.push(bus.register(name, priority, handler));
    }

    /// Unregister every recorded listener.
    ///
    /// All tokens are released even if one fails; the first failure is
    /// reported.
    ///
    /// # Errors
    ///
    /// [`RegistryError::UnknownToken`] if a token was already released
    /// elsewhere — a double-teardown bug.
    pub fn release(&mut self, bus: &EventBus) -> Result<(), RegistryError> {
        let mut first_error = None;
        for token in self.tokens.drain(..) {
            if let Err(err) = bus.unregister(token) {
                log::warn!("module teardown: {}", err);
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Number of active bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Any active bindings?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A pluggable behavior module.
///
/// Modules register listeners on startup and must remove them all on
/// teardown. The bus is passed as an `Arc` so listeners that initiate
/// their own (nested) dispatches can capture a clone of it.
pub trait GameModule: Send {
    /// Stable module name for logs.
    fn name(&self) -> &'static str;

    /// Register this module's listeners.
    fn startup(&self, bus: &Arc<EventBus>, bindings: &mut ModuleBindings);

    /// Remove this module's listeners.
    ///
    /// # Errors
    ///
    /// [`RegistryError`] if a binding was already released.
    fn teardown(
        &self,
        bus: &Arc<EventBus>,
        bindings: &mut ModuleBindings,
    ) -> Result<(), RegistryError> {
        log::debug!("tearing down module `{}`", self.name());
        bindings.release(bus)
    }
}
