//! One event dispatch instance.

use rustc_hash::FxHashMap;

use crate::core::{DeathReason, GameState, UserId};

use super::bus::EventBus;
use super::data::{EventData, EventValue};
use super::error::EventError;
use super::name::EventName;

/// Immutable call context for a dispatch.
///
/// Everything a listener may read but must not change: why a death
/// happened, whose event this is, numeric counts computed by the
/// initiator. Built once before dispatch; only getters afterwards.
#[derive(Clone, Debug, Default)]
pub struct EventParams {
    reason: Option<DeathReason>,
    user: Option<UserId>,
    main_role: Option<String>,
    kind: Option<String>,
    counts: FxHashMap<&'static str, i64>,
}

impl EventParams {
    /// Create empty params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the death reason.
    #[must_use]
    pub fn reason(mut self, reason: DeathReason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Set the subject user.
    #[must_use]
    pub fn user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    /// Set the subject's primary role.
    #[must_use]
    pub fn main_role(mut self, role: impl Into<String>) -> Self {
        self.main_role = Some(role.into());
        self
    }

    /// Set the collection kind (metadata queries).
    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Add a named count.
    #[must_use]
    pub fn count(mut self, key: &'static str, value: i64) -> Self {
        self.counts.insert(key, value);
        self
    }

    /// The death reason, if set.
    #[must_use]
    pub fn get_reason(&self) -> Option<DeathReason> {
        self.reason
    }

    /// The subject user, if set.
    #[must_use]
    pub fn get_user(&self) -> Option<UserId> {
        self.user
    }

    /// The subject's primary role, if set.
    #[must_use]
    pub fn get_main_role(&self) -> Option<&str> {
        self.main_role.as_deref()
    }

    /// The collection kind, if set.
    #[must_use]
    pub fn get_kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// A named count, if set.
    #[must_use]
    pub fn get_count(&self, key: &'static str) -> Option<i64> {
        self.counts.get(key).copied()
    }
}

/// One dispatch instance.
///
/// Created immediately before a dispatch, consumed synchronously by it,
/// discarded after the initiator reads the final payload and flags.
/// `dispatch` takes the event by value and returns it, so an event
/// cannot be dispatched twice.
///
/// ## Control flags
///
/// - `prevent_default` tells the *initiator* to skip its normal fallback
///   action; the bus itself ignores it.
/// - `stop_processing` tells the *bus* to halt delivery to the remaining
///   listeners; the initiator's behavior is unaffected.
///
/// The two are independent. Listeners that fully replace a default
/// outcome commonly set both.
#[derive(Debug)]
pub struct Event {
    name: EventName,
    /// Mutable payload shared down the listener chain.
    pub data: EventData,
    params: EventParams,
    /// Set by a listener to suppress the initiator's default action.
    pub prevent_default: bool,
    /// Set by a listener to halt delivery to remaining listeners.
    pub stop_processing: bool,
}

impl Event {
    /// Create an event with an empty payload.
    #[must_use]
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            data: EventData::new(),
            params: EventParams::default(),
            prevent_default: false,
            stop_processing: false,
        }
    }

    /// Seed a payload key (builder pattern).
    #[must_use]
    pub fn with_data(mut self, key: &'static str, value: impl Into<EventValue>) -> Self {
        self.data.set(key, value);
        self
    }

    /// Attach the immutable params record (builder pattern).
    #[must_use]
    pub fn with_params(mut self, params: EventParams) -> Self {
        self.params = params;
        self
    }

    /// The event name.
    #[must_use]
    pub fn name(&self) -> EventName {
        self.name
    }

    /// The immutable call context.
    #[must_use]
    pub fn params(&self) -> &EventParams {
        &self.params
    }

    /// Dispatch this event through the bus.
    ///
    /// Snapshots the listener sequence, then invokes each listener in
    /// priority order with the event and the shared state. A listener
    /// setting `stop_processing` halts the loop immediately; a listener
    /// returning `Err` aborts the dispatch with that error and no later
    /// listener runs.
    ///
    /// Returns the event so the initiator can inspect the final payload
    /// and `prevent_default`.
    ///
    /// # Errors
    ///
    /// The first listener fault, verbatim.
    pub fn dispatch(
        mut self,
        bus: &EventBus,
        state: &mut GameState,
    ) -> Result<Event, EventError> {
        let listeners = bus.snapshot(self.name);
        log::trace!("dispatching `{}` to {} listener(s)", self.name, listeners.len());

        for entry in listeners {
            if let Err(err) = (*entry.handler)(&mut self, state) {
                log::warn!(
                    "`{}` listener {} at priority {} failed: {}",
                    self.name,
                    entry.token,
                    entry.priority,
                    err
                );
                return Err(err);
            }
            if self.stop_processing {
                log::debug!(
                    "`{}` short-circuited by listener {} at priority {}",
                    self.name,
                    entry.token,
                    entry.priority
                );
                break;
            }
        }

        Ok(self)
    }
}
