//! Priority-ordered event bus.
//!
//! Named events carry a mutable payload through an ordered chain of
//! listeners. This is a cooperative, synchronous interceptor chain, not
//! a broadcast: later listeners see earlier listeners' mutations, and
//! any listener can veto the initiator's default action or halt the
//! chain outright.
//!
//! ## Key Components
//!
//! - [`EventName`] / [`Priority`]: identify an event kind and order its
//!   listeners (lower fires first, stable ties)
//! - [`EventData`] / [`EventValue`]: the mutable payload
//! - [`EventParams`]: immutable per-dispatch call context
//! - [`Event`]: one dispatch instance with its two control flags
//! - [`ListenerRegistry`]: ordered bookkeeping of registrations
//! - [`EventBus`]: the registry behind the process lock plus the
//!   dispatch loop
//!
//! ## Control flow
//!
//! `stop_processing` halts delivery to the remaining listeners of the
//! current dispatch; `prevent_default` tells the initiator to skip its
//! fallback action. They are independent signals. Listener faults are
//! not swallowed: the first `Err` aborts the dispatch and surfaces to
//! the initiator, because a half-applied state mutation is worse than a
//! visible failure.
//!
//! ## Example
//!
//! ```
//! use lupine::core::{GameState, Settings};
//! use lupine::events::{Event, EventBus, EventName, Priority};
//!
//! const PLAYER_DIES: EventName = EventName::new("player_dies");
//!
//! let bus = EventBus::new();
//! let mut state = GameState::new(Settings::default(), 42);
//!
//! bus.register(PLAYER_DIES, Priority::new(1), |event, _state| {
//!     // A protective role cancels the kill.
//!     event.prevent_default = true;
//!     Ok(())
//! });
//!
//! let event = Event::new(PLAYER_DIES).dispatch(&bus, &mut state).unwrap();
//! if !event.prevent_default {
//!     // apply the default kill
//! }
//! ```

pub mod bus;
pub mod data;
pub mod error;
pub mod event;
pub mod name;
pub mod names;
pub mod registry;

pub use bus::EventBus;
pub use data::{EventData, EventValue};
pub use error::{EventError, RegistryError};
pub use event::{Event, EventParams};
pub use name::{EventName, Priority};
pub use registry::{Handler, ListenerRegistry, ListenerToken};
