//! # lupine
//!
//! Event backbone and message-routing core for social-deduction chat
//! game bots (werewolf/mafia style).
//!
//! ## Design Principles
//!
//! 1. **Modules compose through events, not imports**: game modes, roles
//!    and tooling register prioritized listeners on named events and
//!    never call each other directly.
//!
//! 2. **Cooperative interception**: dispatch is a synchronous pipeline.
//!    Later listeners see earlier listeners' payload mutations; any
//!    listener can veto the initiator's default action
//!    (`prevent_default`) or halt the chain (`stop_processing`).
//!
//! 3. **Routing is pure**: deciding where a message goes (channel,
//!    notice, private) is a function of source, target and game state.
//!    Sending is a trait seam.
//!
//! ## Architecture
//!
//! - **Single coarse lock**: one dispatch is in flight at a time; timers
//!   and background work serialize through [`core::SharedGame`].
//!
//! - **Faults surface**: a listener error aborts its dispatch and
//!   reaches the initiator; the bus never swallows it.
//!
//! ## Modules
//!
//! - `core`: users, channels, phases, game state, RNG, settings
//! - `events`: event names, payloads, listener registry, dispatch
//! - `router`: delivery decisions and the transport seam
//! - `modules`: module lifecycle plus bundled game content
//! - `timer`: deferred actions with staleness guards
//! - `debug`: mutation-history tracking for debug builds

pub mod core;
pub mod debug;
pub mod events;
pub mod modules;
pub mod router;
pub mod timer;

// Re-export commonly used types
pub use crate::core::{
    ChannelName, DeathReason, GameRng, GameState, Phase, RoleReveal, Settings, SharedGame, User,
    UserId,
};

pub use crate::events::{
    Event, EventBus, EventData, EventError, EventName, EventParams, EventValue, Handler,
    ListenerRegistry, ListenerToken, Priority, RegistryError,
};

pub use crate::router::{
    Delivery, LogTransport, MessageContext, Recipient, RouteError, RouteOptions, Router, Target,
    Transport, Visibility,
};

pub use crate::modules::{DreamsModule, GameModule, ModuleBindings, TurncoatModule};

pub use crate::timer::{schedule, StateGuard};

pub use crate::debug::{History, MutationRecord, TrackedMap};
