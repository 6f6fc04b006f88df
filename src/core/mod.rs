//! Core types: users, channels, phases, state, RNG, configuration.
//!
//! These are the building blocks the event bus and the message router
//! operate on. Game content configures them at startup rather than the
//! core hardcoding any particular game.

pub mod config;
pub mod phase;
pub mod rng;
pub mod state;
pub mod user;

pub use config::{RoleReveal, Settings};
pub use phase::{DeathReason, Phase};
pub use rng::GameRng;
pub use state::{GameState, SharedGame};
pub use user::{ChannelName, User, UserId};
