//! Context-sensitive message routing.
//!
//! Given a message's logical source and target plus the current game
//! state, decide where the text actually goes: public channel speech, a
//! private notice, or a plain private message. Dead or observing users
//! replying in the main channel mid-game get their reply as a notice
//! instead of polluting the shared channel, and an optional policy
//! silences everyone there during night.
//!
//! Decisions are pure values ([`Delivery`]); the [`Transport`] trait is
//! the seam where the network lives.

pub mod decision;
pub mod transport;

pub use decision::{
    Delivery, MessageContext, Recipient, RouteError, RouteOptions, Router, Target, Visibility,
};
pub use transport::{LogTransport, Transport};
