//! User and channel identification.
//!
//! ## UserId
//!
//! Type-safe identifier for a chat user. The connection layer allocates
//! these; the core never interprets them beyond equality and ordering.
//!
//! ## ChannelName
//!
//! Owned channel name. Channels are configured at startup; the router
//! refuses to route to a channel it was never told about.

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat user.
///
/// Stable for the lifetime of a connection. Nick changes do not change
/// the `UserId`; the displayable nick lives in [`GameState`](super::GameState).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl UserId {
    /// Create a new user ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "User({})", self.0)
    }
}

/// A user together with its displayable nick.
///
/// The router needs the nick for reply prefixes; everything else keys on
/// the `UserId` alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Current displayable nick.
    pub nick: String,
}

impl User {
    /// Create a new user handle.
    pub fn new(id: UserId, nick: impl Into<String>) -> Self {
        Self {
            id,
            nick: nick.into(),
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.nick)
    }
}

/// Owned channel name (e.g. `#village`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelName(String);

impl ChannelName {
    /// Create a new channel name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
