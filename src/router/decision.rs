//! Routing decisions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ChannelName, GameState, Phase, User, UserId};

/// Logical target of an outgoing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// A channel.
    Channel(ChannelName),
    /// The bot itself — a private conversation with the source.
    Bot,
}

/// Where a message actually goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    /// A channel.
    Channel(ChannelName),
    /// A single user.
    User(UserId),
}

/// How a message is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    /// Normal channel speech.
    Public,
    /// Private notice to one user.
    Notice,
    /// Private message to one user.
    Private,
}

/// A fully decided delivery. Pure value; handing it to a
/// [`Transport`](super::Transport) is the only side effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Effective recipient.
    pub recipient: Recipient,
    /// Delivery mode.
    pub mode: Visibility,
    /// Optional `nick: ` prefix for public replies.
    pub prefix: Option<String>,
}

/// Per-call routing options.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouteOptions {
    /// Prefix public replies with the source's nick.
    pub prefix_nick: bool,
}

impl RouteOptions {
    /// Options with the nick prefix enabled.
    #[must_use]
    pub const fn prefixed() -> Self {
        Self { prefix_nick: true }
    }
}

/// Routing failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The target channel is not one the router was configured with.
    /// The message is never silently dropped; the caller decides.
    #[error("cannot route to unknown channel {0}")]
    UnknownChannel(ChannelName),
}

/// Decides the effective recipient and visibility for outgoing text.
///
/// Configured once with the set of joined channels; every decision is a
/// pure function of (source, target, game state, options). Routing to a
/// channel the router does not know fails fast.
#[derive(Clone, Debug, Default)]
pub struct Router {
    channels: BTreeSet<ChannelName>,
}

impl Router {
    /// Create a router that knows no channels yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a joined channel (builder pattern).
    #[must_use]
    pub fn join(mut self, channel: impl Into<ChannelName>) -> Self {
        self.channels.insert(channel.into());
        self
    }

    /// Is this channel known to the router?
    #[must_use]
    pub fn knows(&self, channel: &ChannelName) -> bool {
        self.channels.contains(channel)
    }

    fn resolve_channel(&self, channel: &ChannelName) -> Result<ChannelName, RouteError> {
        if self.knows(channel) {
            Ok(channel.clone())
        } else {
            Err(RouteError::UnknownChannel(channel.clone()))
        }
    }

    /// Route a reply from `source` back to where the triggering message
    /// came from.
    ///
    /// - Private context: plain private message to the source.
    /// - Main channel, while a game is in progress and the source is not
    ///   an alive player, or while night devoicing is in force: forced
    ///   notice to the source so the shared channel stays clean.
    /// - Otherwise: public speech to the channel, optionally prefixed
    ///   with the source's nick.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownChannel`] if the target channel was never
    /// joined.
    pub fn route(
        &self,
        source: &User,
        target: &Target,
        state: &GameState,
        options: RouteOptions,
    ) -> Result<Delivery, RouteError> {
        let delivery = match target {
            Target::Bot => Delivery {
                recipient: Recipient::User(source.id),
                mode: Visibility::Private,
                prefix: None,
            },
            Target::Channel(channel) => {
                let channel = self.resolve_channel(channel)?;
                let settings = state.settings();
                let silenced = channel == settings.main_channel
                    && ((!state.is_player(source.id) && state.phase.is_game_phase())
                        || (settings.devoice_during_night && state.phase == Phase::Night));

                if silenced {
                    Delivery {
                        recipient: Recipient::User(source.id),
                        mode: Visibility::Notice,
                        prefix: None,
                    }
                } else {
                    Delivery {
                        recipient: Recipient::Channel(channel),
                        mode: Visibility::Public,
                        prefix: options
                            .prefix_nick
                            .then(|| format!("{}: ", source.nick)),
                    }
                }
            }
        };

        log::debug!(
            "route {} -> {:?}: {:?} as {:?}",
            source.nick,
            target,
            delivery.recipient,
            delivery.mode
        );
        Ok(delivery)
    }
}

/// The (source, target) pair of one incoming message.
///
/// Wraps the routing primitives the way command handlers use them:
/// `pm` always goes back to the sender, `send` goes to wherever the
/// message came from, `reply` applies the game-state silencing rules.
#[derive(Clone, Debug)]
pub struct MessageContext {
    /// Who sent the triggering message.
    pub source: User,
    /// Where it was sent.
    pub target: Target,
}

impl MessageContext {
    /// Create a context for a message from `source` to `target`.
    pub fn new(source: User, target: Target) -> Self {
        Self { source, target }
    }

    /// Did the triggering message arrive in private?
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.target == Target::Bot
    }

    /// Deliver to the sender, mirroring the conversation style: a notice
    /// when the triggering message was public, a private message when it
    /// was already private.
    #[must_use]
    pub fn pm(&self) -> Delivery {
        Delivery {
            recipient: Recipient::User(self.source.id),
            mode: if self.is_private() {
                Visibility::Private
            } else {
                Visibility::Notice
            },
            prefix: None,
        }
    }

    /// Deliver to wherever the triggering message was sent: privately
    /// for a private context, to the channel otherwise.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownChannel`] if the target channel was never
    /// joined.
    pub fn send(&self, router: &Router) -> Result<Delivery, RouteError> {
        match &self.target {
            Target::Bot => Ok(self.pm()),
            Target::Channel(channel) => Ok(Delivery {
                recipient: Recipient::Channel(router.resolve_channel(channel)?),
                mode: Visibility::Public,
                prefix: None,
            }),
        }
    }

    /// Reply to the sender, applying the game-state silencing rules of
    /// [`Router::route`].
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownChannel`] if the target channel was never
    /// joined.
    pub fn reply(
        &self,
        router: &Router,
        state: &GameState,
        options: RouteOptions,
    ) -> Result<Delivery, RouteError> {
        router.route(&self.source, &self.target, state, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Settings, UserId};

    fn router() -> Router {
        Router::new().join("#village")
    }

    fn alice() -> User {
        User::new(UserId::new(1), "alice")
    }

    fn state() -> GameState {
        GameState::new(Settings::new("#village"), 42)
    }

    #[test]
    fn test_private_context_pm_is_private() {
        let ctx = MessageContext::new(alice(), Target::Bot);
        let delivery = ctx.pm();
        assert_eq!(delivery.recipient, Recipient::User(UserId::new(1)));
        assert_eq!(delivery.mode, Visibility::Private);
    }

    #[test]
    fn test_public_context_pm_is_notice() {
        let ctx = MessageContext::new(alice(), Target::Channel("#village".into()));
        let delivery = ctx.pm();
        assert_eq!(delivery.mode, Visibility::Notice);
    }

    #[test]
    fn test_send_to_unknown_channel_fails() {
        let ctx = MessageContext::new(alice(), Target::Channel("#nowhere".into()));
        let err = ctx.send(&router()).unwrap_err();
        assert_eq!(err, RouteError::UnknownChannel("#nowhere".into()));
    }

    #[test]
    fn test_reply_prefix() {
        let ctx = MessageContext::new(alice(), Target::Channel("#village".into()));
        let delivery = ctx
            .reply(&router(), &state(), RouteOptions::prefixed())
            .unwrap();
        assert_eq!(delivery.prefix.as_deref(), Some("alice: "));
    }
}
