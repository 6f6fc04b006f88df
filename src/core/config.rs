//! Bot and game configuration.
//!
//! Settings are plain values configured at startup and handed to
//! [`GameState`](super::GameState). Modules read the fields relevant to
//! them; nothing here is hot-reloaded mid-game.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::user::ChannelName;

/// How roles are revealed on death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleReveal {
    /// Reveal the exact role.
    #[default]
    On,
    /// Reveal only the team.
    Team,
    /// Reveal nothing.
    Off,
}

/// Runtime settings for the bot core.
///
/// Built with the builder methods; `Default` gives a playable baseline.
///
/// ## Example
///
/// ```
/// use lupine::core::Settings;
///
/// let settings = Settings::new("#village")
///     .devoice_during_night(true)
///     .nightmare_chance(0.2);
/// assert_eq!(settings.main_channel.as_str(), "#village");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// The primary game channel.
    pub main_channel: ChannelName,

    /// Silence all players in the main channel during night.
    pub devoice_during_night: bool,

    /// The role shown in place of hidden wolf-aligned roles.
    pub hidden_role: String,

    /// Show turncoats under `hidden_role` until they turn.
    pub hide_turncoat: bool,

    /// Death reveal policy.
    pub role_reveal: RoleReveal,

    /// Chance per night that a player suffers a nightmare.
    pub nightmare_chance: f64,

    /// Delay before a scheduled nightmare begins.
    #[serde(with = "duration_secs")]
    pub nightmare_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_channel: ChannelName::new("#village"),
            devoice_during_night: false,
            hidden_role: "villager".to_string(),
            hide_turncoat: true,
            role_reveal: RoleReveal::default(),
            nightmare_chance: 1.0 / 5.0,
            nightmare_delay: Duration::from_secs(60),
        }
    }
}

impl Settings {
    /// Create settings with the given main channel and defaults elsewhere.
    pub fn new(main_channel: impl Into<ChannelName>) -> Self {
        Self {
            main_channel: main_channel.into(),
            ..Self::default()
        }
    }

    /// Set the night devoice policy.
    #[must_use]
    pub fn devoice_during_night(mut self, enabled: bool) -> Self {
        self.devoice_during_night = enabled;
        self
    }

    /// Set the hidden role name.
    #[must_use]
    pub fn hidden_role(mut self, role: impl Into<String>) -> Self {
        self.hidden_role = role.into();
        self
    }

    /// Set whether turncoats are hidden.
    #[must_use]
    pub fn hide_turncoat(mut self, hide: bool) -> Self {
        self.hide_turncoat = hide;
        self
    }

    /// Set the reveal policy.
    #[must_use]
    pub fn role_reveal(mut self, reveal: RoleReveal) -> Self {
        self.role_reveal = reveal;
        self
    }

    /// Set the per-night nightmare chance.
    #[must_use]
    pub fn nightmare_chance(mut self, chance: f64) -> Self {
        self.nightmare_chance = chance;
        self
    }

    /// Set the nightmare delay.
    #[must_use]
    pub fn nightmare_delay(mut self, delay: Duration) -> Self {
        self.nightmare_delay = delay;
        self
    }
}

impl From<&str> for Settings {
    fn from(main_channel: &str) -> Self {
        Self::new(main_channel)
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
