//! Game phase and death-reason vocabulary.

use serde::{Deserialize, Serialize};

/// Current phase of the game.
///
/// `Day` and `Night` are the active game phases; `Join` is the signup
/// window before the first night, `None` means no game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No game in progress.
    #[default]
    None,
    /// Players are signing up.
    Join,
    /// Daytime discussion and voting.
    Day,
    /// Night actions.
    Night,
}

impl Phase {
    /// Is a game actively being played?
    ///
    /// True for `Day` and `Night`, false for `None` and `Join`. This is
    /// the set the router consults when deciding whether non-players may
    /// speak in the main channel.
    #[must_use]
    pub const fn is_game_phase(self) -> bool {
        matches!(self, Phase::Day | Phase::Night)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::None => "none",
            Phase::Join => "join",
            Phase::Day => "day",
            Phase::Night => "night",
        };
        write!(f, "{}", name)
    }
}

/// Why a player died.
///
/// Carried in the immutable `params` record of death events so listeners
/// can distinguish, e.g., a direct night kill from a chained death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathReason {
    /// Killed by a night action.
    NightKill,
    /// Died during night resolution (possibly chained).
    NightDeath,
    /// Killed during the day (vote, shot, etc.).
    DayKill,
    /// Removed for idling.
    Idle,
    /// Left the game voluntarily.
    Quit,
}

impl std::fmt::Display for DeathReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeathReason::NightKill => "night_kill",
            DeathReason::NightDeath => "night_death",
            DeathReason::DayKill => "day_kill",
            DeathReason::Idle => "idle",
            DeathReason::Quit => "quit",
        };
        write!(f, "{}", name)
    }
}
