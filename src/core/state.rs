//! Process-wide game state.
//!
//! One `GameState` exists per running game. Event handlers mutate it
//! during dispatch; the message router reads it to decide delivery.
//! Deferred callbacks take the coarse [`SharedGame`] lock before touching
//! it, so exactly one dispatch is in flight at a time.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use im::HashSet as ImHashSet;
use rustc_hash::FxHashMap;

use crate::debug::TrackedMap;

use super::config::Settings;
use super::phase::Phase;
use super::rng::GameRng;
use super::user::{User, UserId};

/// The single coarse lock guarding shared game state.
///
/// Handlers run under this lock; any deferred or background task that
/// mutates state must take it first.
pub type SharedGame = Arc<Mutex<GameState>>;

/// Shared state for one running game.
///
/// ## Player set
///
/// The alive-player set is a persistent (`im`) set so callers can take an
/// O(1) snapshot of "who was alive when I scheduled this" without holding
/// the lock.
///
/// ## Role bookkeeping
///
/// `roles` maps a role name to the set of users currently holding it;
/// `final_roles` records overrides shown in the end-of-game readout and
/// is mutation-tracked in debug builds.
#[derive(Debug)]
pub struct GameState {
    /// Current phase.
    pub phase: Phase,

    /// Completed-or-current night number (0 before the first night).
    pub night_count: u32,

    /// Completed-or-current day number (0 before the first day).
    pub day_count: u32,

    /// Role name -> users currently holding that role.
    pub roles: FxHashMap<String, BTreeSet<UserId>>,

    /// Role overrides for the end-of-game readout.
    pub final_roles: TrackedMap<UserId, String>,

    /// Alive players.
    players: ImHashSet<UserId>,

    /// Displayable nicks, kept even after death.
    nicks: FxHashMap<UserId, String>,

    rng: GameRng,
    settings: Settings,
}

impl GameState {
    /// Create a fresh game state with the given settings and RNG seed.
    #[must_use]
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            phase: Phase::default(),
            night_count: 0,
            day_count: 0,
            roles: FxHashMap::default(),
            final_roles: TrackedMap::new("final_roles"),
            players: ImHashSet::new(),
            nicks: FxHashMap::default(),
            rng: GameRng::new(seed),
            settings,
        }
    }

    /// The settings this game runs under.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The game RNG.
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Players ===

    /// Add a player to the game.
    pub fn add_player(&mut self, user: User) {
        self.players.insert(user.id);
        self.nicks.insert(user.id, user.nick);
    }

    /// Remove a player from the alive set. The nick is kept for display.
    ///
    /// Returns true if the user was alive.
    pub fn remove_player(&mut self, user: UserId) -> bool {
        self.players.remove(&user).is_some()
    }

    /// Is this user an alive player in the current game?
    #[must_use]
    pub fn is_player(&self, user: UserId) -> bool {
        self.players.contains(&user)
    }

    /// Number of alive players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// O(1) snapshot of the alive-player set.
    #[must_use]
    pub fn players(&self) -> ImHashSet<UserId> {
        self.players.clone()
    }

    /// Displayable nick for a user, if known.
    #[must_use]
    pub fn nick(&self, user: UserId) -> Option<&str> {
        self.nicks.get(&user).map(String::as_str)
    }

    // === Roles ===

    /// Assign a role to a user.
    pub fn assign_role(&mut self, user: UserId, role: impl Into<String>) {
        self.roles.entry(role.into()).or_default().insert(user);
    }

    /// Users currently holding a role.
    #[must_use]
    pub fn users_with_role(&self, role: &str) -> BTreeSet<UserId> {
        self.roles.get(role).cloned().unwrap_or_default()
    }

    /// Number of alive users holding a role.
    #[must_use]
    pub fn role_count(&self, role: &str) -> usize {
        self.roles
            .get(role)
            .map_or(0, |users| users.iter().filter(|u| self.is_player(**u)).count())
    }

    /// Move a user from one role to another.
    ///
    /// Returns true if the user actually held `from`.
    pub fn change_role(&mut self, user: UserId, from: &str, to: impl Into<String>) -> bool {
        let held = self
            .roles
            .get_mut(from)
            .is_some_and(|users| users.remove(&user));
        if held {
            self.assign_role(user, to);
        }
        held
    }

    // === Phase transitions ===

    /// Enter the night phase, advancing the night counter.
    pub fn begin_night(&mut self) {
        self.phase = Phase::Night;
        self.night_count += 1;
    }

    /// Enter the day phase, advancing the day counter.
    pub fn begin_day(&mut self) {
        self.phase = Phase::Day;
        self.day_count += 1;
    }

    /// End the game, resetting to the idle phase.
    pub fn end_game(&mut self) {
        self.phase = Phase::None;
    }
}
