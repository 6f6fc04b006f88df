//! Well-known event names and their payload contracts.
//!
//! Each event name has exactly one documented contract: the initiator
//! pre-seeds the listed `data` keys and reads them back after dispatch,
//! and every listener honors the listed types. `params` fields are fixed
//! at dispatch and read-only.

use super::name::EventName;

/// A player's role is about to be revealed (death, `!myrole`).
///
/// data: `"role"`: Text — the role name to show; listeners may rewrite it.
/// params: `user` — whose role is shown; `main_role` — the actual role.
pub const REVEAL_ROLE: EventName = EventName::new("reveal_role");

/// The end-of-game readout is deciding what to display for a player.
///
/// data: `"role"`: Text — the role to display; listeners may rewrite it.
/// params: `user`; `main_role` — the role the player ended with.
pub const FINAL_ROLE: EventName = EventName::new("final_role");

/// Role statistics are being recomputed after a death.
///
/// data: `"possible"`: Names — roles the dead player may have been;
/// listeners widen or narrow the set.
/// params: `user`; `main_role`; `reason` — why the death happened.
pub const UPDATE_STATS: EventName = EventName::new("update_stats");

/// A win-condition check. The initiator applies its default win logic
/// only if no listener sets `prevent_default`.
///
/// data: `"winner"`: Text — set by a listener that decides the game.
/// params: counts `"players"`, `"wolves"`, `"real_wolves"`.
pub const CHK_WIN: EventName = EventName::new("chk_win");

/// A module is collecting role metadata (e.g. which roles kill at night).
///
/// data: `"metadata"`: Counts — role name to count; listeners add entries.
/// params: `kind` — which metadata is being collected (`"night_kills"`,
/// `"role_categories"`).
pub const ROLE_METADATA: EventName = EventName::new("get_role_metadata");

/// Night has begun.
///
/// data: none. params: none.
pub const NIGHT_START: EventName = EventName::new("transition_night_begin");

/// Day is about to begin; night deaths are being resolved.
///
/// data: `"dying"`: Users — players to kill at dawn; listeners add to it.
/// params: none.
pub const DAY_START: EventName = EventName::new("transition_day_begin");

/// The night is checked for completion.
///
/// data: `"nightroles"`: Users — players who still must act tonight;
/// listeners extend the set to prolong the night.
/// params: none.
pub const CHK_NIGHTDONE: EventName = EventName::new("chk_nightdone");

/// A player idled through the night. The initiator issues a warning
/// unless a listener sets `prevent_default`.
///
/// data: none. params: `user`.
pub const NIGHT_IDLED: EventName = EventName::new("night_idled");

/// A player is being removed from the game.
///
/// data: none. params: `user`; `main_role`; `reason`.
pub const DEL_PLAYER: EventName = EventName::new("del_player");

/// An operator asked for the hidden-role debug listing.
///
/// data: `"output"`: Lines — listeners append display lines.
/// params: none.
pub const REVEAL_ROLES: EventName = EventName::new("revealroles");
