//! Turncoat: a villager-looking role secretly aligned with the wolves.
//!
//! Turncoats win with the wolf team but count as villagers for seers and
//! death reveals. When the last real wolf dies, remaining turncoats turn
//! into wolves and the game continues — the win check is suppressed and
//! short-circuited for that dispatch.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{DeathReason, Phase, RoleReveal};
use crate::events::{names, Event, EventBus, EventParams, EventValue, Priority};

use super::{GameModule, ModuleBindings};

/// The role name this module owns.
pub const ROLE: &str = "turncoat";

/// The turncoat role module.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurncoatModule;

impl TurncoatModule {
    /// Create the module.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GameModule for TurncoatModule {
    fn name(&self) -> &'static str {
        ROLE
    }

    fn startup(&self, bus: &Arc<EventBus>, bindings: &mut ModuleBindings) {
        bindings.bind(bus, names::REVEAL_ROLE, Priority::default(), |event, state| {
            // Shown as the hidden role so team stats stay consistent with
            // what deaths reveal; team reveal already shows wolfteam.
            let settings = state.settings();
            if settings.hide_turncoat
                && settings.role_reveal != RoleReveal::Team
                && event.data.text("role")? == ROLE
            {
                let hidden = settings.hidden_role.clone();
                event.data.set("role", hidden);
            }
            Ok(())
        });

        bindings.bind(bus, names::FINAL_ROLE, Priority::default(), |event, _state| {
            // A turned turncoat shows as turncoat in the end-of-game
            // readout, not "wolf".
            if event.params().get_main_role() == Some(ROLE)
                && event.data.text("role")? == "wolf"
            {
                event.data.set("role", ROLE);
            }
            Ok(())
        });

        bindings.bind(bus, names::UPDATE_STATS, Priority::new(1), |event, state| {
            let settings = state.settings();
            if settings.hide_turncoat
                && event.params().get_main_role() == Some(settings.hidden_role.as_str())
            {
                event.data.names_mut("possible")?.insert(ROLE.to_string());
            }
            Ok(())
        });

        let metadata_bus = Arc::clone(bus);
        bindings.bind(bus, names::UPDATE_STATS, Priority::new(3), move |event, state| {
            // A pure-wolf night kill cannot have hit a turncoat still in
            // wolfchat. Chained deaths can, so only night_death counts.
            if !event.data.names("possible")?.contains(ROLE)
                || event.params().get_reason() != Some(DeathReason::NightDeath)
                || event.params().get_main_role() == Some(ROLE)
                || state.phase != Phase::Day
            {
                return Ok(());
            }

            let metadata = Event::new(names::ROLE_METADATA)
                .with_data("metadata", EventValue::Counts(FxHashMap::default()))
                .with_params(EventParams::new().kind("night_kills"))
                .dispatch(&metadata_bus, state)?;

            let nonwolf: i64 = metadata
                .data
                .counts("metadata")?
                .iter()
                .filter(|(role, _)| role.as_str() != "wolf")
                .map(|(_, count)| count)
                .sum();
            if nonwolf == 0 {
                event.data.names_mut("possible")?.remove(ROLE);
            }
            Ok(())
        });

        bindings.bind(bus, names::CHK_WIN, Priority::new(1), |event, state| {
            if event.params().get_count("real_wolves") != Some(0) {
                return Ok(());
            }

            let mut turned = false;
            for user in state.users_with_role(ROLE) {
                if state.change_role(user, ROLE, "wolf") {
                    turned = true;
                    if state.phase.is_game_phase() {
                        state.final_roles.insert(user, "wolf".to_string());
                        log::debug!("{} (turncoat) turning", user);
                    }
                }
            }

            if turned {
                // The village has not won: the wolves live on as turned
                // turncoats. Suppress the default win resolution and skip
                // the remaining win checks this dispatch.
                event.prevent_default = true;
                event.stop_processing = true;
            }
            Ok(())
        });

        bindings.bind(bus, names::ROLE_METADATA, Priority::default(), |event, _state| {
            if event.params().get_kind() == Some("role_categories") {
                let categories: BTreeSet<String> =
                    ["Wolfchat", "Wolfteam"].iter().map(|s| s.to_string()).collect();
                event.data.set(ROLE, EventValue::Names(categories));
            }
            Ok(())
        });
    }
}
