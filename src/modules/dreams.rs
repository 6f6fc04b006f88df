//! Dreams: some nights, a villager is trapped in a nightmare.
//!
//! On night start the module sometimes picks a victim and schedules the
//! nightmare on a caller-owned timer. The timer callback re-validates
//! that the same night is still running before doing anything — if day
//! broke or another night began while it slept, it exits silently. A
//! trapped dreamer keeps the night open, is excused from idle warnings,
//! and dies at dawn if still dreaming.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::core::{SharedGame, UserId};
use crate::events::{names, EventBus, Priority};
use crate::timer::{self, StateGuard};

use super::{GameModule, ModuleBindings};

#[derive(Default)]
struct DreamInner {
    dreamer: Option<UserId>,
    pending: Vec<JoinHandle<()>>,
}

/// The dreams game-mode module.
pub struct DreamsModule {
    game: SharedGame,
    inner: Arc<Mutex<DreamInner>>,
}

impl DreamsModule {
    /// Create the module against the shared game it will schedule into.
    #[must_use]
    pub fn new(game: SharedGame) -> Self {
        Self {
            game,
            inner: Arc::new(Mutex::new(DreamInner::default())),
        }
    }

    /// The player currently trapped in a nightmare, if any.
    #[must_use]
    pub fn dreamer(&self) -> Option<UserId> {
        lock_inner(&self.inner).dreamer
    }

    /// Wait for all scheduled nightmare timers to fire.
    ///
    /// Call with the game lock released, or the timers deadlock.
    pub fn join_pending(&self) {
        let handles = std::mem::take(&mut lock_inner(&self.inner).pending);
        for handle in handles {
            // A panicked timer thread already aborted its callback.
            let _ = handle.join();
        }
    }
}

fn lock_inner(inner: &Arc<Mutex<DreamInner>>) -> std::sync::MutexGuard<'_, DreamInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameModule for DreamsModule {
    fn name(&self) -> &'static str {
        "dreams"
    }

    fn startup(&self, bus: &Arc<EventBus>, bindings: &mut ModuleBindings) {
        let inner = Arc::clone(&self.inner);
        let game = Arc::clone(&self.game);
        bindings.bind(bus, names::NIGHT_START, Priority::default(), move |_event, state| {
            let chance = state.settings().nightmare_chance;
            if !state.rng_mut().gen_bool(chance) {
                return Ok(());
            }
            let players: Vec<UserId> = state.players().into_iter().collect();
            let Some(&target) = state.rng_mut().choose(&players) else {
                return Ok(());
            };

            let guard = StateGuard::capture(state);
            let delay = state.settings().nightmare_delay;
            let timer_inner = Arc::clone(&inner);
            let handle = timer::schedule(delay, Arc::clone(&game), move |state| {
                if guard.is_stale(state) || !state.is_player(target) {
                    log::trace!("nightmare timer stale, ignoring");
                    return;
                }
                log::debug!("{} falls into a nightmare", target);
                lock_inner(&timer_inner).dreamer = Some(target);
            });
            lock_inner(&inner).pending.push(handle);
            Ok(())
        });

        let inner = Arc::clone(&self.inner);
        bindings.bind(bus, names::CHK_NIGHTDONE, Priority::default(), move |event, state| {
            // The night cannot end while someone is still dreaming.
            if let Some(dreamer) = lock_inner(&inner).dreamer {
                if state.is_player(dreamer) {
                    event.data.users_mut("nightroles")?.insert(dreamer);
                }
            }
            Ok(())
        });

        let inner = Arc::clone(&self.inner);
        bindings.bind(bus, names::NIGHT_IDLED, Priority::default(), move |event, _state| {
            // No warning points for idling through a nightmare.
            if let Some(dreamer) = lock_inner(&inner).dreamer {
                if event.params().get_user() == Some(dreamer) {
                    event.prevent_default = true;
                }
            }
            Ok(())
        });

        let inner = Arc::clone(&self.inner);
        bindings.bind(bus, names::DAY_START, Priority::default(), move |event, state| {
            if let Some(dreamer) = lock_inner(&inner).dreamer.take() {
                if state.is_player(dreamer) {
                    event.data.users_mut("dying")?.insert(dreamer);
                }
            }
            Ok(())
        });

        let inner = Arc::clone(&self.inner);
        bindings.bind(bus, names::DEL_PLAYER, Priority::default(), move |event, _state| {
            // The nightmare ends if the dreamer leaves the game.
            let mut guard = lock_inner(&inner);
            if guard.dreamer.is_some() && event.params().get_user() == guard.dreamer {
                guard.dreamer = None;
            }
            Ok(())
        });

        let inner = Arc::clone(&self.inner);
        bindings.bind(bus, names::REVEAL_ROLES, Priority::default(), move |event, state| {
            if let Some(dreamer) = lock_inner(&inner).dreamer {
                let nick = state.nick(dreamer).unwrap_or("<unknown>").to_string();
                event
                    .data
                    .lines_mut("output")?
                    .push(format!("{} is having a nightmare", nick));
            }
            Ok(())
        });
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::*;
    use crate::core::{GameState, Settings, User};
    use crate::events::{Event, EventParams, EventValue};

    fn settings() -> Settings {
        // Always dream, immediately.
        Settings::default()
            .nightmare_chance(1.0)
            .nightmare_delay(Duration::ZERO)
    }

    fn setup() -> (Arc<EventBus>, DreamsModule, SharedGame) {
        let game = Arc::new(Mutex::new(GameState::new(settings(), 42)));
        let module = DreamsModule::new(Arc::clone(&game));
        let bus = Arc::new(EventBus::new());
        let mut bindings = ModuleBindings::new();
        module.startup(&bus, &mut bindings);
        (bus, module, game)
    }

    fn start_night(bus: &Arc<EventBus>, game: &SharedGame) {
        let mut state = game.lock().unwrap();
        state.begin_night();
        Event::new(names::NIGHT_START)
            .dispatch(bus, &mut state)
            .unwrap();
    }

    #[test]
    fn test_nightmare_fires_same_night() {
        let (bus, module, game) = setup();
        game.lock()
            .unwrap()
            .add_player(User::new(UserId::new(1), "alice"));

        start_night(&bus, &game);
        module.join_pending();

        assert_eq!(module.dreamer(), Some(UserId::new(1)));
    }

    #[test]
    fn test_stale_nightmare_is_noop() {
        let (bus, module, game) = setup();

        {
            // Day breaks before the timer can take the lock, so the
            // callback finds a stale night and does nothing.
            let mut state = game.lock().unwrap();
            state.add_player(User::new(UserId::new(1), "alice"));
            state.begin_night();
            Event::new(names::NIGHT_START)
                .dispatch(&bus, &mut state)
                .unwrap();
            state.begin_day();
        }
        module.join_pending();

        assert_eq!(module.dreamer(), None);
    }

    #[test]
    fn test_dreamer_prolongs_night_and_dies_at_dawn() {
        let (bus, module, game) = setup();
        game.lock()
            .unwrap()
            .add_player(User::new(UserId::new(1), "alice"));

        start_night(&bus, &game);
        module.join_pending();
        assert!(module.dreamer().is_some());

        let mut state = game.lock().unwrap();

        let event = Event::new(names::CHK_NIGHTDONE)
            .with_data("nightroles", EventValue::Users(BTreeSet::new()))
            .dispatch(&bus, &mut state)
            .unwrap();
        assert!(event.data.users("nightroles").unwrap().contains(&UserId::new(1)));

        let event = Event::new(names::DAY_START)
            .with_data("dying", EventValue::Users(BTreeSet::new()))
            .dispatch(&bus, &mut state)
            .unwrap();
        assert!(event.data.users("dying").unwrap().contains(&UserId::new(1)));
        drop(state);

        assert_eq!(module.dreamer(), None);
    }

    #[test]
    fn test_dream_ends_when_dreamer_leaves() {
        let (bus, module, game) = setup();
        game.lock()
            .unwrap()
            .add_player(User::new(UserId::new(1), "alice"));

        start_night(&bus, &game);
        module.join_pending();
        assert!(module.dreamer().is_some());

        let mut state = game.lock().unwrap();
        state.remove_player(UserId::new(1));
        Event::new(names::DEL_PLAYER)
            .with_params(EventParams::new().user(UserId::new(1)))
            .dispatch(&bus, &mut state)
            .unwrap();
        drop(state);

        assert_eq!(module.dreamer(), None);
    }

    #[test]
    fn test_revealroles_mentions_dreamer() {
        let (bus, module, game) = setup();
        game.lock()
            .unwrap()
            .add_player(User::new(UserId::new(1), "alice"));

        start_night(&bus, &game);
        module.join_pending();

        let mut state = game.lock().unwrap();
        let event = Event::new(names::REVEAL_ROLES)
            .with_data("output", EventValue::Lines(Vec::new()))
            .dispatch(&bus, &mut state)
            .unwrap();
        drop(state);

        let lines = match event.data.get("output").unwrap() {
            EventValue::Lines(lines) => lines.clone(),
            other => panic!("unexpected value: {other:?}"),
        };
        assert_eq!(lines, vec!["alice is having a nightmare".to_string()]);
    }

    #[test]
    fn test_dreamer_exempt_from_idle_warning() {
        let (bus, module, game) = setup();
        game.lock()
            .unwrap()
            .add_player(User::new(UserId::new(1), "alice"));

        start_night(&bus, &game);
        module.join_pending();

        let mut state = game.lock().unwrap();
        let event = Event::new(names::NIGHT_IDLED)
            .with_params(EventParams::new().user(UserId::new(1)))
            .dispatch(&bus, &mut state)
            .unwrap();
        assert!(event.prevent_default);

        let event = Event::new(names::NIGHT_IDLED)
            .with_params(EventParams::new().user(UserId::new(2)))
            .dispatch(&bus, &mut state)
            .unwrap();
        assert!(!event.prevent_default);
    }
}
