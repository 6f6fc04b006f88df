//! Deferred actions.
//!
//! Modules schedule follow-up work (a delayed night action, a timeout)
//! on caller-owned timers. The bus is synchronous and knows nothing
//! about time; a fired timer takes the coarse game lock and runs its
//! callback, which must re-validate its preconditions — game state may
//! have moved on since scheduling, and a stale callback is expected to
//! do nothing.

use std::sync::PoisonError;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::{GameState, Phase, SharedGame};

/// Captured preconditions for a deferred callback.
///
/// Capture at scheduling time, check after the timer fires. A guard is
/// stale once the phase changed or another night began; stale callbacks
/// exit silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateGuard {
    phase: Phase,
    night_count: u32,
}

impl StateGuard {
    /// Capture the current phase and night counter.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            night_count: state.night_count,
        }
    }

    /// Has the game moved on since capture?
    #[must_use]
    pub fn is_stale(&self, state: &GameState) -> bool {
        state.phase != self.phase || state.night_count != self.night_count
    }
}

/// Run `f` against the shared game state after `delay`.
///
/// The callback runs under the coarse game lock, serialized with every
/// dispatch. It is responsible for its own staleness check (see
/// [`StateGuard`]); there is no cancellation.
///
/// Returns the timer thread's handle so shutdown paths and tests can
/// join it.
pub fn schedule<F>(delay: Duration, game: SharedGame, f: F) -> JoinHandle<()>
where
    F: FnOnce(&mut GameState) + Send + 'static,
{
    thread::spawn(move || {
        thread::sleep(delay);
        let mut state = game.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::Settings;

    fn shared() -> SharedGame {
        Arc::new(Mutex::new(GameState::new(Settings::default(), 42)))
    }

    #[test]
    fn test_guard_fresh() {
        let game = shared();
        let mut state = game.lock().unwrap();
        state.begin_night();

        let guard = StateGuard::capture(&state);
        assert!(!guard.is_stale(&state));
    }

    #[test]
    fn test_guard_stale_after_phase_change() {
        let game = shared();
        let mut state = game.lock().unwrap();
        state.begin_night();

        let guard = StateGuard::capture(&state);
        state.begin_day();
        assert!(guard.is_stale(&state));
    }

    #[test]
    fn test_guard_stale_after_next_night() {
        let game = shared();
        let mut state = game.lock().unwrap();
        state.begin_night();

        let guard = StateGuard::capture(&state);
        state.begin_day();
        state.begin_night();

        // Same phase, different night.
        assert!(guard.is_stale(&state));
    }

    #[test]
    fn test_schedule_runs_under_lock() {
        let game = shared();
        let ran = Arc::new(Mutex::new(false));
        let ran_clone = Arc::clone(&ran);

        let handle = schedule(Duration::ZERO, Arc::clone(&game), move |state| {
            state.begin_night();
            *ran_clone.lock().unwrap() = true;
        });
        handle.join().unwrap();

        assert!(*ran.lock().unwrap());
        assert_eq!(game.lock().unwrap().night_count, 1);
    }
}
