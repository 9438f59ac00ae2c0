//! Fixed-step simulation tick
//!
//! One tick runs to completion: apply buffered input, advance the clock,
//! spawn, move, collide, decay effects, then check for game over.

use rand::Rng;

use super::state::{GameState, PlayField, SessionSummary};
use super::{collision, effects, movement, spawn};

/// Input buffered between ticks (latest value wins)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch x relative to the play field
    pub pointer_x: Option<f32>,
    /// New play-field size after a viewport resize
    pub resize: Option<PlayField>,
}

/// Advance a running session by one tick. Returns the summary if this tick
/// ended the session (lives ran out). Does nothing unless Running.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) -> Option<SessionSummary> {
    if !state.is_running() {
        return None;
    }

    if let Some(field) = input.resize {
        state.resize(field);
    }
    if let Some(x) = input.pointer_x {
        state.pointer_x = Some(x);
    }

    state.clock.advance();

    spawn::run(state, rng);
    movement::run(state);
    collision::run(state);
    effects::run(state);

    if state.lives == 0 {
        let summary = state.finish();
        if let Some(summary) = summary {
            log::info!(
                "Game over: score {} after {}s",
                summary.final_score,
                summary.survived_seconds
            );
        }
        return summary;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::{Enemy, SessionStatus};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_state() -> GameState {
        let mut state = GameState::new(PlayField::new(400.0, 600.0).unwrap(), Tuning::default());
        state.begin_run();
        state
    }

    fn ram_fighter(state: &mut GameState) {
        let pos = state.fighter.as_ref().unwrap().pos;
        state.enemies.push(Enemy {
            pos,
            size: Vec2::new(30.0, 30.0),
            speed: 2.0,
            phase: 0.0,
        });
    }

    #[test]
    fn test_tick_advances_clock_and_fires() {
        let mut state = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput::default();
        for _ in 0..7 {
            tick(&mut state, &input, &mut rng);
        }
        assert_eq!(state.clock.ticks(), 7);
        assert_eq!(state.clock.elapsed_ms(), 112);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(PlayField::new(400.0, 600.0).unwrap(), Tuning::default());
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput {
            pointer_x: Some(10.0),
            ..Default::default()
        };
        assert!(tick(&mut state, &input, &mut rng).is_none());
        assert_eq!(state.clock.ticks(), 0);
        assert!(state.pointer_x.is_none());
    }

    #[test]
    fn test_pointer_input_persists() {
        let mut state = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput {
            pointer_x: Some(300.0),
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        let after_first = state.fighter.as_ref().unwrap().pos.x;
        assert!((after_first - 210.0).abs() < 1e-4);

        // No new input: keep chasing the last known pointer
        tick(&mut state, &TickInput::default(), &mut rng);
        assert!(state.fighter.as_ref().unwrap().pos.x > after_first);
    }

    #[test]
    fn test_resize_applied_before_movement() {
        let mut state = running_state();
        let mut rng = Pcg32::seed_from_u64(1);
        let input = TickInput {
            resize: Some(PlayField::new(100.0, 200.0).unwrap()),
            ..Default::default()
        };
        tick(&mut state, &input, &mut rng);
        let fighter = state.fighter.as_ref().unwrap();
        assert!(fighter.pos.x >= 20.0 && fighter.pos.x <= 80.0);
        assert_eq!(fighter.pos.y, 120.0);
    }

    #[test]
    fn test_three_rams_end_the_game() {
        let mut state = running_state();
        let mut rng = Pcg32::seed_from_u64(3);
        let input = TickInput::default();

        for expected_lives in [2, 1] {
            ram_fighter(&mut state);
            assert!(tick(&mut state, &input, &mut rng).is_none());
            assert_eq!(state.lives, expected_lives);
            assert_eq!(state.status, SessionStatus::Running);
        }

        ram_fighter(&mut state);
        let summary = tick(&mut state, &input, &mut rng).expect("session should end");
        assert_eq!(state.lives, 0);
        assert_eq!(state.status, SessionStatus::Ended);
        assert_eq!(summary.final_score, 0);
        assert!(state.fighter.is_none());

        // Further ticks change nothing
        let ticks = state.clock.ticks();
        assert!(tick(&mut state, &input, &mut rng).is_none());
        assert_eq!(state.clock.ticks(), ticks);
    }
}
