//! Frame invariants under random pointer input and seeds

use idle_shooter::Tuning;
use idle_shooter::sim::{GameState, PlayField, TickInput, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const TICKS: usize = 600;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_frame_invariants_hold(
        seed in any::<u64>(),
        width in 100.0f32..1200.0,
        height in 200.0f32..900.0,
        pointer in prop::collection::vec(prop::option::of(-200.0f32..1400.0), 1..40),
    ) {
        let tuning = Tuning::default();
        let mut state = GameState::new(PlayField::new(width, height).unwrap(), tuning.clone());
        state.begin_run();
        let mut rng = Pcg32::seed_from_u64(seed);
        let half = tuning.fighter.width * 0.5;

        let mut last_lives = state.lives;
        for i in 0..TICKS {
            let input = TickInput {
                pointer_x: pointer[i % pointer.len()],
                resize: None,
            };
            let ended = tick(&mut state, &input, &mut rng).is_some();

            prop_assert!(state.lives <= tuning.initial_lives);
            prop_assert!(state.lives <= last_lives);
            last_lives = state.lives;

            prop_assert_eq!(state.score % tuning.score_per_kill, 0);

            if let Some(fighter) = &state.fighter {
                prop_assert!(fighter.pos.x >= half && fighter.pos.x <= width - half);
            }

            for boom in &state.explosions {
                prop_assert!(boom.alpha > 0.0 && boom.alpha <= 1.0);
                prop_assert!(boom.radius <= boom.max_radius);
            }

            if ended {
                prop_assert_eq!(state.lives, 0);
                prop_assert!(state.fighter.is_none());
                break;
            }
        }
    }
}
