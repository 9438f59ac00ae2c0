//! Explosion decay

use super::state::{Explosion, GameState};
use crate::consts::ALPHA_EPSILON;
use crate::tuning::ExplosionTuning;

/// Grow and fade every explosion, dropping the ones that have faded out.
pub fn run(state: &mut GameState) {
    let t = &state.tuning.explosion;
    for explosion in &mut state.explosions {
        advance(explosion, t);
    }
    state.explosions.retain(|e| e.alpha > ALPHA_EPSILON);
}

/// One tick of growth (up to the max radius) and fade
pub fn advance(explosion: &mut Explosion, t: &ExplosionTuning) {
    explosion.radius = (explosion.radius + t.growth).min(explosion.max_radius);
    explosion.alpha = (explosion.alpha - t.alpha_decay).max(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::{ExplosionKind, PlayField};
    use glam::Vec2;

    #[test]
    fn test_explosion_fades_in_twenty_ticks() {
        let tuning = Tuning::default();
        let mut state = GameState::new(PlayField::new(400.0, 600.0).unwrap(), tuning.clone());
        state
            .explosions
            .push(Explosion::new(Vec2::new(50.0, 50.0), ExplosionKind::Kill, &tuning));

        for tick in 1..=19 {
            run(&mut state);
            assert_eq!(state.explosions.len(), 1, "gone too early at tick {tick}");
            let e = &state.explosions[0];
            assert!(e.alpha > 0.0 && e.alpha <= 1.0);
        }
        run(&mut state);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_radius_grows_to_max() {
        let t = ExplosionTuning::default();
        let tuning = Tuning::default();
        let mut kill = Explosion::new(Vec2::ZERO, ExplosionKind::Kill, &tuning);
        let mut impact = Explosion::new(Vec2::ZERO, ExplosionKind::Impact, &tuning);

        let mut last = 0.0;
        for _ in 0..20 {
            advance(&mut kill, &t);
            advance(&mut impact, &t);
            assert!(kill.radius >= last);
            last = kill.radius;
        }
        assert_eq!(kill.radius, 30.0);
        assert_eq!(impact.radius, 40.0);
    }
}
