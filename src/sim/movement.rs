//! Per-tick movement for the fighter, enemies and projectiles
//!
//! Speeds are in units per tick; the clock step is fixed so no dt scaling
//! happens here.

use glam::Vec2;

use super::state::{Enemy, Fighter, GameState, PlayField};
use crate::clamp_or_center;
use crate::tuning::{EnemyTuning, FighterTuning};

/// Move everything one tick, then drop what left the field
pub fn run(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    let target_x = state.fighter_target_x();
    if let Some(fighter) = state.fighter.as_mut() {
        follow_pointer(fighter, target_x, &state.field, &state.tuning.fighter);
    }

    let fighter_pos = state.fighter.as_ref().map(|f| f.pos);
    for enemy in &mut state.enemies {
        pursue(enemy, fighter_pos, &state.tuning.enemy);
    }

    for projectile in &mut state.projectiles {
        projectile.pos.y -= projectile.speed;
    }

    prune_out_of_bounds(state);
}

/// Damped pursuit of the pointer: cover a fixed fraction of the remaining
/// distance, hold still inside the dead zone, then clamp to the field.
pub fn follow_pointer(fighter: &mut Fighter, target_x: f32, field: &PlayField, t: &FighterTuning) {
    let delta = target_x - fighter.pos.x;
    if delta.abs() > t.dead_zone {
        fighter.pos.x += delta * t.follow_rate;
    }
    let half = fighter.size.x * 0.5;
    fighter.pos.x = clamp_or_center(fighter.pos.x, half, field.width() - half);
}

/// Pure pursuit of the fighter's current position. Horizontal closing is
/// damped, giving a diving arc. Very close to the target (or with no
/// fighter at all) the enemy just keeps descending.
pub fn pursue(enemy: &mut Enemy, target: Option<Vec2>, t: &EnemyTuning) {
    let Some(target) = target else {
        enemy.pos.y += enemy.speed;
        return;
    };

    let to_target = target - enemy.pos;
    let distance = to_target.length();
    if distance > t.close_range {
        let dir = to_target / distance;
        enemy.pos.x += dir.x * enemy.speed * t.horizontal_factor;
        enemy.pos.y += dir.y * enemy.speed;
    } else {
        enemy.pos.y += enemy.speed;
    }
}

/// Projectiles past the top edge and enemies past the bottom edge are gone
pub fn prune_out_of_bounds(state: &mut GameState) {
    state.projectiles.retain(|p| p.pos.y + p.size.y * 0.5 >= 0.0);

    let bottom = state.field.height();
    state.enemies.retain(|e| e.pos.y - e.size.y * 0.5 <= bottom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::Projectile;

    fn field() -> PlayField {
        PlayField::new(400.0, 600.0).unwrap()
    }

    fn enemy_at(x: f32, y: f32, speed: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size: Vec2::new(30.0, 30.0),
            speed,
            phase: 0.0,
        }
    }

    #[test]
    fn test_follow_pointer_moves_tenth_of_distance() {
        let tuning = Tuning::default();
        let mut fighter = Fighter::spawn(&field(), &tuning);
        assert_eq!(fighter.pos.x, 200.0);

        follow_pointer(&mut fighter, 300.0, &field(), &tuning.fighter);
        assert!((fighter.pos.x - 210.0).abs() < 1e-4);

        // Never overshoots
        for _ in 0..500 {
            follow_pointer(&mut fighter, 300.0, &field(), &tuning.fighter);
            assert!(fighter.pos.x <= 300.0);
        }
        // Settles inside the dead zone
        assert!((300.0 - fighter.pos.x) <= 3.0);
    }

    #[test]
    fn test_follow_pointer_dead_zone() {
        let tuning = Tuning::default();
        let mut fighter = Fighter::spawn(&field(), &tuning);
        follow_pointer(&mut fighter, 202.5, &field(), &tuning.fighter);
        assert_eq!(fighter.pos.x, 200.0);
    }

    #[test]
    fn test_follow_pointer_clamped_to_field() {
        let tuning = Tuning::default();
        let mut fighter = Fighter::spawn(&field(), &tuning);
        fighter.pos.x = 395.0;
        follow_pointer(&mut fighter, 5000.0, &field(), &tuning.fighter);
        assert_eq!(fighter.pos.x, 380.0);

        fighter.pos.x = 5.0;
        follow_pointer(&mut fighter, -5000.0, &field(), &tuning.fighter);
        assert_eq!(fighter.pos.x, 20.0);
    }

    #[test]
    fn test_pursue_damps_horizontal() {
        let t = EnemyTuning::default();
        // Target at a 3-4-5 offset
        let mut enemy = enemy_at(0.0, 0.0, 5.0);
        pursue(&mut enemy, Some(Vec2::new(30.0, 40.0)), &t);
        assert!((enemy.pos.x - 0.6 * 5.0 * 0.8).abs() < 1e-5);
        assert!((enemy.pos.y - 0.8 * 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_pursue_close_range_descends() {
        let t = EnemyTuning::default();
        let mut enemy = enemy_at(100.0, 100.0, 3.0);
        pursue(&mut enemy, Some(Vec2::new(102.0, 101.0)), &t);
        assert_eq!(enemy.pos, Vec2::new(100.0, 103.0));

        // Exactly on top of the target: no division by zero
        let mut enemy = enemy_at(100.0, 100.0, 3.0);
        pursue(&mut enemy, Some(Vec2::new(100.0, 100.0)), &t);
        assert!(enemy.pos.is_finite());
        assert_eq!(enemy.pos, Vec2::new(100.0, 103.0));
    }

    #[test]
    fn test_pursue_tracks_current_position() {
        let t = EnemyTuning::default();
        let mut enemy = enemy_at(200.0, 0.0, 4.0);
        pursue(&mut enemy, Some(Vec2::new(100.0, 0.0 + 1000.0)), &t);
        let first = enemy.pos;
        assert!(first.x < 200.0);
        // Target swaps sides; pursuit follows immediately
        pursue(&mut enemy, Some(Vec2::new(400.0, 1000.0)), &t);
        assert!(enemy.pos.x > first.x);
    }

    #[test]
    fn test_run_moves_projectiles_up_and_prunes() {
        let mut state = GameState::new(field(), Tuning::default());
        state.begin_run();
        state.projectiles.push(Projectile {
            pos: Vec2::new(100.0, 300.0),
            size: Vec2::new(4.0, 12.0),
            speed: 10.0,
            spawned_at_ms: 0,
        });
        state.projectiles.push(Projectile {
            pos: Vec2::new(100.0, 2.0),
            size: Vec2::new(4.0, 12.0),
            speed: 10.0,
            spawned_at_ms: 0,
        });
        state.enemies.push(enemy_at(200.0, 630.0, 4.0));

        run(&mut state);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(100.0, 290.0));
        // Below the field: climbs 4 toward the fighter but is still out
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_prune_enemy_past_bottom() {
        let mut state = GameState::new(field(), Tuning::default());
        state.enemies.push(enemy_at(200.0, 616.0, 4.0));
        state.enemies.push(enemy_at(200.0, 614.0, 4.0));
        prune_out_of_bounds(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos.y, 614.0);
    }
}
