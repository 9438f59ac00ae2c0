//! Time-gated spawning of projectiles and enemies
//!
//! Cadence is measured on the simulated clock. Enemies arrive more often
//! and faster as the session goes on, both ramps bounded.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameState, Projectile};
use crate::tuning::EnemyTuning;

/// Milliseconds between enemy spawns at `elapsed_ms` into the session.
/// Starts at the base interval and shrinks linearly to the floor.
pub fn enemy_spawn_interval(tuning: &EnemyTuning, elapsed_ms: u64) -> f64 {
    let ramped = tuning.base_interval_ms - elapsed_ms as f64 / tuning.interval_ramp_divisor;
    ramped.max(tuning.min_interval_ms)
}

/// Extra enemy speed earned by surviving, capped
pub fn enemy_speed_ramp(tuning: &EnemyTuning, elapsed_ms: u64) -> f32 {
    ((elapsed_ms as f64 / tuning.speed_ramp_divisor) as f32).min(tuning.speed_ramp_cap)
}

/// Run both spawners for this tick
pub fn run(state: &mut GameState, rng: &mut impl Rng) {
    if !state.is_running() {
        return;
    }
    spawn_projectile(state);
    spawn_enemy(state, rng);
}

/// Fire from the fighter's nose once the projectile interval has passed.
/// Returns true if a projectile was emitted.
pub fn spawn_projectile(state: &mut GameState) -> bool {
    let now = state.clock.elapsed_ms();
    let since = now.saturating_sub(state.spawn_timers.last_projectile_ms) as f64;
    if since < state.tuning.projectile.interval_ms {
        return false;
    }
    let Some(fighter) = state.fighter.as_ref() else {
        return false;
    };

    let t = &state.tuning.projectile;
    let size = Vec2::new(t.width, t.height);
    let pos = Vec2::new(
        fighter.pos.x,
        fighter.pos.y - fighter.size.y * 0.5 - size.y * 0.5,
    );
    state.projectiles.push(Projectile {
        pos,
        size,
        speed: t.speed,
        spawned_at_ms: now,
    });
    state.spawn_timers.last_projectile_ms = now;
    true
}

/// Drop a new enemy just above the top edge once the (ramping) enemy
/// interval has passed. Returns true if an enemy was emitted.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) -> bool {
    let now = state.clock.elapsed_ms();
    let t = &state.tuning.enemy;
    let since = now.saturating_sub(state.spawn_timers.last_enemy_ms) as f64;
    if since < enemy_spawn_interval(t, now) {
        return false;
    }

    let size = Vec2::new(t.width, t.height);
    let half_w = size.x * 0.5;
    let max_x = state.field.width() - half_w;
    let x = if max_x > half_w {
        rng.random_range(half_w..max_x)
    } else {
        state.field.center_x()
    };
    let speed = rng.random_range(t.speed_min..t.speed_max) + enemy_speed_ramp(t, now);
    let phase = rng.random_range(0.0..std::f32::consts::TAU);

    state.enemies.push(Enemy {
        pos: Vec2::new(x, -size.y * 0.5),
        size,
        speed,
        phase,
    });
    state.spawn_timers.last_enemy_ms = now;
    log::debug!("Enemy spawned at x={x:.1} speed={speed:.2} ({} live)", state.enemies.len());
    true
}
