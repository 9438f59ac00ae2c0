//! Collision resolution
//!
//! Two passes per tick: projectiles against enemies, then enemies against
//! the fighter. Hits are marked first and the arenas compacted afterwards,
//! so no index shifts while pairs are still being tested. An entity that
//! has been marked never takes part in another pair that tick.

use super::state::{Explosion, ExplosionKind, GameEvent, GameState};

/// What the collision pass did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub fighter_hits: u32,
}

/// Resolve both passes and apply score, lives and explosion side effects
pub fn run(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    if !state.is_running() {
        return report;
    }

    let mut dead_projectiles = vec![false; state.projectiles.len()];
    let mut dead_enemies = vec![false; state.enemies.len()];

    // Projectile vs enemy: first match wins, one kill per projectile
    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let shot = projectile.bounds();
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !dead_enemies[*ei] && shot.overlaps(&enemy.bounds()));

        if let Some((ei, enemy)) = hit {
            dead_projectiles[pi] = true;
            dead_enemies[ei] = true;
            state
                .explosions
                .push(Explosion::new(enemy.pos, ExplosionKind::Kill, &state.tuning));
            state.score += state.tuning.score_per_kill;
            state.events.push(GameEvent::EnemyDestroyed { pos: enemy.pos });
            report.enemies_shot += 1;
        }
    }

    // Enemy vs fighter
    if let Some(fighter) = state.fighter.as_ref() {
        let hull = fighter.bounds();
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if dead_enemies[ei] || !hull.overlaps(&enemy.bounds()) {
                continue;
            }
            dead_enemies[ei] = true;
            state
                .explosions
                .push(Explosion::new(enemy.pos, ExplosionKind::Impact, &state.tuning));
            state.lives = state.lives.saturating_sub(1);
            state.events.push(GameEvent::FighterHit {
                pos: enemy.pos,
                lives_left: state.lives,
            });
            report.fighter_hits += 1;
        }
    }

    compact(&mut state.projectiles, &dead_projectiles);
    compact(&mut state.enemies, &dead_enemies);

    if report.fighter_hits > 0 {
        log::info!("Fighter hit {}x, {} lives left", report.fighter_hits, state.lives);
    }
    report
}

/// Keep the items whose flag is false, preserving order
fn compact<T>(items: &mut Vec<T>, dead: &[bool]) {
    debug_assert_eq!(items.len(), dead.len());
    let mut flags = dead.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
