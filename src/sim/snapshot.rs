//! Read-only view of a session for the renderer
//!
//! Borrows the live arenas instead of copying them; the borrow checker keeps
//! the renderer from mutating anything while it draws.

use serde::Serialize;

use super::state::{Enemy, Explosion, Fighter, GameState, PlayField, Projectile, SessionStatus};

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<'a> {
    pub field: PlayField,
    pub status: SessionStatus,
    pub fighter: Option<&'a Fighter>,
    pub projectiles: &'a [Projectile],
    pub enemies: &'a [Enemy],
    pub explosions: &'a [Explosion],
    pub score: u64,
    pub lives: u8,
    pub elapsed_ms: u64,
}

impl<'a> Snapshot<'a> {
    pub fn of(state: &'a GameState) -> Self {
        Self {
            field: state.field,
            status: state.status,
            fighter: state.fighter.as_ref(),
            projectiles: &state.projectiles,
            enemies: &state.enemies,
            explosions: &state.explosions,
            score: state.score,
            lives: state.lives,
            elapsed_ms: state.clock.elapsed_ms(),
        }
    }

    /// Whole seconds survived so far
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(PlayField::new(400.0, 600.0).unwrap(), Tuning::default());
        state.begin_run();
        state.score = 20;
        let snap = Snapshot::of(&state);
        assert_eq!(snap.status, SessionStatus::Running);
        assert_eq!(snap.score, 20);
        assert_eq!(snap.lives, 3);
        assert!(snap.fighter.is_some());
        assert!(snap.enemies.is_empty());

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"elapsedMs\":0"));
        assert!(json.contains("\"status\":\"Running\""));
    }
}
