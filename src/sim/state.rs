//! Game state and core simulation types
//!
//! Entities are plain data records kept in `Vec` arenas owned by
//! [`GameState`]. Every system receives the state explicitly; nothing here
//! is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::tuning::Tuning;
use crate::{Aabb, GameError, clamp_or_center};

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for a start request
    Idle,
    /// Ticks are being simulated
    Running,
    /// Terminal; only a restart leaves this state
    Ended,
}

/// Drawable play-field size, in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayField {
    width: f32,
    height: f32,
}

impl PlayField {
    /// Dimensions must be finite and positive; anything else would feed NaN
    /// into every position computed from the field.
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(GameError::InvalidPlayField { width, height })
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fighter {
    pub pos: Vec2,
    pub size: Vec2,
    /// Movement speed cap (pointer pursuit is rate-based and ignores it)
    pub speed: f32,
}

impl Fighter {
    /// Fighter at the horizontal center, anchored near the bottom edge
    pub fn spawn(field: &PlayField, tuning: &Tuning) -> Self {
        let mut fighter = Self {
            pos: Vec2::new(field.center_x(), 0.0),
            size: Vec2::new(tuning.fighter.width, tuning.fighter.height),
            speed: tuning.fighter.speed,
        };
        fighter.fit_to(field, tuning);
        fighter
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Re-anchor vertically and clamp horizontally to the field
    pub fn fit_to(&mut self, field: &PlayField, tuning: &Tuning) {
        self.pos.y = field.height() - tuning.fighter.bottom_offset;
        let half = self.size.x * 0.5;
        self.pos.x = clamp_or_center(self.pos.x, half, field.width() - half);
    }
}

/// A shot fired straight up from the fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub size: Vec2,
    /// Upward speed, units per tick
    pub speed: f32,
    /// Simulated time of creation
    pub spawned_at_ms: u64,
}

impl Projectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick
    pub speed: f32,
    /// Wobble phase for rendering; movement never reads it
    pub phase: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// What caused an explosion (drives its color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    /// Enemy shot down by a projectile
    Kill,
    /// Enemy rammed the fighter
    Impact,
}

/// Expanding, fading explosion marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    /// 0-1, decreases every tick; removed once faded
    pub alpha: f32,
    pub kind: ExplosionKind,
}

impl Explosion {
    pub fn new(pos: Vec2, kind: ExplosionKind, tuning: &Tuning) -> Self {
        let max_radius = match kind {
            ExplosionKind::Kill => tuning.explosion.kill_max_radius,
            ExplosionKind::Impact => tuning.explosion.impact_max_radius,
        };
        Self {
            pos,
            radius: 0.0,
            max_radius,
            alpha: 1.0,
            kind,
        }
    }
}

/// Final numbers reported when a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub final_score: u64,
    pub survived_seconds: u64,
}

/// Things that happened during a tick, for collaborators outside the sim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile destroyed an enemy
    EnemyDestroyed { pos: Vec2 },
    /// An enemy hit the fighter; hosts show a screen flash
    FighterHit { pos: Vec2, lives_left: u8 },
    /// The session ended
    GameOver(SessionSummary),
}

/// Simulated time of the last spawn per entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimers {
    pub last_projectile_ms: u64,
    pub last_enemy_ms: u64,
}

/// Complete session context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub field: PlayField,
    pub status: SessionStatus,
    pub clock: Clock,
    pub score: u64,
    pub lives: u8,
    /// Latest pointer x (last write wins); `None` until the first update
    pub pointer_x: Option<f32>,
    /// Present exactly while Running
    pub fighter: Option<Fighter>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub explosions: Vec<Explosion>,
    pub spawn_timers: SpawnTimers,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle state for the given field
    pub fn new(field: PlayField, tuning: Tuning) -> Self {
        Self {
            clock: Clock::new(tuning.tick_ms),
            lives: tuning.initial_lives,
            tuning,
            field,
            status: SessionStatus::Idle,
            score: 0,
            pointer_x: None,
            fighter: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            spawn_timers: SpawnTimers::default(),
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    /// Clear the run and go back to Idle. Field, tuning and the last pointer
    /// position are kept.
    pub fn reset(&mut self) {
        self.status = SessionStatus::Idle;
        self.clock.reset();
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.fighter = None;
        self.projectiles.clear();
        self.enemies.clear();
        self.explosions.clear();
        self.spawn_timers = SpawnTimers::default();
        self.events.clear();
    }

    /// Fresh run: reset, place the fighter, enter Running
    pub fn begin_run(&mut self) {
        self.reset();
        self.fighter = Some(Fighter::spawn(&self.field, &self.tuning));
        self.status = SessionStatus::Running;
    }

    /// Enter Ended and report the summary. Returns `None` when not Running,
    /// so a run can only be finished once.
    pub fn finish(&mut self) -> Option<SessionSummary> {
        if !self.is_running() {
            return None;
        }
        self.status = SessionStatus::Ended;
        self.fighter = None;
        let summary = self.summary();
        self.events.push(GameEvent::GameOver(summary));
        Some(summary)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            final_score: self.score,
            survived_seconds: self.clock.elapsed_secs(),
        }
    }

    /// Swap in new field dimensions and refit the fighter
    pub fn resize(&mut self, field: PlayField) {
        self.field = field;
        if let Some(fighter) = self.fighter.as_mut() {
            fighter.fit_to(&self.field, &self.tuning);
        }
    }

    /// Where the fighter is steering: latest pointer, else field center
    pub fn fighter_target_x(&self) -> f32 {
        self.pointer_x.unwrap_or_else(|| self.field.center_x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> PlayField {
        PlayField::new(400.0, 600.0).unwrap()
    }

    #[test]
    fn test_play_field_rejects_bad_dimensions() {
        assert!(PlayField::new(0.0, 100.0).is_err());
        assert!(PlayField::new(100.0, -1.0).is_err());
        assert!(PlayField::new(f32::NAN, 100.0).is_err());
        assert!(PlayField::new(f32::INFINITY, 100.0).is_err());
    }

    #[test]
    fn test_new_state_is_idle_without_fighter() {
        let state = GameState::new(field(), Tuning::default());
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(state.fighter.is_none());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_begin_run_places_fighter() {
        let mut state = GameState::new(field(), Tuning::default());
        state.begin_run();
        assert!(state.is_running());
        let fighter = state.fighter.as_ref().unwrap();
        assert_eq!(fighter.pos, Vec2::new(200.0, 520.0));
    }

    #[test]
    fn test_finish_only_once() {
        let mut state = GameState::new(field(), Tuning::default());
        state.begin_run();
        state.score = 40;
        for _ in 0..70 {
            state.clock.advance();
        }
        let summary = state.finish().unwrap();
        assert_eq!(summary.final_score, 40);
        assert_eq!(summary.survived_seconds, 1);
        assert!(state.fighter.is_none());
        assert!(state.finish().is_none());
        assert_eq!(
            state.events.iter().filter(|e| matches!(e, GameEvent::GameOver(_))).count(),
            1
        );
    }

    #[test]
    fn test_resize_refits_fighter() {
        let mut state = GameState::new(field(), Tuning::default());
        state.begin_run();
        state.fighter.as_mut().unwrap().pos.x = 390.0;
        state.resize(PlayField::new(200.0, 300.0).unwrap());
        let fighter = state.fighter.as_ref().unwrap();
        assert_eq!(fighter.pos.x, 180.0);
        assert_eq!(fighter.pos.y, 220.0);
    }

    #[test]
    fn test_fighter_in_field_narrower_than_ship() {
        let tuning = Tuning::default();
        let narrow = PlayField::new(20.0, 300.0).unwrap();
        let fighter = Fighter::spawn(&narrow, &tuning);
        assert_eq!(fighter.pos.x, 10.0);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = SessionSummary {
            final_score: 30,
            survived_seconds: 12,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"finalScore":30,"survivedSeconds":12}"#);
    }
}
