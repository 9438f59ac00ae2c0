//! Idle Shooter - a pointer-driven arcade shooter for the browser
//!
//! Core modules:
//! - `sim`: Per-frame simulation (spawning, movement, collisions, effects, session)
//! - `renderer`: Snapshot to draw-list translation for a 2D canvas
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulated time per tick, in milliseconds (~60 Hz)
    pub const TICK_MS: u64 = 16;

    /// Session defaults
    pub const INITIAL_LIVES: u8 = 3;
    pub const SCORE_PER_KILL: u64 = 10;

    /// Fighter defaults
    pub const FIGHTER_WIDTH: f32 = 40.0;
    pub const FIGHTER_HEIGHT: f32 = 40.0;
    /// Distance from the bottom edge of the field to the fighter center
    pub const FIGHTER_BOTTOM_OFFSET: f32 = 80.0;
    /// Fraction of the remaining distance covered per tick
    pub const FIGHTER_FOLLOW_RATE: f32 = 0.1;
    /// Below this distance the fighter holds still
    pub const FIGHTER_DEAD_ZONE: f32 = 3.0;
    pub const FIGHTER_SPEED: f32 = 8.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_INTERVAL_MS: f64 = 100.0;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 30.0;
    pub const ENEMY_HEIGHT: f32 = 30.0;
    pub const ENEMY_BASE_INTERVAL_MS: f64 = 2000.0;
    pub const ENEMY_MIN_INTERVAL_MS: f64 = 500.0;
    /// Spawn interval shrinks by elapsed / this
    pub const ENEMY_INTERVAL_RAMP_DIVISOR: f64 = 30.0;
    pub const ENEMY_SPEED_MIN: f32 = 2.0;
    pub const ENEMY_SPEED_MAX: f32 = 4.0;
    /// Speed ramp is elapsed / this, capped at ENEMY_SPEED_RAMP_CAP
    pub const ENEMY_SPEED_RAMP_DIVISOR: f64 = 10_000.0;
    pub const ENEMY_SPEED_RAMP_CAP: f32 = 3.0;
    /// Horizontal pursuit is slower than vertical (diving arc)
    pub const ENEMY_HORIZONTAL_FACTOR: f32 = 0.8;
    /// Inside this range enemies stop steering and just descend
    pub const ENEMY_CLOSE_RANGE: f32 = 5.0;

    /// Explosion defaults
    pub const EXPLOSION_GROWTH: f32 = 2.0;
    pub const EXPLOSION_ALPHA_DECAY: f32 = 0.05;
    pub const KILL_EXPLOSION_RADIUS: f32 = 30.0;
    pub const IMPACT_EXPLOSION_RADIUS: f32 = 40.0;
    /// Alpha at or below this counts as fully faded (absorbs f32 drift)
    pub const ALPHA_EPSILON: f32 = 1e-4;
}

/// Axis-aligned rectangle described by its center and full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Center-distance overlap test against the sum of half extents.
    /// Touching edges do not count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = (self.size + other.size) * 0.5;
        d.x < reach.x && d.y < reach.y
    }
}

/// Clamp `value` into `[min, max]`, falling back to the midpoint when the
/// range is inverted (field narrower than the entity).
#[inline]
pub fn clamp_or_center(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}
