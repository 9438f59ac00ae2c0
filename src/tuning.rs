//! Data-driven game balance
//!
//! Every gameplay number lives here so a page can override it with a JSON
//! blob without rebuilding. Missing sections and fields fall back to the
//! defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::consts::*;

/// Fighter geometry and pointer-follow behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterTuning {
    pub width: f32,
    pub height: f32,
    pub bottom_offset: f32,
    pub follow_rate: f32,
    pub dead_zone: f32,
    /// Speed cap carried on the fighter; pointer pursuit is rate-based
    pub speed: f32,
}

impl Default for FighterTuning {
    fn default() -> Self {
        Self {
            width: FIGHTER_WIDTH,
            height: FIGHTER_HEIGHT,
            bottom_offset: FIGHTER_BOTTOM_OFFSET,
            follow_rate: FIGHTER_FOLLOW_RATE,
            dead_zone: FIGHTER_DEAD_ZONE,
            speed: FIGHTER_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub interval_ms: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
            interval_ms: PROJECTILE_INTERVAL_MS,
        }
    }
}

/// Enemy geometry, spawn cadence and the difficulty ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub base_interval_ms: f64,
    pub min_interval_ms: f64,
    pub interval_ramp_divisor: f64,
    pub speed_min: f32,
    pub speed_max: f32,
    pub speed_ramp_divisor: f64,
    pub speed_ramp_cap: f32,
    pub horizontal_factor: f32,
    pub close_range: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: ENEMY_WIDTH,
            height: ENEMY_HEIGHT,
            base_interval_ms: ENEMY_BASE_INTERVAL_MS,
            min_interval_ms: ENEMY_MIN_INTERVAL_MS,
            interval_ramp_divisor: ENEMY_INTERVAL_RAMP_DIVISOR,
            speed_min: ENEMY_SPEED_MIN,
            speed_max: ENEMY_SPEED_MAX,
            speed_ramp_divisor: ENEMY_SPEED_RAMP_DIVISOR,
            speed_ramp_cap: ENEMY_SPEED_RAMP_CAP,
            horizontal_factor: ENEMY_HORIZONTAL_FACTOR,
            close_range: ENEMY_CLOSE_RANGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionTuning {
    pub growth: f32,
    pub alpha_decay: f32,
    pub kill_max_radius: f32,
    pub impact_max_radius: f32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            growth: EXPLOSION_GROWTH,
            alpha_decay: EXPLOSION_ALPHA_DECAY,
            kill_max_radius: KILL_EXPLOSION_RADIUS,
            impact_max_radius: IMPACT_EXPLOSION_RADIUS,
        }
    }
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub tick_ms: u64,
    pub initial_lives: u8,
    pub score_per_kill: u64,
    pub fighter: FighterTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub explosion: ExplosionTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            initial_lives: INITIAL_LIVES,
            score_per_kill: SCORE_PER_KILL,
            fighter: FighterTuning::default(),
            projectile: ProjectileTuning::default(),
            enemy: EnemyTuning::default(),
            explosion: ExplosionTuning::default(),
        }
    }
}

fn positive<T: PartialOrd + Default + std::fmt::Display>(
    field: &'static str,
    value: T,
) -> Result<(), GameError> {
    if value > T::default() {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), GameError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GameError::InvalidTuning {
            field,
            reason: format!("must be in (0, 1], got {value}"),
        })
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall spawning or produce NaN positions
    pub fn validate(&self) -> Result<(), GameError> {
        positive("tick_ms", self.tick_ms)?;
        positive("initial_lives", self.initial_lives)?;

        let f = &self.fighter;
        positive("fighter.width", f.width)?;
        positive("fighter.height", f.height)?;
        unit_interval("fighter.follow_rate", f.follow_rate)?;
        if f.dead_zone < 0.0 || !f.dead_zone.is_finite() {
            return Err(GameError::InvalidTuning {
                field: "fighter.dead_zone",
                reason: format!("must be finite and non-negative, got {}", f.dead_zone),
            });
        }

        let p = &self.projectile;
        positive("projectile.width", p.width)?;
        positive("projectile.height", p.height)?;
        positive("projectile.speed", p.speed)?;
        positive("projectile.interval_ms", p.interval_ms)?;

        let e = &self.enemy;
        positive("enemy.width", e.width)?;
        positive("enemy.height", e.height)?;
        positive("enemy.min_interval_ms", e.min_interval_ms)?;
        positive("enemy.interval_ramp_divisor", e.interval_ramp_divisor)?;
        positive("enemy.speed_min", e.speed_min)?;
        positive("enemy.speed_ramp_divisor", e.speed_ramp_divisor)?;
        if e.speed_min >= e.speed_max {
            return Err(GameError::InvalidTuning {
                field: "enemy.speed_max",
                reason: format!("must exceed speed_min ({})", e.speed_min),
            });
        }
        if e.min_interval_ms > e.base_interval_ms {
            return Err(GameError::InvalidTuning {
                field: "enemy.base_interval_ms",
                reason: format!("must be at least min_interval_ms ({})", e.min_interval_ms),
            });
        }
        if e.speed_ramp_cap < 0.0 {
            return Err(GameError::InvalidTuning {
                field: "enemy.speed_ramp_cap",
                reason: "must not be negative".into(),
            });
        }

        let x = &self.explosion;
        positive("explosion.growth", x.growth)?;
        unit_interval("explosion.alpha_decay", x.alpha_decay)?;
        positive("explosion.kill_max_radius", x.kill_max_radius)?;
        positive("explosion.impact_max_radius", x.impact_max_radius)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5, "enemy": { "speed_max": 6.0 } }"#)
            .expect("valid override");
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.enemy.speed_max, 6.0);
        // Untouched fields keep their defaults
        assert_eq!(tuning.enemy.speed_min, ENEMY_SPEED_MIN);
        assert_eq!(tuning.projectile, ProjectileTuning::default());
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let err = Tuning::from_json(r#"{ "enemy": { "speed_min": 5.0, "speed_max": 4.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning { field: "enemy.speed_max", .. }));
    }

    #[test]
    fn test_rejects_zero_follow_rate() {
        let mut tuning = Tuning::default();
        tuning.fighter.follow_rate = 0.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::TuningParse(_)));
    }
}
