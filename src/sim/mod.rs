//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed simulated timestep only
//! - All mutable state owned by one `GameState` per session
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod effects;
pub mod movement;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::CollisionReport;
pub use session::{FrameTicket, RestartMode, Session, TickStatus};
pub use snapshot::Snapshot;
pub use spawn::{enemy_speed_ramp, enemy_spawn_interval};
pub use state::{
    Enemy, Explosion, ExplosionKind, Fighter, GameEvent, GameState, PlayField, Projectile,
    SessionStatus, SessionSummary, SpawnTimers,
};
pub use tick::{TickInput, tick};
