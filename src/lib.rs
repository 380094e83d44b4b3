//! Flappy Engine - host-driven simulation core for a flap-through-the-gaps game
//!
//! Core modules:
//! - `sim`: Simulation (phase machine, physics, obstacle generator, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `input`: Host key/pointer mapping onto engine controls
//! - `scene`: Backend-agnostic renderable state
//! - `submission`: Eligibility rules for handing a finished run to a leaderboard
//! - `platform`: Browser bindings (frame loop ownership) and a fixed frame clock

pub mod input;
pub mod platform;
pub mod scene;
pub mod sim;
pub mod submission;
pub mod tuning;

pub use sim::{Body, Engine, GameEvent, Obstacle, Phase, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (design values, used as `Tuning` defaults)
pub mod consts {
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Velocity set by an impulse (pixels/s, negative = up)
    pub const IMPULSE_VELOCITY: f32 = -500.0;
    /// Largest step the integrator will take, whatever the host clock says
    pub const MAX_STEP: f32 = 0.033;

    /// Body defaults
    pub const BODY_RADIUS: f32 = 14.0;
    /// Start pose as a fraction of the play field
    pub const BODY_X_RATIO: f32 = 0.28;
    pub const BODY_Y_RATIO: f32 = 0.45;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_SPEED: f32 = 180.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    /// Minimum distance between a gap and the ceiling/ground line
    pub const GAP_MARGIN: f32 = 50.0;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 1.4;

    /// Height of the ground strip at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 80.0;
}
