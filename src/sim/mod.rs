//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same gap source and the same
//! sequence of control calls and timestamps, two engines walk through identical
//! states:
//! - Host-supplied time only, clamped per step
//! - Injectable gap source (seeded RNG by default)
//! - Obstacles kept oldest-first
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Bounds, body_hits_obstacle, resolve_bounds};
pub use engine::Engine;
pub use spawn::{FixedGap, GapSequence, GapSource, RngGaps};
pub use state::{
    Body, CrashCause, FinishedRun, GameEvent, Obstacle, Phase, Snapshot, World,
    MAX_PENDING_EVENTS,
};
pub use tick::{clamp_step, tick};
