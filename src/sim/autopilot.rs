//! Idle/demo controller
//!
//! Aims at the center of the next gap ahead of the body (mid-field when the
//! lane is empty) and flaps whenever the body has sunk below that line while
//! falling. Used by the headless runner and demo hosts.

use super::state::World;
use crate::tuning::Tuning;

/// How far below the target the body may sink before flapping
pub const FLAP_SLACK: f32 = 20.0;

/// Height the autopilot is steering toward
pub fn target_y(world: &World, tuning: &Tuning) -> f32 {
    let body_left = world.body.pos.x - world.body.radius;
    world
        .obstacles
        .iter()
        .find(|o| o.right_edge(tuning.obstacle_width) >= body_left)
        .map(|o| o.gap_y + tuning.gap_height / 2.0)
        .unwrap_or_else(|| tuning.ground_y(world.height) / 2.0)
}

/// Whether the autopilot wants an impulse this frame
pub fn wants_impulse(world: &World, tuning: &Tuning) -> bool {
    world.body.vy >= 0.0 && world.body.pos.y > target_y(world, tuning) + FLAP_SLACK
}
