//! Single simulation step
//!
//! Order inside a step is fixed:
//! 1. integrate the body (velocity, then position)
//! 2. boundaries: ceiling clamps, floor ends the run and skips everything below
//! 3. spawn timer and generator
//! 4. scroll and evict obstacles
//! 5. scoring
//! 6. obstacle collision (first hit ends the run)

use super::collision::{self, Bounds};
use super::spawn::{self, GapSource};
use super::state::{CrashCause, GameEvent, Phase, World};
use crate::tuning::Tuning;

/// Clamp a raw host delta into a usable step
#[inline]
pub fn clamp_step(dt: f32, max_step: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, max_step)
}

/// Advance the world by `dt` seconds. Does nothing unless running.
pub fn tick<S: GapSource + ?Sized>(world: &mut World, tuning: &Tuning, source: &mut S, dt: f32) {
    if world.phase != Phase::Running {
        return;
    }
    world.time_ticks += 1;

    world.body.integrate(tuning.gravity, dt);

    match collision::resolve_bounds(&mut world.body, tuning.ground_y(world.height)) {
        Bounds::Floor => {
            crash(world, CrashCause::Ground);
            return;
        }
        Bounds::Ceiling => log::trace!("Body clamped at ceiling"),
        Bounds::Clear => {}
    }

    spawn::update_spawner(world, tuning, source, dt);
    spawn::scroll_obstacles(world, tuning, dt);

    score_passed(world, tuning);

    if let Some(index) = collision::first_obstacle_hit(&world.body, &world.obstacles, tuning) {
        log::debug!("Body hit obstacle #{} of {}", index, world.obstacles.len());
        crash(world, CrashCause::Obstacle);
    }
}

/// Mark obstacles whose center moved behind the body and bump the score.
/// Returns the number newly scored.
pub fn score_passed(world: &mut World, tuning: &Tuning) -> u32 {
    let body_x = world.body.pos.x;
    let mut gained = 0;
    for obstacle in world.obstacles.iter_mut() {
        if !obstacle.passed && obstacle.center_x(tuning.obstacle_width) < body_x {
            obstacle.passed = true;
            gained += 1;
        }
    }
    for _ in 0..gained {
        world.score += 1;
        let score = world.score;
        world.emit(GameEvent::Scored { score });
    }
    if gained > 0 {
        log::debug!("Score {}", world.score);
    }
    gained
}

fn crash(world: &mut World, cause: CrashCause) {
    world.phase = Phase::GameOver;
    world.emit(GameEvent::Crashed {
        cause,
        score: world.score,
    });
    log::info!(
        "Run {} over ({:?}) with score {} after {} ticks",
        world.run,
        cause,
        world.score,
        world.time_ticks
    );
}
