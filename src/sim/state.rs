//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`World`]; the engine wraps it with
//! the tick clock, tuning and gap source.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Frozen at the start pose, waiting for the first start/impulse
    Ready,
    /// Physics, generation and collisions active
    Running,
    /// Run ended; pose and score frozen at the moment of the crash
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Body bottom crossed the ground line
    Ground,
    /// Body overlapped an obstacle column
    Obstacle,
}

/// Events produced by control calls and ticks, drained by the host (sound, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { run: u32 },
    Impulse,
    Spawned { gap_y: f32 },
    Scored { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    Restarted { run: u32 },
}

/// Pending events kept when the host never drains
pub const MAX_PENDING_EVENTS: usize = 64;

/// The player-controlled falling body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center position (x is fixed for the whole run)
    pub pos: Vec2,
    /// Vertical velocity, positive = downward
    pub vy: f32,
    /// Collision radius
    pub radius: f32,
}

impl Body {
    /// Canonical start pose for a field
    pub fn at_start(width: f32, height: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(width * tuning.body_x_ratio, height * tuning.body_y_ratio),
            vy: 0.0,
            radius: tuning.body_radius,
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vy += gravity * dt;
        self.pos.y += self.vy * dt;
    }

    /// Impulses override the velocity, they never stack
    pub fn apply_impulse(&mut self, velocity: f32) {
        self.vy = velocity;
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// A scrolling column with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the gap
    pub gap_y: f32,
    /// Set once the obstacle center moved behind the body (scored)
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    #[inline]
    pub fn center_x(&self, width: f32) -> f32 {
        self.x + width / 2.0
    }

    #[inline]
    pub fn right_edge(&self, width: f32) -> f32 {
        self.x + width
    }

    #[inline]
    pub fn gap_bottom(&self, gap_height: f32) -> f32 {
        self.gap_y + gap_height
    }
}

/// Read-only HUD view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
}

/// Final result of a run, available once the run is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedRun {
    /// Run counter, bumped on every reset
    pub run: u32,
    pub score: u32,
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Play field size in pixels
    pub width: f32,
    pub height: f32,
    pub phase: Phase,
    pub body: Body,
    /// Oldest first; spawn pushes back, eviction pops front
    pub obstacles: VecDeque<Obstacle>,
    pub score: u32,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Ticks simulated in this run
    pub time_ticks: u64,
    /// Run counter
    pub run: u32,
    /// Pending events (not gameplay-affecting)
    #[serde(skip)]
    pub events: VecDeque<GameEvent>,
}

impl World {
    /// Fresh Ready state for the given run number
    pub fn new(width: f32, height: f32, tuning: &Tuning, run: u32) -> Self {
        Self {
            width,
            height,
            phase: Phase::Ready,
            body: Body::at_start(width, height, tuning),
            obstacles: VecDeque::new(),
            score: 0,
            spawn_timer: 0.0,
            time_ticks: 0,
            run,
            events: VecDeque::new(),
        }
    }

    /// Queue an event, dropping the oldest when the host is not draining
    pub fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_pose() {
        let tuning = Tuning::default();
        let world = World::new(400.0, 600.0, &tuning, 0);
        assert_eq!(world.phase, Phase::Ready);
        assert!((world.body.pos.x - 112.0).abs() < 1e-4);
        assert!((world.body.pos.y - 270.0).abs() < 1e-4);
        assert_eq!(world.body.vy, 0.0);
        assert_eq!(world.body.radius, 14.0);
        assert!(world.obstacles.is_empty());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_integrate_velocity_before_position() {
        let mut body = Body {
            pos: Vec2::new(0.0, 100.0),
            vy: 0.0,
            radius: 10.0,
        };
        body.integrate(1000.0, 0.1);
        // vy = 100, y += 100 * 0.1
        assert!((body.vy - 100.0).abs() < 1e-4);
        assert!((body.pos.y - 110.0).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_overrides() {
        let mut body = Body {
            pos: Vec2::ZERO,
            vy: 321.0,
            radius: 10.0,
        };
        body.apply_impulse(-500.0);
        body.apply_impulse(-500.0);
        assert_eq!(body.vy, -500.0);
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let tuning = Tuning::default();
        let mut world = World::new(400.0, 600.0, &tuning, 0);
        for score in 0..(MAX_PENDING_EVENTS as u32 + 10) {
            world.emit(GameEvent::Scored { score });
        }
        assert_eq!(world.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(world.events.front(), Some(&GameEvent::Scored { score: 10 }));
        assert_eq!(
            world.events.back(),
            Some(&GameEvent::Scored {
                score: MAX_PENDING_EVENTS as u32 + 9
            })
        );
    }

    #[test]
    fn test_obstacle_edges() {
        let o = Obstacle::new(100.0, 200.0);
        assert_eq!(o.center_x(70.0), 135.0);
        assert_eq!(o.right_edge(70.0), 170.0);
        assert_eq!(o.gap_bottom(150.0), 350.0);
        assert!(!o.passed);
    }
}
