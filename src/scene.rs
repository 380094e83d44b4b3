//! Backend-agnostic renderable state
//!
//! Turns the engine's geometry into a flat list of primitives in draw order:
//! sky, obstacle columns, ground, body, prompt panel. Hosts draw these with
//! whatever API they have (canvas, GPU, terminal); HUD text is left to the host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Engine, GapSource, Phase};

/// Colors for game elements (linear RGBA)
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.439, 0.773, 0.808, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.875, 0.976, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.180, 0.800, 0.443, 1.0];
    pub const GROUND: [f32; 4] = [0.871, 0.624, 0.263, 1.0];
    pub const GROUND_STRIPE: [f32; 4] = [0.776, 0.498, 0.165, 1.0];
    pub const BODY: [f32; 4] = [0.945, 0.769, 0.059, 1.0];
    /// Dim overlay behind Ready/GameOver prompts
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.75];
}

/// Horizontal speed used to turn vertical velocity into a nose-up/down angle
pub const TILT_REFERENCE_SPEED: f32 = 300.0;
/// Spacing of the ground stripes
pub const STRIPE_SPACING: f32 = 20.0;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// A drawable primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Vertical gradient fill
    Gradient {
        rect: Rect,
        top: [f32; 4],
        bottom: [f32; 4],
    },
    Rect {
        rect: Rect,
        color: [f32; 4],
    },
    /// Filled circle. `rotation` (radians) is the facing hosts may use for
    /// any decoration they draw on top
    Circle {
        center: Vec2,
        radius: f32,
        rotation: f32,
        color: [f32; 4],
    },
}

/// One frame's worth of drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub phase: Phase,
    pub score: u32,
    pub shapes: Vec<Shape>,
}

/// Body tilt in radians for a vertical velocity
#[inline]
pub fn tilt(vy: f32) -> f32 {
    vy.atan2(TILT_REFERENCE_SPEED)
}

/// Top and bottom column rectangles of an obstacle, clipped to the play area
pub fn obstacle_columns(x: f32, gap_y: f32, width: f32, gap_height: f32, ground_y: f32) -> [Rect; 2] {
    let bottom_y = gap_y + gap_height;
    [
        Rect::new(x, 0.0, width, gap_y),
        Rect::new(x, bottom_y, width, (ground_y - bottom_y).max(0.0)),
    ]
}

/// Build the draw list for the engine's current state
pub fn build<S: GapSource>(engine: &Engine<S>) -> Scene {
    let world = engine.world();
    let tuning = engine.tuning();
    let ground_y = engine.ground_y();

    let stripes = (world.width / STRIPE_SPACING).ceil().max(0.0) as usize;
    let mut shapes = Vec::with_capacity(4 + world.obstacles.len() * 2 + stripes);

    shapes.push(Shape::Gradient {
        rect: Rect::new(0.0, 0.0, world.width, world.height),
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });

    for obstacle in &world.obstacles {
        for rect in obstacle_columns(
            obstacle.x,
            obstacle.gap_y,
            tuning.obstacle_width,
            tuning.gap_height,
            ground_y,
        ) {
            shapes.push(Shape::Rect {
                rect,
                color: colors::OBSTACLE,
            });
        }
    }

    shapes.push(Shape::Rect {
        rect: Rect::new(0.0, ground_y, world.width, world.height - ground_y),
        color: colors::GROUND,
    });
    for i in 0..stripes {
        shapes.push(Shape::Rect {
            rect: Rect::new(i as f32 * STRIPE_SPACING, ground_y, STRIPE_SPACING / 2.0, 8.0),
            color: colors::GROUND_STRIPE,
        });
    }

    shapes.push(Shape::Circle {
        center: world.body.pos,
        radius: world.body.radius,
        rotation: tilt(world.body.vy),
        color: colors::BODY,
    });

    // Prompt panel; the game-over one is taller to fit the score line
    let panel_height = match world.phase {
        Phase::Ready => Some(100.0),
        Phase::GameOver => Some(130.0),
        Phase::Running => None,
    };
    if let Some(h) = panel_height {
        shapes.push(Shape::Rect {
            rect: Rect::new(world.width * 0.15, world.height * 0.3, world.width * 0.7, h),
            color: colors::OVERLAY,
        });
    }

    Scene {
        width: world.width,
        height: world.height,
        phase: world.phase,
        score: world.score,
        shapes,
    }
}
