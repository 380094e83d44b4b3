//! Collision detection against the field boundaries and obstacle columns
//!
//! The body is tested as its axis-aligned extent (center ± radius). Columns are
//! the two forbidden bands above and below an obstacle's gap.

use super::state::{Body, Obstacle};
use crate::tuning::Tuning;

/// Result of the boundary check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    /// Inside the field
    Clear,
    /// Hit the ceiling; clamped and stopped, not fatal
    Ceiling,
    /// Reached the ground line; clamped, always fatal
    Floor,
}

/// Clamp the body to the field and report which boundary (if any) it touched.
///
/// The floor is checked first so a body that somehow spans both reports the
/// fatal result.
pub fn resolve_bounds(body: &mut Body, ground_y: f32) -> Bounds {
    if body.bottom() > ground_y {
        body.pos.y = ground_y - body.radius;
        return Bounds::Floor;
    }
    if body.top() < 0.0 {
        body.pos.y = body.radius;
        body.vy = 0.0;
        return Bounds::Ceiling;
    }
    Bounds::Clear
}

/// Whether the body's horizontal extent overlaps the column
#[inline]
pub fn overlaps_column(body: &Body, obstacle: &Obstacle, width: f32) -> bool {
    body.pos.x + body.radius > obstacle.x && body.pos.x - body.radius < obstacle.right_edge(width)
}

/// Check the body against one obstacle
pub fn body_hits_obstacle(body: &Body, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    if !overlaps_column(body, obstacle, tuning.obstacle_width) {
        return false;
    }
    let hit_top = body.top() < obstacle.gap_y;
    let hit_bottom = body.bottom() > obstacle.gap_bottom(tuning.gap_height);
    hit_top || hit_bottom
}

/// Index of the first obstacle (oldest first) the body hits
pub fn first_obstacle_hit<'a>(
    body: &Body,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    tuning: &Tuning,
) -> Option<usize> {
    obstacles
        .into_iter()
        .position(|o| body_hits_obstacle(body, o, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn body_at(x: f32, y: f32) -> Body {
        Body {
            pos: Vec2::new(x, y),
            vy: 100.0,
            radius: 14.0,
        }
    }

    #[test]
    fn test_floor_is_fatal_and_clamps() {
        let mut body = body_at(100.0, 510.0);
        assert_eq!(resolve_bounds(&mut body, 520.0), Bounds::Floor);
        assert_eq!(body.pos.y, 506.0);
    }

    #[test]
    fn test_ceiling_clamps_and_stops() {
        let mut body = body_at(100.0, 5.0);
        body.vy = -300.0;
        assert_eq!(resolve_bounds(&mut body, 520.0), Bounds::Ceiling);
        assert_eq!(body.pos.y, 14.0);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn test_inside_field() {
        let mut body = body_at(100.0, 300.0);
        assert_eq!(resolve_bounds(&mut body, 520.0), Bounds::Clear);
        assert_eq!(body.pos.y, 300.0);
        assert_eq!(body.vy, 100.0);
    }

    #[test]
    fn test_in_gap_is_safe() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(90.0, 200.0);
        // Gap 200..350, body 261..289
        assert!(!body_hits_obstacle(&body_at(112.0, 275.0), &obstacle, &tuning));
    }

    #[test]
    fn test_top_and_bottom_columns() {
        let tuning = Tuning::default();
        let obstacle = Obstacle::new(90.0, 200.0);
        // Top edge 199 < 200
        assert!(body_hits_obstacle(&body_at(112.0, 213.0), &obstacle, &tuning));
        // Bottom edge 351 > 350
        assert!(body_hits_obstacle(&body_at(112.0, 337.0), &obstacle, &tuning));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        let tuning = Tuning::default();
        // Column 130..200, body 98..126
        let obstacle = Obstacle::new(130.0, 400.0);
        assert!(!body_hits_obstacle(&body_at(112.0, 100.0), &obstacle, &tuning));
        // Touching edges do not count
        let obstacle = Obstacle::new(126.0, 400.0);
        assert!(!body_hits_obstacle(&body_at(112.0, 100.0), &obstacle, &tuning));
    }

    #[test]
    fn test_first_hit_index() {
        let tuning = Tuning::default();
        let obstacles = [
            Obstacle::new(-60.0, 50.0),
            Obstacle::new(100.0, 400.0),
            Obstacle::new(105.0, 400.0),
        ];
        let body = body_at(112.0, 100.0);
        assert_eq!(first_obstacle_hit(&body, &obstacles, &tuning), Some(1));
        assert_eq!(first_obstacle_hit(&body, &obstacles[..1], &tuning), None);
    }
}
