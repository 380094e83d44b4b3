//! Obstacle generator
//!
//! A timer accumulates step time while running; each time it reaches the spawn
//! interval one obstacle is appended at the right edge. The vertical gap offset
//! is the only random quantity in the simulation and comes from a [`GapSource`].

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, Obstacle, World};
use crate::tuning::Tuning;

/// Source of gap placements
pub trait GapSource {
    /// Next placement as a fraction of the valid gap range, in `[0, 1)`
    fn next_unit(&mut self) -> f32;
}

impl GapSource for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl<S: GapSource + ?Sized> GapSource for Box<S> {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Adapter for any other `rand` generator
#[derive(Debug, Clone)]
pub struct RngGaps<R>(pub R);

impl<R: Rng> GapSource for RngGaps<R> {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Every gap at the same fraction (drills and tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedGap(pub f32);

impl GapSource for FixedGap {
    fn next_unit(&mut self) -> f32 {
        self.0.clamp(0.0, 1.0)
    }
}

/// Replays a fixed list of fractions, wrapping around
#[derive(Debug, Clone)]
pub struct GapSequence {
    units: Vec<f32>,
    next: usize,
}

impl GapSequence {
    pub fn new(units: Vec<f32>) -> Self {
        Self { units, next: 0 }
    }
}

impl GapSource for GapSequence {
    fn next_unit(&mut self) -> f32 {
        if self.units.is_empty() {
            return 0.0;
        }
        let unit = self.units[self.next % self.units.len()];
        self.next = (self.next + 1) % self.units.len();
        unit.clamp(0.0, 1.0)
    }
}

/// Map a unit fraction to a gap top that always keeps the full gap inside the field
pub fn gap_y_for(unit: f32, tuning: &Tuning, height: f32) -> f32 {
    let (min, max) = tuning.gap_range(height);
    // Guard against sources returning exactly 1.0
    let y = min + unit.clamp(0.0, 1.0) * (max - min);
    y.min(max)
}

/// Advance the spawn timer and append an obstacle when it is due.
/// Returns true if an obstacle was spawned.
pub fn update_spawner<S: GapSource + ?Sized>(
    world: &mut World,
    tuning: &Tuning,
    source: &mut S,
    dt: f32,
) -> bool {
    world.spawn_timer += dt;
    if world.spawn_timer < tuning.spawn_interval {
        return false;
    }
    world.spawn_timer = 0.0;

    let gap_y = gap_y_for(source.next_unit(), tuning, world.height);
    let x = world.width + tuning.obstacle_width;
    world.obstacles.push_back(Obstacle::new(x, gap_y));
    world.emit(GameEvent::Spawned { gap_y });
    log::debug!(
        "Spawned obstacle at x={:.1} gap_y={:.1} ({} live)",
        x,
        gap_y,
        world.obstacles.len()
    );
    true
}

/// Move every obstacle left and evict the ones fully past the left edge.
/// Returns the number evicted.
pub fn scroll_obstacles(world: &mut World, tuning: &Tuning, dt: f32) -> usize {
    let dx = tuning.obstacle_speed * dt;
    for obstacle in world.obstacles.iter_mut() {
        obstacle.x -= dx;
    }

    // Front-only eviction keeps spawn order == spatial order
    let mut evicted = 0;
    while world
        .obstacles
        .front()
        .is_some_and(|o| o.right_edge(tuning.obstacle_width) < 0.0)
    {
        world.obstacles.pop_front();
        evicted += 1;
    }
    if evicted > 0 {
        log::trace!("Evicted {} obstacle(s)", evicted);
    }
    evicted
}
