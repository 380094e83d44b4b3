//! Host-facing engine: phase machine, tick clock and control operations
//!
//! The engine never reads input devices or clocks. Hosts forward input as
//! [`Engine::start`], [`Engine::trigger_impulse`] and [`Engine::restart`], and
//! call [`Engine::advance`] once per frame with a monotonic timestamp.
//!
//! Phase transitions:
//! - `Ready --start--> Running` (clock re-initialized; no-op while running)
//! - `GameOver --start--> Running` resets the whole run first
//! - `Running --crash--> GameOver` inside a step
//! - `any --restart--> Ready`
//! - `trigger_impulse` starts from Ready, flaps while Running, is ignored in GameOver

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn::GapSource;
use super::state::{Body, FinishedRun, GameEvent, Obstacle, Phase, Snapshot, World};
use super::tick::{clamp_step, tick};
use crate::tuning::Tuning;

/// The simulation engine
#[derive(Debug, Clone)]
pub struct Engine<S: GapSource = Pcg32> {
    world: World,
    tuning: Tuning,
    source: S,
    /// Previous host timestamp (ms); `None` right after start/restart
    last_tick: Option<f64>,
    /// Step actually used by the last advance (seconds, after clamping)
    last_step: f32,
}

impl Engine<Pcg32> {
    /// Engine with default tuning and a random seed
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_seed(width, height, rand::random())
    }

    /// Engine with default tuning and a reproducible gap sequence
    pub fn with_seed(width: f32, height: f32, seed: u64) -> Self {
        log::debug!("Engine seeded with {}", seed);
        Self::with_tuning(width, height, Tuning::default(), Pcg32::seed_from_u64(seed))
    }
}

impl<S: GapSource> Engine<S> {
    /// Engine with custom tuning and gap source.
    ///
    /// Never fails: a gap that cannot fit collapses to the top margin. Use
    /// [`Tuning::validate_for`] beforehand to reject such fields.
    pub fn with_tuning(width: f32, height: f32, tuning: Tuning, source: S) -> Self {
        Self {
            world: World::new(width, height, &tuning, 0),
            tuning,
            source,
            last_tick: None,
            last_step: 0.0,
        }
    }

    /// Begin (or resume into) a run
    pub fn start(&mut self) {
        match self.world.phase {
            Phase::Running => return,
            Phase::GameOver => self.reset(),
            Phase::Ready => {}
        }
        self.world.phase = Phase::Running;
        self.last_tick = None;
        let run = self.world.run;
        self.world.emit(GameEvent::Started { run });
        log::info!("Run {} started", run);
    }

    /// Flap: starts from Ready, overrides the velocity while running
    pub fn trigger_impulse(&mut self) {
        if self.world.phase == Phase::Ready {
            self.start();
        }
        if self.world.phase != Phase::Running {
            return;
        }
        self.world.body.apply_impulse(self.tuning.impulse_velocity);
        self.world.emit(GameEvent::Impulse);
    }

    /// Full reset back to Ready; never auto-starts
    pub fn restart(&mut self) {
        self.reset();
        let run = self.world.run;
        self.world.emit(GameEvent::Restarted { run });
        log::info!("Restarted (run {})", run);
    }

    /// Advance using a host timestamp in milliseconds.
    ///
    /// The first call after start/restart only records the timestamp.
    pub fn advance(&mut self, timestamp_ms: f64) {
        let dt = match self.last_tick {
            Some(prev) => ((timestamp_ms - prev) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_tick = Some(timestamp_ms);
        self.advance_by(dt);
    }

    /// Advance by a raw elapsed time in seconds (clamped to the max step)
    pub fn advance_by(&mut self, dt: f32) {
        let step = clamp_step(dt, self.tuning.max_step);
        self.last_step = step;
        tick(&mut self.world, &self.tuning, &mut self.source, step);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.world.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.world.phase
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    pub fn body(&self) -> &Body {
        &self.world.body
    }

    /// Live obstacles, oldest (leftmost) first
    pub fn obstacles(&self) -> &VecDeque<Obstacle> {
        &self.world.obstacles
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Seconds simulated by the last advance
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    /// Y of the ground line
    pub fn ground_y(&self) -> f32 {
        self.tuning.ground_y(self.world.height)
    }

    /// Stable result of the current run, once it is over
    pub fn finished_run(&self) -> Option<FinishedRun> {
        (self.world.phase == Phase::GameOver).then_some(FinishedRun {
            run: self.world.run,
            score: self.world.score,
        })
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.world.events.drain(..).collect()
    }

    fn reset(&mut self) {
        let run = self.world.run.wrapping_add(1);
        // Undrained events from the previous run survive the reset
        let events = std::mem::take(&mut self.world.events);
        self.world = World::new(self.world.width, self.world.height, &self.tuning, run);
        self.world.events = events;
        self.last_tick = None;
        self.last_step = 0.0;
    }
}
