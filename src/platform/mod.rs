//! Platform abstraction layer
//!
//! The engine only ever sees millisecond timestamps and control calls. This
//! module supplies them:
//! - Web: `requestAnimationFrame` timestamps and DOM key/pointer events
//!   ([`WebGame`], wasm32 only)
//! - Native: a fixed-rate [`FixedClock`] for the headless runner and tests
//!
//! [`run_frame`] is the per-frame step both kinds of loop share.

#[cfg(target_arch = "wasm32")]
mod web;

use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
pub use web::WebGame;

use crate::input::KeyBindings;
use crate::scene;
use crate::sim::Engine;

/// Default headless frame rate
pub const DEFAULT_HZ: f64 = 60.0;

/// Deterministic frame clock producing host-style timestamps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    now_ms: f64,
    frame_ms: f64,
}

impl FixedClock {
    /// Clock at `hz` frames per second, starting at `start_ms`.
    /// Non-positive or non-finite rates fall back to [`DEFAULT_HZ`].
    pub fn new(hz: f64, start_ms: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { DEFAULT_HZ };
        Self {
            now_ms: start_ms,
            frame_ms: 1000.0 / hz,
        }
    }

    /// Timestamp of the current frame
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[inline]
    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Advance one frame and return the new timestamp
    pub fn tick(&mut self) -> f64 {
        self.now_ms += self.frame_ms;
        self.now_ms
    }

    /// Frames needed to cover `seconds`
    pub fn frames_for(&self, seconds: f64) -> u64 {
        if !seconds.is_finite() || seconds <= 0.0 {
            return 0;
        }
        (seconds * 1000.0 / self.frame_ms).ceil() as u64
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(DEFAULT_HZ, 0.0)
    }
}

/// Engine and input state shared by a frame loop and the page's event handlers
#[derive(Debug, Clone)]
pub struct GameHost {
    pub engine: Engine,
    pub bindings: KeyBindings,
    /// Set once the loop is torn down; no further frames run
    pub destroyed: bool,
}

impl GameHost {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            bindings: KeyBindings::default(),
            destroyed: false,
        }
    }
}

/// Run one frame: advance and encode the scene under a short borrow, then
/// call `draw` with no borrow held so it may call back into the host.
/// Returns whether another frame should be scheduled.
pub fn run_frame(host: &RefCell<GameHost>, time: f64, draw: impl FnOnce(&str)) -> bool {
    let json = {
        let mut h = host.borrow_mut();
        if h.destroyed {
            return false;
        }
        h.engine.advance(time);
        serde_json::to_string(&scene::build(&h.engine))
    };
    match json {
        Ok(json) => draw(&json),
        Err(e) => log::error!("failed to encode scene: {}", e),
    }
    !host.borrow().destroyed
}
