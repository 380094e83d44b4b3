//! Browser host
//!
//! `WebGame` owns an engine and its `requestAnimationFrame` loop. Every frame
//! it advances the engine with the frame timestamp, builds the scene and hands
//! it to a JS draw callback as a JSON string. Page code forwards DOM events to
//! [`WebGame::key_down`] / [`WebGame::pointer_down`] and tears the loop down
//! with [`WebGame::destroy`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{GameHost, run_frame};
use crate::input::{HostInput, KeyBindings, handle_input};
use crate::sim::Engine;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already initialized by another module instance
        return;
    }
    log::info!("flappy-engine wasm module loaded");
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Frame loop handles; kept apart from the game so `draw` can re-enter it
#[derive(Clone)]
struct FrameLoop {
    game: Rc<RefCell<GameHost>>,
    draw: js_sys::Function,
    /// Pending `requestAnimationFrame` handle
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    fn schedule(self) {
        let Ok(window) = window() else {
            log::error!("no window; animation loop stopped");
            return;
        };
        let pending = self.pending.clone();
        let callback = Closure::once_into_js(move |time: f64| self.frame(time));
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(handle) => pending.set(Some(handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn frame(self, time: f64) {
        self.pending.set(None);
        let draw = self.draw.clone();
        let more = run_frame(&self.game, time, |json| {
            if let Err(e) = draw.call1(&JsValue::NULL, &JsValue::from_str(json)) {
                log::warn!("draw callback failed: {:?}", e);
            }
        });
        // The callback may have restarted the loop through `run()`
        if more && self.pending.get().is_none() {
            self.schedule();
        }
    }
}

/// Browser-facing game handle
#[wasm_bindgen]
pub struct WebGame {
    frames: FrameLoop,
}

impl WebGame {
    fn from_engine(engine: Engine, draw: js_sys::Function) -> WebGame {
        WebGame {
            frames: FrameLoop {
                game: Rc::new(RefCell::new(GameHost::new(engine))),
                draw,
                pending: Rc::new(Cell::new(None)),
            },
        }
    }

    fn game(&self) -> &RefCell<GameHost> {
        &self.frames.game
    }
}

#[wasm_bindgen]
impl WebGame {
    /// New game with default tuning, seeded from the wall clock.
    /// `draw` receives the scene JSON once per frame.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, draw: js_sys::Function) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        Self::from_engine(Engine::with_seed(width, height, seed), draw)
    }

    /// New game from a JSON tuning document (missing fields use defaults)
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(
        width: f32,
        height: f32,
        tuning_json: &str,
        draw: js_sys::Function,
    ) -> Result<WebGame, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        tuning
            .validate_for(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let seed = js_sys::Date::now() as u64;
        let source = Pcg32::seed_from_u64(seed);
        Ok(Self::from_engine(
            Engine::with_tuning(width, height, tuning, source),
            draw,
        ))
    }

    /// Start the animation loop (idempotent)
    pub fn run(&self) {
        if self.game().borrow().destroyed || self.frames.pending.get().is_some() {
            return;
        }
        self.frames.clone().schedule();
    }

    pub fn start(&self) {
        self.game().borrow_mut().engine.start();
    }

    pub fn flap(&self) {
        self.game().borrow_mut().engine.trigger_impulse();
    }

    pub fn restart(&self) {
        self.game().borrow_mut().engine.restart();
    }

    /// Forward a `KeyboardEvent.code`; returns whether it was handled
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, code: &str) -> bool {
        let mut h = self.game().borrow_mut();
        let GameHost {
            engine, bindings, ..
        } = &mut *h;
        handle_input(engine, bindings, HostInput::Key(code)).is_some()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self) {
        let mut h = self.game().borrow_mut();
        let GameHost {
            engine, bindings, ..
        } = &mut *h;
        handle_input(engine, bindings, HostInput::PointerDown);
    }

    /// Replace key bindings from JSON, e.g. `{"impulse":["KeyJ"]}`
    #[wasm_bindgen(js_name = setBindings)]
    pub fn set_bindings(&self, json: &str) -> Result<(), JsValue> {
        let bindings: KeyBindings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.game().borrow_mut().bindings = bindings;
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.game().borrow().engine.score()
    }

    /// `{"phase": ..., "score": ...}`
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let snapshot = self.game().borrow().engine.snapshot();
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<String, JsValue> {
        let events = self.game().borrow_mut().engine.drain_events();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Final run result once the game is over, else `undefined`
    #[wasm_bindgen(js_name = finishedRun)]
    pub fn finished_run(&self) -> Result<Option<String>, JsValue> {
        self.game()
            .borrow()
            .engine
            .finished_run()
            .map(|run| serde_json::to_string(&run).map_err(|e| JsValue::from_str(&e.to_string())))
            .transpose()
    }

    /// Stop the animation loop. The handle stays usable for queries.
    pub fn destroy(&self) {
        self.game().borrow_mut().destroyed = true;
        if let Some(handle) = self.frames.pending.take() {
            if let Ok(window) = window() {
                if let Err(e) = window.cancel_animation_frame(handle) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
        log::info!("Game loop destroyed");
    }
}
