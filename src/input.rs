//! Host input mapping
//!
//! Hosts read their own devices and hand raw key codes (DOM `KeyboardEvent.code`
//! names) or pointer presses to [`handle_input`], which resolves them to a
//! [`Control`] for the current phase and forwards it to the engine.

use serde::{Deserialize, Serialize};

use crate::sim::{Engine, GapSource, Phase};

/// Engine operation requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Flap (also starts from Ready)
    Impulse,
    Start,
    Restart,
}

impl Control {
    /// Forward to the matching engine operation
    pub fn apply<S: GapSource>(self, engine: &mut Engine<S>) {
        match self {
            Control::Impulse => engine.trigger_impulse(),
            Control::Start => engine.start(),
            Control::Restart => engine.restart(),
        }
    }
}

/// Raw input as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostInput<'a> {
    /// Key press by code name, e.g. `"Space"`
    Key(&'a str),
    /// Click or touch on the play field
    PointerDown,
}

/// Key code bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub impulse: Vec<String>,
    /// Only honored once the run is over
    pub restart: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            impulse: vec!["Space".into(), "ArrowUp".into(), "KeyW".into()],
            restart: vec!["KeyR".into(), "Enter".into()],
        }
    }
}

impl KeyBindings {
    /// Resolve raw input for the given phase
    pub fn resolve(&self, input: HostInput<'_>, phase: Phase) -> Option<Control> {
        match input {
            HostInput::PointerDown => Some(Control::Impulse),
            HostInput::Key(code) if self.impulse.iter().any(|k| k == code) => {
                Some(Control::Impulse)
            }
            HostInput::Key(code) if self.restart.iter().any(|k| k == code) => {
                (phase == Phase::GameOver).then_some(Control::Restart)
            }
            HostInput::Key(_) => None,
        }
    }
}

/// Resolve and apply one input. Returns the control that was applied, if any.
pub fn handle_input<S: GapSource>(
    engine: &mut Engine<S>,
    bindings: &KeyBindings,
    input: HostInput<'_>,
) -> Option<Control> {
    let control = bindings.resolve(input, engine.phase())?;
    log::trace!("{:?} -> {:?}", input, control);
    control.apply(engine);
    Some(control)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_keys() {
        let bindings = KeyBindings::default();
        for code in ["Space", "ArrowUp", "KeyW"] {
            assert_eq!(
                bindings.resolve(HostInput::Key(code), Phase::Running),
                Some(Control::Impulse)
            );
        }
        assert_eq!(
            bindings.resolve(HostInput::PointerDown, Phase::Ready),
            Some(Control::Impulse)
        );
        assert_eq!(bindings.resolve(HostInput::Key("KeyQ"), Phase::Running), None);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.resolve(HostInput::Key("KeyR"), Phase::Running), None);
        assert_eq!(bindings.resolve(HostInput::Key("Enter"), Phase::Ready), None);
        assert_eq!(
            bindings.resolve(HostInput::Key("Enter"), Phase::GameOver),
            Some(Control::Restart)
        );
    }

    #[test]
    fn test_handle_input_drives_engine() {
        let mut engine = Engine::with_seed(400.0, 600.0, 9);
        let bindings = KeyBindings::default();

        assert_eq!(
            handle_input(&mut engine, &bindings, HostInput::Key("Space")),
            Some(Control::Impulse)
        );
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.body().vy, -500.0);

        // Restart key ignored mid-run
        assert_eq!(handle_input(&mut engine, &bindings, HostInput::Key("KeyR")), None);
        assert_eq!(engine.phase(), Phase::Running);

        for _ in 0..120 {
            engine.advance_by(0.016);
        }
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(
            handle_input(&mut engine, &bindings, HostInput::Key("KeyR")),
            Some(Control::Restart)
        );
        assert_eq!(engine.phase(), Phase::Ready);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_custom_bindings_from_json() {
        let bindings: KeyBindings = serde_json::from_str(r#"{ "impulse": ["KeyJ"] }"#).unwrap();
        assert_eq!(
            bindings.resolve(HostInput::Key("KeyJ"), Phase::Running),
            Some(Control::Impulse)
        );
        assert_eq!(bindings.resolve(HostInput::Key("Space"), Phase::Running), None);
        // Restart keeps its defaults
        assert_eq!(
            bindings.resolve(HostInput::Key("KeyR"), Phase::GameOver),
            Some(Control::Restart)
        );
    }
}
