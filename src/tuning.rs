//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so hosts and the
//! headless runner can try different physics without recompiling. Partial JSON
//! documents are accepted; missing fields fall back to the design values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or checking a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` is out of range: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
    #[error("gap of {gap_height}px with {margin}px margins does not fit a {play_height}px play area")]
    GapDoesNotFit {
        gap_height: f32,
        margin: f32,
        play_height: f32,
    },
}

/// Physics and generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity an impulse sets (negative = upward)
    pub impulse_velocity: f32,
    /// Clamp for a single integration step (seconds)
    pub max_step: f32,
    pub body_radius: f32,
    /// Fixed horizontal position as a fraction of field width
    pub body_x_ratio: f32,
    /// Start height as a fraction of field height
    pub body_y_ratio: f32,
    pub obstacle_width: f32,
    /// Leftward obstacle speed (pixels/s)
    pub obstacle_speed: f32,
    pub gap_height: f32,
    pub gap_margin: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub ground_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,
            max_step: MAX_STEP,
            body_radius: BODY_RADIUS,
            body_x_ratio: BODY_X_RATIO,
            body_y_ratio: BODY_Y_RATIO,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            gap_height: GAP_HEIGHT,
            gap_margin: GAP_MARGIN,
            spawn_interval: SPAWN_INTERVAL,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check field-independent ranges
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn ratio(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value < 1.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must lie strictly between 0 and 1",
                })
            }
        }

        // Zero gravity is allowed (used for held-body drills)
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(TuningError::Invalid {
                field: "gravity",
                reason: "must be zero or positive",
            });
        }
        if !self.impulse_velocity.is_finite() || self.impulse_velocity >= 0.0 {
            return Err(TuningError::Invalid {
                field: "impulse_velocity",
                reason: "must be negative (upward)",
            });
        }
        positive("max_step", self.max_step)?;
        positive("body_radius", self.body_radius)?;
        ratio("body_x_ratio", self.body_x_ratio)?;
        ratio("body_y_ratio", self.body_y_ratio)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_speed", self.obstacle_speed)?;
        positive("gap_height", self.gap_height)?;
        if !self.gap_margin.is_finite() || self.gap_margin < 0.0 {
            return Err(TuningError::Invalid {
                field: "gap_margin",
                reason: "must be zero or positive",
            });
        }
        positive("spawn_interval", self.spawn_interval)?;
        if !self.ground_height.is_finite() || self.ground_height < 0.0 {
            return Err(TuningError::Invalid {
                field: "ground_height",
                reason: "must be zero or positive",
            });
        }
        Ok(())
    }

    /// Check ranges plus the fit of the gap inside a concrete play field
    pub fn validate_for(&self, width: f32, height: f32) -> Result<(), TuningError> {
        self.validate()?;
        if !(width.is_finite() && width > 0.0) {
            return Err(TuningError::Invalid {
                field: "width",
                reason: "must be a positive number",
            });
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(TuningError::Invalid {
                field: "height",
                reason: "must be a positive number",
            });
        }
        let play_height = height - self.ground_height;
        if play_height - 2.0 * self.gap_margin < self.gap_height {
            return Err(TuningError::GapDoesNotFit {
                gap_height: self.gap_height,
                margin: self.gap_margin,
                play_height,
            });
        }
        Ok(())
    }

    /// Y of the ground line for a field of the given height
    #[inline]
    pub fn ground_y(&self, height: f32) -> f32 {
        height - self.ground_height
    }

    /// Range of valid `gap_y` values for a field of the given height.
    /// Collapses to the top margin when the gap cannot fit.
    pub fn gap_range(&self, height: f32) -> (f32, f32) {
        let min = self.gap_margin;
        let max = self.ground_y(height) - self.gap_margin - self.gap_height;
        (min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_design_values() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 1800.0);
        assert_eq!(t.impulse_velocity, -500.0);
        assert_eq!(t.max_step, 0.033);
        assert_eq!(t.spawn_interval, 1.4);
        assert!(t.validate().is_ok());
        assert!(t.validate_for(400.0, 600.0).is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "gravity": 900.0, "gap_height": 180.0 }"#).unwrap();
        assert_eq!(t.gravity, 900.0);
        assert_eq!(t.gap_height, 180.0);
        assert_eq!(t.obstacle_speed, OBSTACLE_SPEED);
    }

    #[test]
    fn test_rejects_downward_impulse() {
        let err = Tuning::from_json(r#"{ "impulse_velocity": 200.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "impulse_velocity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_gap_range() {
        let t = Tuning::default();
        // 600 - 80 - 50 - 150 = 320
        assert_eq!(t.gap_range(600.0), (50.0, 320.0));
        // Too small: collapses to the margin
        assert_eq!(t.gap_range(200.0), (50.0, 50.0));
        assert!(matches!(
            t.validate_for(400.0, 200.0),
            Err(TuningError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_rejects_unusable_field_size() {
        let t = Tuning::default();
        for (width, height, field) in [
            (400.0, f32::NAN, "height"),
            (400.0, f32::INFINITY, "height"),
            (400.0, -600.0, "height"),
            (f32::NAN, 600.0, "width"),
            (0.0, 600.0, "width"),
        ] {
            match t.validate_for(width, height) {
                Err(TuningError::Invalid { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{width}x{height}: expected invalid {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
    }
}
