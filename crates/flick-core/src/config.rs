use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    GRAVITY_FILTER, IGNORE_ACCEL_BELOW, MAX_GESTURE_AGE, MAX_GESTURE_ANGLE, MAX_SPIKE_ANGLE,
    MIN_GESTURE_MAGNITUDE, MIN_SPIKE_MAGNITUDE, POST_GESTURE_COOLDOWN,
};

/// What happens to in-flight state (active spike, spike log, pending
/// candidate) when a suspended engine is resumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumePolicy {
    /// Start from a clean slate.
    #[default]
    Reset,
    /// Continue exactly where the engine was suspended.
    Preserve,
}

/// Recognition thresholds. Magnitudes in g, angles in degrees, times in seconds.
///
/// The engine trusts these values; call [`GestureConfig::validate`] before
/// handing a user-supplied config to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    pub min_gesture_magnitude: f64,
    pub max_gesture_angle: f64,
    pub max_gesture_age: f64,
    /// Hold the first gesture of a pair so a larger follow-up can replace it.
    pub ignore_wind_ups: bool,
    pub post_gesture_cooldown: f64,
    pub min_spike_magnitude: f64,
    pub max_spike_angle: f64,
    pub ignore_accel_below: f64,
    /// Low-pass factor for the gravity estimate without a gyroscope.
    pub gravity_filter: f64,
    pub resume_policy: ResumePolicy,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_gesture_magnitude: MIN_GESTURE_MAGNITUDE,
            max_gesture_angle: MAX_GESTURE_ANGLE,
            max_gesture_age: MAX_GESTURE_AGE,
            ignore_wind_ups: true,
            post_gesture_cooldown: POST_GESTURE_COOLDOWN,
            min_spike_magnitude: MIN_SPIKE_MAGNITUDE,
            max_spike_angle: MAX_SPIKE_ANGLE,
            ignore_accel_below: IGNORE_ACCEL_BELOW,
            gravity_filter: GRAVITY_FILTER,
            resume_policy: ResumePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold is negative, NaN or infinite.
    InvalidThreshold { field: &'static str, value: f64 },
    /// Angle outside [0, 180] degrees.
    InvalidAngle { field: &'static str, value: f64 },
    /// Filter factor outside (0, 1].
    InvalidFilter(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidThreshold { field, value } => {
                write!(f, "{field} must be a finite, non-negative number (got {value})")
            }
            ConfigError::InvalidAngle { field, value } => {
                write!(f, "{field} must be between 0 and 180 degrees (got {value})")
            }
            ConfigError::InvalidFilter(value) => {
                write!(f, "gravity_filter must be in (0, 1] (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl GestureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [
            ("min_gesture_magnitude", self.min_gesture_magnitude),
            ("max_gesture_age", self.max_gesture_age),
            ("post_gesture_cooldown", self.post_gesture_cooldown),
            ("min_spike_magnitude", self.min_spike_magnitude),
            ("ignore_accel_below", self.ignore_accel_below),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { field, value });
            }
        }

        let angles = [
            ("max_gesture_angle", self.max_gesture_angle),
            ("max_spike_angle", self.max_spike_angle),
        ];
        for (field, value) in angles {
            if !(0.0..=180.0).contains(&value) {
                return Err(ConfigError::InvalidAngle { field, value });
            }
        }

        if !(self.gravity_filter > 0.0 && self.gravity_filter <= 1.0) {
            return Err(ConfigError::InvalidFilter(self.gravity_filter));
        }
        Ok(())
    }

    /// `cos(max_gesture_angle)`.
    pub fn max_gesture_angle_cos(&self) -> f64 {
        self.max_gesture_angle.to_radians().cos()
    }

    /// `cos(max_spike_angle)`.
    pub fn max_spike_angle_cos(&self) -> f64 {
        self.max_spike_angle.to_radians().cos()
    }
}
