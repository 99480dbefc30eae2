/// Minimum combined magnitude of two opposing spikes to count as a gesture (g).
pub const MIN_GESTURE_MAGNITUDE: f64 = 0.40;

/// Maximum deviation from exactly-opposite for two spikes to match (degrees).
pub const MAX_GESTURE_ANGLE: f64 = 60.0;

/// How long a closed spike stays eligible for matching (seconds).
pub const MAX_GESTURE_AGE: f64 = 0.20;

/// Minimum interval between fired gestures (seconds).
pub const POST_GESTURE_COOLDOWN: f64 = 0.5;

/// Minimum magnitude for a closed segment to count as a spike (g).
pub const MIN_SPIKE_MAGNITUDE: f64 = 0.20;

/// Maximum deviation for a sample to continue the active spike (degrees).
pub const MAX_SPIKE_ANGLE: f64 = 30.0;

/// Noise floor: samples weaker than this are treated as zero (g).
pub const IGNORE_ACCEL_BELOW: f64 = 0.01;

/// Low-pass factor for the gravity estimate when no gyroscope is available.
pub const GRAVITY_FILTER: f64 = 0.10;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;

/// Substitute for a zero denominator in the spike blend.
pub const BLEND_DENOMINATOR_FLOOR: f64 = 0.001;
