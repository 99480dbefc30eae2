use serde::{Deserialize, Serialize};

use crate::vector::Vec3;

/// Values the engine computed during one tick, for diagnostics and recording.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickTelemetry {
    /// Ticks processed since the engine was created.
    pub frame: u64,
    pub time: f64,
    /// User acceleration after the noise floor, device axes.
    pub user_accel: Vec3,
    /// Cosine between the active spike and this sample; 0 when undefined.
    pub dot: f64,
    /// Magnitude of the spike logged this tick, or of the sample while idle.
    pub spike_magnitude: f64,
    /// Full attitude as Euler angles in degrees.
    pub attitude_euler: Vec3,
}

/// Receives per-tick telemetry. Deciding whether and where to persist it is
/// up to the implementor.
pub trait Recorder {
    fn record(&mut self, telemetry: &TickTelemetry);
}

impl Recorder for Vec<TickTelemetry> {
    fn record(&mut self, telemetry: &TickTelemetry) {
        self.push(*telemetry);
    }
}
