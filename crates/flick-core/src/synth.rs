//! Deterministic synthetic sample traces, for demos, tests and benchmarks.
//!
//! Every trace is sampled at a fixed rate from an upright device. A flick is
//! two back-to-back half-sine pulses, the second along the flick's sensor
//! direction and the first opposite to it, so the engine labels it with the
//! requested axis.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::attitude::upright_platform_attitude;
use crate::gesture::Axis;
use crate::sample::Sample;
use crate::vector::Vec3;

/// Per-axis jitter amplitude; stays below the default noise floor.
pub const DEFAULT_JITTER: f64 = 0.004;

/// Samples per pulse.
const PULSE_SAMPLES: usize = 4;

pub struct TraceBuilder {
    rate_hz: f64,
    jitter: f64,
    rng: SmallRng,
    samples: Vec<Sample>,
}

impl TraceBuilder {
    pub fn new(rate_hz: f64, seed: u64) -> Self {
        Self {
            rate_hz,
            jitter: DEFAULT_JITTER,
            rng: SmallRng::seed_from_u64(seed),
            samples: Vec::new(),
        }
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Timestamp of the next sample.
    pub fn now(&self) -> f64 {
        self.samples.len() as f64 / self.rate_hz
    }

    /// Hold still for `seconds`.
    pub fn idle(&mut self, seconds: f64) -> &mut Self {
        let n = (seconds * self.rate_hz).round() as usize;
        for _ in 0..n {
            self.push(Vec3::ZERO);
        }
        self
    }

    /// A flick the engine recognizes along `axis`, with pulses of height `peak` (g).
    pub fn flick(&mut self, axis: Axis, peak: f64) -> &mut Self {
        let dir = sensor_direction(axis);
        self.pulse(-dir, peak);
        self.pulse(dir, peak);
        self
    }

    /// A flick preceded by a backswing of height `wind_up` (g).
    pub fn flick_with_wind_up(&mut self, axis: Axis, peak: f64, wind_up: f64) -> &mut Self {
        self.pulse(sensor_direction(axis), wind_up);
        self.flick(axis, peak)
    }

    pub fn build(&mut self) -> Vec<Sample> {
        std::mem::take(&mut self.samples)
    }

    fn pulse(&mut self, dir: Vec3, peak: f64) {
        for i in 0..PULSE_SAMPLES {
            let phase = (i + 1) as f64 / (PULSE_SAMPLES + 1) as f64;
            self.push(dir * (peak * (std::f64::consts::PI * phase).sin()));
        }
    }

    fn push(&mut self, accel: Vec3) {
        let j = self.jitter;
        let noise = if j > 0.0 {
            Vec3::new(
                self.rng.random_range(-j..=j),
                self.rng.random_range(-j..=j),
                self.rng.random_range(-j..=j),
            )
        } else {
            Vec3::ZERO
        };
        let time = self.now();
        self.samples.push(Sample::fused(
            time,
            accel + noise,
            Vec3::DOWN,
            upright_platform_attitude(),
        ));
    }
}

/// Sensor-space unit vector for `axis` (sensor Z is mirrored).
fn sensor_direction(axis: Axis) -> Vec3 {
    axis.unit().with_z_flipped()
}
