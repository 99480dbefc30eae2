use serde::{Deserialize, Serialize};

use crate::constants::BLEND_DENOMINATOR_FLOOR;
use crate::vector::Vec3;

/// Lifecycle of a [`Spike`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpikePhase {
    /// Never begun, or cleared.
    #[default]
    Empty,
    /// Begun and still absorbing samples.
    Active,
    /// Ended. Immutable from here on; eligible for matching and purging.
    Closed,
}

/// A short segment of near-constant-direction acceleration.
///
/// The direction is a magnitude-weighted running combination of the samples
/// that continued the swing, biased towards the strongest reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub direction: Vec3,
    pub start_time: f64,
    pub end_time: f64,
    pub phase: SpikePhase,
}

impl Spike {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.phase == SpikePhase::Active
    }

    pub fn is_closed(&self) -> bool {
        self.phase == SpikePhase::Closed
    }

    pub fn magnitude(&self) -> f64 {
        self.direction.norm()
    }

    /// Duration between the first and last contributing sample.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Start a new segment at `now` seeded with `accel`.
    pub fn begin(&mut self, accel: Vec3, now: f64) {
        debug_assert!(!self.is_active(), "begin() on an active spike");
        self.direction = accel;
        self.start_time = now;
        self.end_time = now;
        self.phase = SpikePhase::Active;
    }

    /// Extend the segment with a sample that continues the swing.
    ///
    /// Readings no stronger than the current direction only move the end
    /// time. Stronger readings are blended in with weight `|v| / (|d| + |v|)`.
    pub fn update(&mut self, accel: Vec3, now: f64) {
        self.end_time = now;

        let current = self.direction.norm();
        let incoming = accel.norm();
        if incoming <= current {
            return;
        }

        let mut total = current + incoming;
        if total == 0.0 {
            total = BLEND_DENOMINATOR_FLOOR;
        }
        self.direction = self.direction.lerp(accel, incoming / total);
    }

    /// Close the segment at `now` and return the closed copy.
    pub fn end(&mut self, now: f64) -> Spike {
        self.end_time = now;
        self.phase = SpikePhase::Closed;
        *self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
