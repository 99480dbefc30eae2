//! Bounded, end-time-ordered log of closed spikes.
//!
//! Spikes close in time order, so the log is sorted by construction and
//! entries expire from the front. The window is bounded by the gesture age,
//! which at typical sensor rates keeps it to a handful of entries; a linear
//! backward scan is cheaper than any index.

use std::collections::VecDeque;

use crate::spike::Spike;

/// Thresholds used to pair a new spike with an earlier, opposing one.
#[derive(Clone, Copy, Debug)]
pub struct MatchCriteria {
    /// `cos(MaxGestureAngle)`. A candidate must satisfy `cos < -max_angle_cos`.
    pub max_angle_cos: f64,
    /// Minimum `|new - old|` for the pair to count as a gesture.
    pub min_magnitude: f64,
}

#[derive(Clone, Debug, Default)]
pub struct SpikeLog {
    spikes: VecDeque<Spike>,
}

impl SpikeLog {
    pub fn new() -> Self {
        Self {
            spikes: VecDeque::with_capacity(50),
        }
    }

    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spike> {
        self.spikes.iter()
    }

    pub fn clear(&mut self) {
        self.spikes.clear();
    }

    /// Append a closed spike.
    pub fn add(&mut self, spike: Spike) {
        debug_assert!(
            self.spikes.back().is_none_or(|s| s.end_time <= spike.end_time),
            "spike log must stay ordered by end time"
        );
        self.spikes.push_back(spike);
    }

    /// Drop every entry with `now - end_time > max_age`.
    ///
    /// Scans from the newest entry; the first stale one found marks the end of
    /// the stale prefix, which is removed in one pass.
    pub fn purge_old(&mut self, now: f64, max_age: f64) -> usize {
        match self.spikes.iter().rposition(|s| now - s.end_time > max_age) {
            Some(idx) => {
                self.spikes.drain(..=idx);
                idx + 1
            }
            None => 0,
        }
    }

    /// Most recent logged spike that opposes `new_spike` strongly enough.
    ///
    /// `new_spike` itself is skipped when it is the newest entry. Recency is
    /// the only tie-break.
    pub fn find_match(&self, new_spike: &Spike, criteria: MatchCriteria) -> Option<Spike> {
        let skip = usize::from(self.spikes.back() == Some(new_spike));
        self.spikes
            .iter()
            .rev()
            .skip(skip)
            .find(|old| {
                let Some(cos) = old.direction.cos_angle(new_spike.direction) else {
                    return false;
                };
                cos < -criteria.max_angle_cos
                    && (new_spike.direction - old.direction).norm() > criteria.min_magnitude
            })
            .copied()
    }
}
