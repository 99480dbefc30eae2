//! Wind-up suppression and post-gesture cooldown.
//!
//! A wind-up is a small motion opposite to the real throw. It pairs with the
//! start of the throw into a small gesture just before the throw itself
//! completes a larger one. Holding the first gesture back lets the larger one
//! replace it; an isolated gesture still fires on the next flush.

use crate::gesture::Gesture;

/// Outcome of offering a freshly matched gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offer {
    /// Fire this gesture now.
    Fire(Gesture),
    /// Held as the pending candidate.
    Held,
    /// Dropped because the cooldown has not elapsed.
    Cooling,
}

#[derive(Clone, Debug)]
pub struct CandidateBuffer {
    ignore_wind_ups: bool,
    cooldown: f64,
    pending: Option<Gesture>,
    last_fired: Option<f64>,
}

impl CandidateBuffer {
    pub fn new(ignore_wind_ups: bool, cooldown: f64) -> Self {
        Self {
            ignore_wind_ups,
            cooldown,
            pending: None,
            last_fired: None,
        }
    }

    pub fn pending(&self) -> Option<&Gesture> {
        self.pending.as_ref()
    }

    pub fn last_fired(&self) -> Option<f64> {
        self.last_fired
    }

    /// Drop any pending candidate without firing it.
    pub fn discard(&mut self) {
        self.pending = None;
    }

    pub fn offer(&mut self, gesture: Gesture, now: f64) -> Offer {
        if !self.ignore_wind_ups {
            self.last_fired = Some(now);
            return Offer::Fire(gesture);
        }

        match self.pending.take() {
            None => {
                if self.last_fired.is_some_and(|t| now - t <= self.cooldown) {
                    Offer::Cooling
                } else {
                    self.pending = Some(gesture);
                    Offer::Held
                }
            }
            Some(candidate) => {
                self.last_fired = Some(now);
                if gesture.magnitude() >= candidate.magnitude() {
                    Offer::Fire(gesture)
                } else {
                    Offer::Fire(candidate)
                }
            }
        }
    }

    /// Fire the pending candidate, if any.
    pub fn flush(&mut self, now: f64) -> Option<Gesture> {
        let candidate = self.pending.take()?;
        self.last_fired = Some(now);
        Some(candidate)
    }
}
