//! The gesture engine: one sample in, at most one gesture out, per tick.
//!
//! The acceleration signal is segmented online into spikes (runs of samples
//! whose direction stays within `max_spike_angle` of the running direction).
//! Each closed spike is logged and paired with the most recent earlier spike
//! pointing the opposite way; a pair strong enough becomes a gesture, which
//! then passes through wind-up suppression and cooldown.

use tracing::{debug, trace, warn};

use crate::attitude::AttitudeTracker;
use crate::candidate::{CandidateBuffer, Offer};
use crate::config::{GestureConfig, ResumePolicy};
use crate::gesture::Gesture;
use crate::quaternion::Quaternion;
use crate::sample::{Capabilities, Sample};
use crate::spike::Spike;
use crate::spike_log::{MatchCriteria, SpikeLog};
use crate::telemetry::{Recorder, TickTelemetry};
use crate::vector::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Suspended,
    Running,
}

/// Synchronous gesture callback. Runs inline, inside the tick that fired.
pub type GestureSink = Box<dyn FnMut(&Gesture) + Send>;

pub struct GestureEngine {
    config: GestureConfig,
    capabilities: Capabilities,
    state: EngineState,

    // Derived from config at begin/resume time.
    max_spike_angle_cos: f64,
    criteria: MatchCriteria,

    attitude: AttitudeTracker,
    user_accel: Vec3,
    current: Spike,
    spikes: SpikeLog,
    candidates: CandidateBuffer,
    frame: u64,
    last_telemetry: Option<TickTelemetry>,
    sink: Option<GestureSink>,
}

impl GestureEngine {
    pub fn new(config: GestureConfig, capabilities: Capabilities) -> Self {
        Self {
            max_spike_angle_cos: config.max_spike_angle_cos(),
            criteria: MatchCriteria {
                max_angle_cos: config.max_gesture_angle_cos(),
                min_magnitude: config.min_gesture_magnitude,
            },
            attitude: AttitudeTracker::new(config.gravity_filter),
            candidates: CandidateBuffer::new(config.ignore_wind_ups, config.post_gesture_cooldown),
            config,
            capabilities,
            state: EngineState::Suspended,
            user_accel: Vec3::ZERO,
            current: Spike::new(),
            spikes: SpikeLog::new(),
            frame: 0,
            last_telemetry: None,
            sink: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_accelerometer(&self) -> bool {
        self.capabilities.accelerometer
    }

    pub fn has_gyroscope(&self) -> bool {
        self.capabilities.gyroscope
    }

    /// Register the callback that receives fired gestures, replacing any previous one.
    pub fn set_sink(&mut self, sink: impl FnMut(&Gesture) + Send + 'static) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    /// Start recognizing. Same as [`GestureEngine::resume`].
    pub fn begin(&mut self) -> bool {
        self.resume()
    }

    /// Start or continue recognizing. Returns false, and stays suspended, when
    /// the device has no usable motion sensor.
    pub fn resume(&mut self) -> bool {
        if !self.capabilities.is_usable() {
            warn!("no accelerometer or gyroscope available; engine stays suspended");
            self.state = EngineState::Suspended;
            return false;
        }
        if !self.capabilities.gyroscope {
            warn!("no gyroscope; world directions use a planar gravity estimate");
        }

        if self.config.resume_policy == ResumePolicy::Reset {
            self.current.clear();
            self.spikes.clear();
            self.candidates.discard();
        }

        self.max_spike_angle_cos = self.config.max_spike_angle_cos();
        self.criteria = MatchCriteria {
            max_angle_cos: self.config.max_gesture_angle_cos(),
            min_magnitude: self.config.min_gesture_magnitude,
        };
        self.attitude.reseed();
        self.state = EngineState::Running;
        self.calibrate();

        debug!(policy = ?self.config.resume_policy, "gesture engine running");
        true
    }

    /// Stop processing ticks. In-flight state is handled on resume.
    pub fn suspend(&mut self) {
        self.state = EngineState::Suspended;
        debug!("gesture engine suspended");
    }

    /// Re-base the full attitude's heading on the device's current yaw.
    pub fn calibrate(&mut self) {
        if !self.is_running() || !self.capabilities.gyroscope {
            return;
        }
        self.attitude.calibrate();
    }

    /// Latest user acceleration in world axis convention (Z away from the user).
    pub fn user_accel(&self) -> Vec3 {
        self.user_accel.with_z_flipped()
    }

    pub fn attitude_horizontal(&self) -> Quaternion {
        self.attitude.horizontal()
    }

    pub fn attitude_full(&self) -> Quaternion {
        self.attitude.full()
    }

    /// Closed spikes currently eligible for matching.
    pub fn spike_count(&self) -> usize {
        self.spikes.len()
    }

    pub fn spikes(&self) -> &SpikeLog {
        &self.spikes
    }

    pub fn active_spike(&self) -> Option<&Spike> {
        self.current.is_active().then_some(&self.current)
    }

    pub fn pending_gesture(&self) -> Option<&Gesture> {
        self.candidates.pending()
    }

    pub fn last_fired(&self) -> Option<f64> {
        self.candidates.last_fired()
    }

    pub fn last_telemetry(&self) -> Option<&TickTelemetry> {
        self.last_telemetry.as_ref()
    }

    /// Advance one tick. Returns the gesture fired this tick, if any, after
    /// delivering it to the sink.
    pub fn tick(&mut self, sample: &Sample) -> Option<Gesture> {
        if !self.is_running() {
            return None;
        }
        self.frame += 1;
        let now = sample.time;

        let mut user = self.attitude.update(&sample.reading);
        let above_floor = user.norm() >= self.config.ignore_accel_below;
        if !above_floor {
            user = Vec3::ZERO;
        }
        self.user_accel = user;

        let mut fired = None;
        let mut dot = 0.0;
        let spike_magnitude;

        if !self.current.is_active() {
            if above_floor {
                self.current.begin(user, now);
            }
            spike_magnitude = user.norm();
        } else {
            let cos = self.current.direction.cos_angle(user);
            dot = cos.unwrap_or(0.0);

            if above_floor && cos.is_some_and(|c| c >= self.max_spike_angle_cos) {
                self.current.update(user, now);
                spike_magnitude = 0.0;
            } else {
                let closed = self.current.end(now);
                let (gesture, logged) = self.close_spike(closed, now);
                fired = gesture;
                spike_magnitude = logged;

                // The sample that broke the swing starts the next one.
                self.current.clear();
                if above_floor {
                    self.current.begin(user, now);
                }
            }
        }

        self.spikes.purge_old(now, self.config.max_gesture_age);

        // Nothing logged and nothing in progress: no later spike can replace
        // the pending candidate.
        if fired.is_none() && !self.current.is_active() && self.spikes.is_empty() {
            fired = self.candidates.flush(now);
        }

        let telemetry = TickTelemetry {
            frame: self.frame,
            time: now,
            user_accel: user,
            dot,
            spike_magnitude,
            attitude_euler: self.attitude.full().euler_angles_degrees(),
        };
        trace!(
            frame = telemetry.frame,
            accel = user.norm(),
            dot,
            spike = spike_magnitude,
            "tick"
        );
        self.last_telemetry = Some(telemetry);

        if let Some(gesture) = &fired {
            debug!(
                magnitude = gesture.magnitude(),
                elapsed = gesture.elapsed,
                axis = ?gesture.device_axis(),
                "gesture fired"
            );
            if let Some(sink) = self.sink.as_mut() {
                sink(gesture);
            }
        }
        fired
    }

    /// [`GestureEngine::tick`], then hand this tick's telemetry to `recorder`.
    pub fn tick_recorded<R: Recorder + ?Sized>(
        &mut self,
        sample: &Sample,
        recorder: &mut R,
    ) -> Option<Gesture> {
        let was_running = self.is_running();
        let fired = self.tick(sample);
        if was_running && let Some(telemetry) = &self.last_telemetry {
            recorder.record(telemetry);
        }
        fired
    }

    /// Log a closed spike and try to pair it. Returns the gesture to fire, if
    /// any, and the logged spike's magnitude (0 when it was discarded).
    fn close_spike(&mut self, closed: Spike, now: f64) -> (Option<Gesture>, f64) {
        let magnitude = closed.magnitude();
        if magnitude < self.config.min_spike_magnitude {
            trace!(magnitude, "segment too small for a spike");
            return (self.candidates.flush(now), 0.0);
        }

        self.spikes.add(closed);
        debug!(
            magnitude,
            duration = closed.duration(),
            logged = self.spikes.len(),
            "spike closed"
        );

        let Some(matched) = self.spikes.find_match(&closed, self.criteria) else {
            return (self.candidates.flush(now), magnitude);
        };

        let gesture = self.make_gesture(&closed, &matched, now);
        let fired = match self.candidates.offer(gesture, now) {
            Offer::Fire(g) => Some(g),
            Offer::Held => {
                debug!(magnitude = gesture.magnitude(), "gesture held as wind-up candidate");
                None
            }
            Offer::Cooling => {
                debug!(magnitude = gesture.magnitude(), "gesture dropped during cooldown");
                None
            }
        };
        (fired, magnitude)
    }

    fn make_gesture(&self, closed: &Spike, matched: &Spike, now: f64) -> Gesture {
        let direction = (closed.direction - matched.direction).with_z_flipped();
        Gesture {
            direction_device: direction,
            direction_world_horizontal: self.attitude.horizontal() * direction,
            direction_world_full: self.attitude.full() * direction,
            elapsed: closed.end_time - matched.end_time,
            time: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::attitude::upright_platform_attitude;
    use crate::gesture::Axis;
    use approx::assert_abs_diff_eq;

    const DT: f64 = 0.02;

    fn upright(i: usize, x: f64) -> Sample {
        Sample::fused(
            i as f64 * DT,
            Vec3::new(x, 0.0, 0.0),
            Vec3::DOWN,
            upright_platform_attitude(),
        )
    }

    fn engine(ignore_wind_ups: bool) -> GestureEngine {
        let config = GestureConfig {
            ignore_wind_ups,
            ..Default::default()
        };
        let mut e = GestureEngine::new(config, Capabilities::FULL);
        assert!(e.begin());
        e
    }

    /// Feed x-axis samples starting at tick `start`; returns (tick, gesture) pairs.
    fn feed(e: &mut GestureEngine, start: usize, xs: &[f64]) -> Vec<(usize, Gesture)> {
        xs.iter()
            .enumerate()
            .filter_map(|(k, &x)| e.tick(&upright(start + k, x)).map(|g| (start + k, g)))
            .collect()
    }

    #[test]
    fn test_suspended_engine_ignores_samples() {
        let mut e = GestureEngine::new(GestureConfig::default(), Capabilities::FULL);
        assert_eq!(e.state(), EngineState::Suspended);
        assert!(e.tick(&upright(0, 0.5)).is_none());
        assert!(e.active_spike().is_none());
        assert!(e.last_telemetry().is_none());
    }

    #[test]
    fn test_begin_without_sensors_fails() {
        let mut e = GestureEngine::new(GestureConfig::default(), Capabilities::NONE);
        assert!(!e.begin());
        assert!(!e.is_running());
    }

    #[test]
    fn test_opposing_pair_fires_once() {
        let mut e = engine(false);
        let fired = feed(&mut e, 0, &[0.5, -0.5, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(fired.len(), 1);
        let (tick, g) = fired[0];
        assert_eq!(tick, 2);
        assert_abs_diff_eq!(g.direction_device.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.direction_device.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.direction_device.z, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(g.elapsed, 0.02, epsilon = 1e-12);
        assert!((g.direction_world_horizontal - g.direction_device).norm() < 1e-9);
        assert!((g.direction_world_full - g.direction_device).norm() < 1e-9);
        assert_eq!(g.device_axis(), Some(Axis::Left));
        assert_eq!(e.last_fired(), Some(2.0 * DT));
    }

    #[test]
    fn test_z_axis_is_flipped_into_world_convention() {
        let mut e = engine(false);
        let mut fired = Vec::new();
        for (i, z) in [0.5, -0.5, 0.0].into_iter().enumerate() {
            let s = Sample::fused(
                i as f64 * DT,
                Vec3::new(0.0, 0.0, z),
                Vec3::DOWN,
                upright_platform_attitude(),
            );
            fired.extend(e.tick(&s));
        }
        assert_eq!(fired.len(), 1);
        // Sensor -Z minus sensor +Z is world +Z.
        assert_eq!(fired[0].device_axis(), Some(Axis::Forward));
    }

    #[test]
    fn test_same_direction_spikes_do_not_match() {
        let mut e = engine(false);
        // A sample 90 degrees off ends the first spike, but the pair is not opposing.
        let mut fired = Vec::new();
        let readings = [Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO];
        for (i, v) in readings.into_iter().enumerate() {
            let s = Sample::fused(i as f64 * DT, v, Vec3::DOWN, upright_platform_attitude());
            fired.extend(e.tick(&s));
        }
        assert!(fired.is_empty());
        assert_eq!(e.spike_count(), 2);
    }

    fn at_angle(i: usize, degrees: f64, magnitude: f64) -> Sample {
        let r = degrees.to_radians();
        Sample::fused(
            i as f64 * DT,
            Vec3::new(magnitude * r.cos(), magnitude * r.sin(), 0.0),
            Vec3::DOWN,
            upright_platform_attitude(),
        )
    }

    #[test]
    fn test_sample_within_max_spike_angle_continues_spike() {
        let mut e = engine(false);
        e.tick(&at_angle(0, 0.0, 0.5));
        // 20 degrees off, inside the 30 degree limit.
        assert!(e.tick(&at_angle(1, 20.0, 0.5)).is_none());
        assert_eq!(e.spike_count(), 0);
        let spike = e.active_spike().expect("spike still active");
        assert_abs_diff_eq!(spike.duration(), DT, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_beyond_max_spike_angle_ends_spike() {
        let mut e = engine(false);
        e.tick(&at_angle(0, 0.0, 0.5));
        // 45 degrees off: past the 30 degree spike limit, though inside 60.
        assert!(e.tick(&at_angle(1, 45.0, 0.5)).is_none());
        assert_eq!(e.spike_count(), 1);
        let spike = e.active_spike().expect("new spike started");
        assert_abs_diff_eq!(spike.start_time, DT, epsilon = 1e-12);
    }

    #[test]
    fn test_pair_within_max_gesture_angle_fires() {
        let mut e = engine(false);
        // 50 degrees from exactly opposite, inside the 60 degree limit.
        let mut fired = Vec::new();
        fired.extend(e.tick(&at_angle(0, 0.0, 0.5)));
        fired.extend(e.tick(&at_angle(1, 230.0, 0.5)));
        fired.extend(e.tick(&at_angle(2, 0.0, 0.0)));
        assert_eq!(fired.len(), 1);
        assert_eq!(e.spike_count(), 2);
    }

    #[test]
    fn test_pair_beyond_max_gesture_angle_does_not_fire() {
        let mut e = engine(false);
        // 70 degrees from exactly opposite.
        let mut fired = Vec::new();
        fired.extend(e.tick(&at_angle(0, 0.0, 0.5)));
        fired.extend(e.tick(&at_angle(1, 250.0, 0.5)));
        fired.extend(e.tick(&at_angle(2, 0.0, 0.0)));
        assert!(fired.is_empty());
        assert_eq!(e.spike_count(), 2);
    }

    #[test]
    fn test_small_segments_are_not_logged() {
        let mut e = engine(false);
        let fired = feed(&mut e, 0, &[0.1, -0.1, 0.0]);
        assert!(fired.is_empty());
        assert_eq!(e.spike_count(), 0);
    }

    #[test]
    fn test_wind_up_is_replaced_by_larger_gesture() {
        let mut e = engine(true);
        let fired = feed(&mut e, 0, &[-0.25, 0.25, -1.25, 0.0]);
        assert_eq!(fired.len(), 1);
        let (tick, g) = fired[0];
        assert_eq!(tick, 3);
        assert_abs_diff_eq!(g.magnitude(), 1.5, epsilon = 1e-12);
        assert!(e.pending_gesture().is_none());

        // Nothing else fires once things settle.
        let rest = feed(&mut e, 4, &[0.0; 40]);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_without_wind_up_suppression_both_gestures_fire() {
        let mut e = engine(false);
        let fired = feed(&mut e, 0, &[-0.25, 0.25, -1.25, 0.0]);
        let mags: Vec<f64> = fired.iter().map(|(_, g)| g.magnitude()).collect();
        assert_eq!(mags.len(), 2);
        assert_abs_diff_eq!(mags[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(mags[1], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_isolated_candidate_fires_once_log_drains() {
        let mut e = engine(true);
        let early = feed(&mut e, 0, &[0.5, -0.5, 0.0]);
        assert!(early.is_empty());
        assert!(e.pending_gesture().is_some());

        let later = feed(&mut e, 3, &[0.0; 20]);
        assert_eq!(later.len(), 1);
        let (tick, g) = later[0];
        assert!(tick as f64 * DT <= 0.3, "flushed too late: tick {tick}");
        assert_abs_diff_eq!(g.time, 2.0 * DT, epsilon = 1e-12);
        assert_abs_diff_eq!(g.magnitude(), 1.0, epsilon = 1e-12);
        assert!(e.pending_gesture().is_none());
    }

    #[test]
    fn test_small_segment_flushes_candidate() {
        let mut e = engine(true);
        // 0.15 is a segment below min_spike_magnitude; it ends on the opposite sample.
        let fired = feed(&mut e, 0, &[0.5, -0.5, 0.15, -0.3]);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 3);
    }

    #[test]
    fn test_cooldown_drops_gesture() {
        let mut e = engine(true);
        let first = feed(&mut e, 0, &[0.5, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(first.len(), 1);
        let fired_at = e.last_fired().unwrap();

        // Second flick completes well inside the cooldown.
        let second = feed(&mut e, 20, &[0.5, -0.5, 0.0]);
        assert!(second.is_empty());
        assert!(23.0 * DT - fired_at <= 0.5);
        assert!(e.pending_gesture().is_none());
        assert!(feed(&mut e, 23, &[0.0; 30]).is_empty());

        // After the cooldown, recognition resumes.
        let third = feed(&mut e, 60, &[0.5, -0.5, 0.0]);
        let tail = feed(&mut e, 63, &[0.0; 20]);
        assert_eq!(third.len() + tail.len(), 1);
    }

    #[test]
    fn test_noise_floor_is_idempotent() {
        let mut e = engine(true);
        for i in 0..200 {
            assert!(e.tick(&upright(i, 0.005)).is_none());
            assert_eq!(e.spike_count(), 0);
            assert!(e.active_spike().is_none());
            assert_eq!(e.last_telemetry().unwrap().user_accel, Vec3::ZERO);
        }
    }

    #[test]
    fn test_spike_log_never_holds_stale_entries() {
        let mut e = engine(false);
        let xs = [0.5, -0.5, 0.4, -0.6, 0.0, 0.3, 0.0, 0.0, -0.7, 0.7, 0.0];
        for (i, &x) in xs.iter().chain([0.0; 20].iter()).enumerate() {
            let now = i as f64 * DT;
            e.tick(&upright(i, x));
            for s in e.spikes().iter() {
                assert!(now - s.end_time <= e.config().max_gesture_age);
            }
        }
        assert_eq!(e.spike_count(), 0);
    }

    #[test]
    fn test_resume_reset_clears_in_flight_state() {
        let mut e = engine(true);
        feed(&mut e, 0, &[0.5, -0.5]);
        assert_eq!(e.spike_count(), 1);
        assert!(e.active_spike().is_some());

        e.suspend();
        assert!(e.tick(&upright(2, 0.0)).is_none());
        assert!(e.resume());
        assert_eq!(e.spike_count(), 0);
        assert!(e.active_spike().is_none());
    }

    #[test]
    fn test_resume_recalibrates_at_new_heading() {
        let mut e = engine(false);
        e.tick(&upright(0, 0.0));
        assert_abs_diff_eq!(e.attitude_full().yaw_degrees(), 0.0, epsilon = 1e-9);

        e.suspend();
        assert!(e.resume());
        // The device turned a quarter while suspended.
        let turned = Quaternion::from_axis_angle(Vec3::FORWARD, 90.0) * upright_platform_attitude();
        e.tick(&Sample::fused(DT, Vec3::ZERO, Vec3::DOWN, turned));
        assert_abs_diff_eq!(e.attitude_full().yaw_degrees(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_resume_preserve_keeps_in_flight_state() {
        let config = GestureConfig {
            ignore_wind_ups: false,
            resume_policy: ResumePolicy::Preserve,
            ..Default::default()
        };
        let mut e = GestureEngine::new(config, Capabilities::FULL);
        e.begin();
        feed(&mut e, 0, &[0.5, -0.5]);
        e.suspend();
        e.resume();
        assert_eq!(e.spike_count(), 1);
        // The spike from before the suspension still completes the pair.
        let fired = feed(&mut e, 2, &[0.0]);
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn test_sink_receives_fired_gestures() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let mut e = engine(false);
        let sink = Arc::clone(&received);
        e.set_sink(move |g| sink.lock().unwrap().push(*g));

        let fired = feed(&mut e, 0, &[0.5, -0.5, 0.0]);
        let got = received.lock().unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0], fired[0].1);
    }

    #[test]
    fn test_accelerometer_only_mode() {
        let config = GestureConfig {
            ignore_wind_ups: false,
            ..Default::default()
        };
        let mut e = GestureEngine::new(config, Capabilities::ACCELEROMETER_ONLY);
        assert!(e.begin());
        assert!(!e.has_gyroscope());

        let mut fired = Vec::new();
        for (i, x) in [0.0, 0.5, -0.5, 0.0, 0.0].into_iter().enumerate() {
            let s = Sample::raw(i as f64 * DT, Vec3::new(x, -1.0, 0.0));
            fired.extend(e.tick(&s));
        }
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].device_axis(), Some(Axis::Left));
        assert!(fired[0].magnitude() > 0.9);
    }

    #[test]
    fn test_telemetry_and_recorder() {
        let mut e = engine(false);
        let mut rows: Vec<TickTelemetry> = Vec::new();
        for (i, x) in [0.5, 0.6, -0.5, 0.0].into_iter().enumerate() {
            e.tick_recorded(&upright(i, x), &mut rows);
        }
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].frame, 1);
        // Continuing sample: same direction.
        assert_abs_diff_eq!(rows[1].dot, 1.0, epsilon = 1e-12);
        // Opposite sample closes the spike and logs its magnitude.
        assert_abs_diff_eq!(rows[2].dot, -1.0, epsilon = 1e-12);
        assert!(rows[2].spike_magnitude > 0.5);
        // Zero sample: undefined angle is reported as 0.
        assert_eq!(rows[3].dot, 0.0);
        assert_eq!(e.last_telemetry(), rows.last());
    }

    #[test]
    fn test_user_accel_reports_world_z() {
        let mut e = engine(false);
        e.tick(&Sample::fused(
            0.0,
            Vec3::new(0.1, 0.2, 0.3),
            Vec3::DOWN,
            upright_platform_attitude(),
        ));
        assert_eq!(e.user_accel(), Vec3::new(0.1, 0.2, -0.3));
    }
}
