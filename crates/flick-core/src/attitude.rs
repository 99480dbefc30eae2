//! Device attitude in the two world projections a gesture is labelled with.
//!
//! The horizontal projection only removes the device's tilt, so it is
//! available from gravity alone. The full projection needs the gyroscope and
//! is measured relative to a calibrated heading.

use crate::quaternion::Quaternion;
use crate::sample::Reading;
use crate::vector::Vec3;

/// Platform attitude of a device held upright in portrait, screen facing the
/// user. Maps onto the identity world attitude.
pub fn upright_platform_attitude() -> Quaternion {
    Quaternion::from_axis_angle(Vec3::RIGHT, 90.0)
}

#[derive(Clone, Debug)]
pub struct AttitudeTracker {
    gravity_filter: f64,
    /// Re-bases the platform frame (device flat, screen up) onto the upright pose.
    base: Quaternion,
    calibration_yaw: f64,
    calibrate_pending: bool,
    rotation: Option<Quaternion>,
    gravity: Option<Vec3>,
    horizontal: Quaternion,
    full: Quaternion,
}

impl AttitudeTracker {
    pub fn new(gravity_filter: f64) -> Self {
        Self {
            gravity_filter,
            base: Quaternion::from_euler_degrees(90.0, 0.0, 0.0),
            calibration_yaw: 0.0,
            calibrate_pending: false,
            rotation: None,
            gravity: None,
            horizontal: Quaternion::identity(),
            full: Quaternion::identity(),
        }
    }

    /// Yaw-only attitude.
    pub fn horizontal(&self) -> Quaternion {
        self.horizontal
    }

    /// Full attitude relative to the calibrated heading.
    pub fn full(&self) -> Quaternion {
        self.full
    }

    pub fn gravity(&self) -> Option<Vec3> {
        self.gravity
    }

    pub fn calibration_yaw(&self) -> f64 {
        self.calibration_yaw
    }

    /// Forget the gravity estimate and the last seen rotation, so the next
    /// reading reseeds the filter and a calibration waits for a fresh heading.
    pub fn reseed(&mut self) {
        self.gravity = None;
        self.rotation = None;
    }

    /// Zero the heading at the device's current yaw, or at the next fused
    /// reading if none has been seen yet.
    pub fn calibrate(&mut self) {
        match self.rotation {
            Some(rot) => {
                self.calibration_yaw = rot.yaw_degrees();
                self.calibrate_pending = false;
            }
            None => self.calibrate_pending = true,
        }
    }

    /// Update both projections from `reading`; returns the user acceleration
    /// (gravity removed) in device axes.
    pub fn update(&mut self, reading: &Reading) -> Vec3 {
        match *reading {
            Reading::Fused {
                user_accel,
                gravity,
                attitude,
            } => {
                self.gravity = Some(gravity);
                self.horizontal = Quaternion::from_to_rotation(gravity.with_z_flipped(), Vec3::DOWN);

                let rot = self.base * attitude.flip_handedness();
                self.rotation = Some(rot);
                if self.calibrate_pending {
                    self.calibrate();
                }
                self.full = Quaternion::from_axis_angle(Vec3::UP, -self.calibration_yaw) * rot;
                user_accel
            }
            Reading::Raw { accel } => {
                let gravity = match self.gravity {
                    Some(g) => g.lerp(accel, self.gravity_filter),
                    None => accel,
                };
                self.gravity = Some(gravity);
                self.horizontal = Quaternion::from_to_rotation(gravity.with_z_flipped(), Vec3::DOWN);
                self.full = self.horizontal;
                accel - gravity
            }
        }
    }
}
