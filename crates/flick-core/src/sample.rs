use serde::{Deserialize, Serialize};

use crate::quaternion::Quaternion;
use crate::vector::Vec3;

/// Which motion sensors the host device offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub accelerometer: bool,
    pub gyroscope: bool,
}

impl Capabilities {
    pub const FULL: Self = Self {
        accelerometer: true,
        gyroscope: true,
    };
    pub const ACCELEROMETER_ONLY: Self = Self {
        accelerometer: true,
        gyroscope: false,
    };
    pub const NONE: Self = Self {
        accelerometer: false,
        gyroscope: false,
    };

    /// At least one sensor can drive the engine.
    pub fn is_usable(&self) -> bool {
        self.accelerometer || self.gyroscope
    }
}

/// One sensor reading in device-local axes (Z towards the user).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Reading {
    /// Sensor-fusion output: gravity already separated, attitude from the gyroscope.
    /// `attitude` is the platform's right-handed device-to-world rotation.
    Fused {
        user_accel: Vec3,
        gravity: Vec3,
        attitude: Quaternion,
    },
    /// Accelerometer only; gravity is still part of `accel`.
    Raw { accel: Vec3 },
}

/// A time-stamped reading, supplied once per tick. Times are monotonic seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    pub reading: Reading,
}

impl Sample {
    pub fn fused(time: f64, user_accel: Vec3, gravity: Vec3, attitude: Quaternion) -> Self {
        Self {
            time,
            reading: Reading::Fused {
                user_accel,
                gravity,
                attitude,
            },
        }
    }

    pub fn raw(time: f64, accel: Vec3) -> Self {
        Self {
            time,
            reading: Reading::Raw { accel },
        }
    }
}
