use std::fmt;

use serde::{Deserialize, Serialize};

use crate::vector::Vec3;

/// One of the six axis-aligned flick directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Left,
    Right,
    Up,
    Down,
    Forward,
    Back,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::Left,
        Axis::Right,
        Axis::Up,
        Axis::Down,
        Axis::Forward,
        Axis::Back,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Left => "left",
            Axis::Right => "right",
            Axis::Up => "up",
            Axis::Down => "down",
            Axis::Forward => "forward",
            Axis::Back => "back",
        }
    }

    pub fn unit(&self) -> Vec3 {
        match self {
            Axis::Left => Vec3::LEFT,
            Axis::Right => Vec3::RIGHT,
            Axis::Up => Vec3::UP,
            Axis::Down => Vec3::DOWN,
            Axis::Forward => Vec3::FORWARD,
            Axis::Back => Vec3::BACK,
        }
    }

    pub fn opposite(&self) -> Axis {
        match self {
            Axis::Left => Axis::Right,
            Axis::Right => Axis::Left,
            Axis::Up => Axis::Down,
            Axis::Down => Axis::Up,
            Axis::Forward => Axis::Back,
            Axis::Back => Axis::Forward,
        }
    }

    /// The axis closest to `v`. None for a zero vector or when the two
    /// largest components tie.
    pub fn closest(v: Vec3) -> Option<Axis> {
        let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
        if ax > ay && ax > az {
            Some(if v.x > 0.0 { Axis::Right } else { Axis::Left })
        } else if ay > ax && ay > az {
            Some(if v.y > 0.0 { Axis::Up } else { Axis::Down })
        } else if az > ax && az > ay {
            Some(if v.z > 0.0 { Axis::Forward } else { Axis::Back })
        } else {
            None
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Axis::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown axis '{s}' (expected one of left, right, up, down, forward, back)"))
    }
}

/// A recognized flick. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    /// Relative to the device.
    pub direction_device: Vec3,
    /// World space with the device's tilt removed (yaw only).
    pub direction_world_horizontal: Vec3,
    /// World space, relative to the calibrated heading.
    pub direction_world_full: Vec3,
    /// Seconds between the ends of the two matched spikes.
    pub elapsed: f64,
    /// Timestamp of the tick that produced the match.
    pub time: f64,
}

impl Gesture {
    pub fn magnitude(&self) -> f64 {
        self.direction_device.norm()
    }

    pub fn device_axis(&self) -> Option<Axis> {
        Axis::closest(self.direction_device)
    }

    pub fn world_axis(&self) -> Option<Axis> {
        Axis::closest(self.direction_world_full)
    }
}
