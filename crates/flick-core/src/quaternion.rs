use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::constants::EPSILON;
use crate::vector::Vec3;

/// Unit quaternion representing a rotation.
///
/// Always normalized. Composition follows the Hamilton product, so `a * b`
/// applies `b` first and then `a`. Euler helpers use the Z-then-X-then-Y
/// order of the world frame (yaw about Y is applied last).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        (self.w - other.w).abs() < EPSILON
            && (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create a new quaternion, automatically normalized.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }.normalize()
    }

    /// Identity quaternion (1, 0, 0, 0).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Normalize to unit length. Returns identity if near-zero magnitude.
    pub fn normalize(self) -> Self {
        let norm = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if norm < EPSILON {
            return Self::identity();
        }
        Self {
            w: self.w / norm,
            x: self.x / norm,
            y: self.y / norm,
            z: self.z / norm,
        }
    }

    /// 4D dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Inverse rotation (for unit quaternions).
    pub fn conjugate(self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotation of `degrees` about `axis`. A zero axis yields identity.
    pub fn from_axis_angle(axis: Vec3, degrees: f64) -> Self {
        let Some(axis) = axis.normalized() else {
            return Self::identity();
        };
        let half = degrees.to_radians() / 2.0;
        let s = half.sin();
        Self {
            w: half.cos(),
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Rotation about Z by `z`, then X by `x`, then Y by `y` (degrees).
    pub fn from_euler_degrees(x: f64, y: f64, z: f64) -> Self {
        Self::from_axis_angle(Vec3::UP, y)
            * Self::from_axis_angle(Vec3::RIGHT, x)
            * Self::from_axis_angle(Vec3::FORWARD, z)
    }

    /// Inverse of [`Quaternion::from_euler_degrees`], each angle in [0, 360).
    pub fn euler_angles_degrees(self) -> Vec3 {
        let Self { w, x, y, z } = self;
        let sin_x = (2.0 * (w * x - y * z)).clamp(-1.0, 1.0);
        let ex = sin_x.asin();
        let ey = (2.0 * (w * y + x * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let ez = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (x * x + z * z));
        Vec3::new(
            ex.to_degrees().rem_euclid(360.0),
            ey.to_degrees().rem_euclid(360.0),
            ez.to_degrees().rem_euclid(360.0),
        )
    }

    /// Heading about the world Y axis, in degrees. Range: (-180, 180].
    pub fn yaw_degrees(self) -> f64 {
        let Self { w, x, y, z } = self;
        (2.0 * (w * y + x * z))
            .atan2(1.0 - 2.0 * (x * x + y * y))
            .to_degrees()
    }

    /// Shortest-arc rotation taking direction `from` onto direction `to`.
    ///
    /// Zero-length inputs yield identity. Exactly opposite inputs rotate 180°
    /// about an arbitrary perpendicular axis.
    pub fn from_to_rotation(from: Vec3, to: Vec3) -> Self {
        let (Some(a), Some(b)) = (from.normalized(), to.normalized()) else {
            return Self::identity();
        };
        let d = a.dot(b);
        if d >= 1.0 - EPSILON {
            return Self::identity();
        }
        if d <= -1.0 + EPSILON {
            let mut axis = Vec3::RIGHT.cross(a);
            if axis.is_zero() {
                axis = Vec3::UP.cross(a);
            }
            return Self::from_axis_angle(axis, 180.0);
        }
        let c = a.cross(b);
        Self::new(1.0 + d, c.x, c.y, c.z)
    }

    /// Mirror a right-handed platform attitude into the left-handed world frame.
    pub fn flip_handedness(self) -> Self {
        Self {
            w: -self.w,
            x: self.x,
            y: self.y,
            z: -self.z,
        }
    }

    /// Apply this rotation to a vector.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Convert to [w, x, y, z] array for serialization.
    pub fn to_array(self) -> [f64; 4] {
        [self.w, self.x, self.y, self.z]
    }

    /// Create from [w, x, y, z] array.
    pub fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

/// Hamilton product (quaternion multiplication).
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn random_rotation(rng: &mut SmallRng) -> Quaternion {
        Quaternion::from_euler_degrees(
            rng.random_range(-80.0..80.0),
            rng.random_range(-180.0..180.0),
            rng.random_range(-180.0..180.0),
        )
    }

    fn assert_unit(q: Quaternion) {
        let norm = (q.w * q.w + q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
        assert!(
            (norm - 1.0).abs() < 1e-10,
            "quaternion not unit: norm = {norm}"
        );
    }

    fn assert_approx_eq(a: Quaternion, b: Quaternion, tol: f64) {
        // q and -q are the same rotation
        let direct = (a.w - b.w).abs().max((a.x - b.x).abs()).max((a.y - b.y).abs()).max((a.z - b.z).abs());
        let antipodal = (a.w + b.w).abs().max((a.x + b.x).abs()).max((a.y + b.y).abs()).max((a.z + b.z).abs());
        let min_diff = direct.min(antipodal);
        assert!(
            min_diff < tol,
            "quaternions not approx equal: {a:?} vs {b:?} (min_diff = {min_diff})"
        );
    }

    fn assert_vec_eq(a: Vec3, b: Vec3, tol: f64) {
        assert!((a - b).norm() < tol, "vectors differ: {a:?} vs {b:?}");
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert_unit(q);
        assert!((q.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_normalize_near_zero() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_rotate_about_x() {
        let q = Quaternion::from_axis_angle(Vec3::RIGHT, 90.0);
        assert_vec_eq(q * Vec3::UP, Vec3::FORWARD, 1e-12);
    }

    #[test]
    fn test_yaw_turns_forward_to_right() {
        let q = Quaternion::from_euler_degrees(0.0, 90.0, 0.0);
        assert_vec_eq(q * Vec3::FORWARD, Vec3::RIGHT, 1e-12);
        assert!((q.yaw_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_euler_roundtrip() {
        let mut rng = rng();
        for _ in 0..50 {
            let q = random_rotation(&mut rng);
            let e = q.euler_angles_degrees();
            let back = Quaternion::from_euler_degrees(e.x, e.y, e.z);
            assert_approx_eq(q, back, 1e-9);
        }
    }

    #[test]
    fn test_euler_known_angles() {
        let e = Quaternion::from_euler_degrees(30.0, -45.0, 10.0).euler_angles_degrees();
        assert!((e.x - 30.0).abs() < 1e-9);
        assert!((e.y - 315.0).abs() < 1e-9);
        assert!((e.z - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_to_rotation() {
        let mut rng = rng();
        for _ in 0..50 {
            let from = random_rotation(&mut rng) * Vec3::FORWARD;
            let to = random_rotation(&mut rng) * Vec3::UP;
            let q = Quaternion::from_to_rotation(from, to);
            assert_unit(q);
            assert_vec_eq(q * from, to, 1e-9);
        }
    }

    #[test]
    fn test_from_to_rotation_degenerate() {
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::DOWN, Vec3::DOWN),
            Quaternion::identity()
        );
        assert_eq!(
            Quaternion::from_to_rotation(Vec3::ZERO, Vec3::DOWN),
            Quaternion::identity()
        );
        let flip = Quaternion::from_to_rotation(Vec3::UP, Vec3::DOWN);
        assert_vec_eq(flip * Vec3::UP, Vec3::DOWN, 1e-12);
        let flip = Quaternion::from_to_rotation(Vec3::RIGHT, Vec3::LEFT);
        assert_vec_eq(flip * Vec3::RIGHT, Vec3::LEFT, 1e-12);
    }

    #[test]
    fn test_flip_handedness_of_identity_is_identity_rotation() {
        let q = Quaternion::identity().flip_handedness();
        assert_approx_eq(q, Quaternion::identity(), 1e-12);
        assert_vec_eq(q * Vec3::RIGHT, Vec3::RIGHT, 1e-12);
    }

    #[test]
    fn test_conjugate_inverts() {
        let mut rng = rng();
        let q = random_rotation(&mut rng);
        let v = Vec3::new(0.3, -1.2, 2.0);
        assert_vec_eq(q.conjugate() * (q * v), v, 1e-12);
    }

    #[test]
    fn test_hamilton_product_identity() {
        let mut rng = rng();
        let q = random_rotation(&mut rng);
        let id = Quaternion::identity();

        assert_approx_eq(q * id, q, 1e-10);
        assert_approx_eq(id * q, q, 1e-10);
    }

    #[test]
    fn test_hamilton_product_composes_rotations() {
        let mut rng = rng();
        let a = random_rotation(&mut rng);
        let b = random_rotation(&mut rng);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq((a * b) * v, a * (b * v), 1e-10);
    }

    #[test]
    fn test_to_from_array_roundtrip() {
        let mut rng = rng();
        let q = random_rotation(&mut rng);
        let q2 = Quaternion::from_array(q.to_array());
        assert_approx_eq(q, q2, 1e-10);
    }
}
