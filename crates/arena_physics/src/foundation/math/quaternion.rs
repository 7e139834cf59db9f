//! Rotation quaternion

use super::{Quat, Vector};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Rotation quaternion `(x, y, z, w)` with `w` as the scalar part.
///
/// Every use site treats the quaternion as unit length; the type does not
/// enforce it. [`Quaternion::inverse`] is only correct under that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// i component
    pub x: f32,
    /// j component
    pub y: f32,
    /// k component
    pub z: f32,
    /// Scalar component
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from raw components
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `angle` radians about `axis` (normalized internally)
    pub fn from_axis_angle(axis: Vector, angle: f32) -> Self {
        let axis = axis.normalize();
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Conjugate `(-x, -y, -z, w)`
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse rotation; the conjugate under the unit-length invariant
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// 4D dot product
    pub fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Norm of the quaternion
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Rescale to unit length
    pub fn normalize(&self) -> Self {
        let m = self.magnitude();
        Self::new(self.x / m, self.y / m, self.z / m, self.w / m)
    }

    /// Rotate a vector with the sandwich product `q·(0,v)·q⁻¹`.
    ///
    /// Only the vector part of the product is kept; `v.w` passes through.
    pub fn rotate(&self, v: Vector) -> Vector {
        let pure = Quaternion::new(v.x, v.y, v.z, 0.0);
        let r = *self * pure * self.inverse();
        Vector::with_w(r.x, r.y, r.z, v.w)
    }

    /// Convert to an nalgebra unit quaternion (renormalizes)
    pub fn to_nalgebra(&self) -> Quat {
        Quat::from_quaternion(nalgebra::Quaternion::new(self.w, self.x, self.y, self.z))
    }
}

impl From<Quat> for Quaternion {
    fn from(q: Quat) -> Self {
        Quaternion::new(q.i, q.j, q.k, q.w)
    }
}

/// Hamilton product. `p * q` applies `q` first, then `p`.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, q: Quaternion) -> Quaternion {
        let p = self;
        Quaternion::new(
            p.w * q.x + p.x * q.w + p.y * q.z - p.z * q.y,
            p.w * q.y - p.x * q.z + p.y * q.w + p.z * q.x,
            p.w * q.z + p.x * q.y - p.y * q.x + p.z * q.w,
            p.w * q.w - p.x * q.x - p.y * q.y - p.z * q.z,
        )
    }
}

impl Mul<Vector> for Quaternion {
    type Output = Vector;

    fn mul(self, v: Vector) -> Vector {
        self.rotate(v)
    }
}

impl approx::AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl approx::RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_rotation_is_noop() {
        let vectors = [
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(-4.5, 0.0, 0.25),
            Vector::ZERO,
        ];
        for v in vectors {
            assert_relative_eq!(Quaternion::IDENTITY.rotate(v), v, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_yaw_quarter_turn() {
        // Right-handed Y-up: +X rotated 90° about +Y lands on -Z
        let q = Quaternion::from_axis_angle(Vector::UNIT_Y, HALF_PI);
        assert_relative_eq!(q * Vector::UNIT_X, Vector::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_axis_is_normalized() {
        let a = Quaternion::from_axis_angle(Vector::new(0.0, 5.0, 0.0), 1.0);
        let b = Quaternion::from_axis_angle(Vector::UNIT_Y, 1.0);
        assert_relative_eq!(a, b, epsilon = EPSILON);
        assert_relative_eq!(a.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_composition_is_associative() {
        let p = Quaternion::from_axis_angle(Vector::new(1.0, 2.0, 0.5), 0.7);
        let q = Quaternion::from_axis_angle(Vector::new(-0.3, 1.0, 1.0), 1.9);
        let r = Quaternion::from_axis_angle(Vector::new(0.0, 0.2, -1.0), -2.4);

        assert_relative_eq!((p * q) * r, p * (q * r), epsilon = EPSILON);
    }

    #[test]
    fn test_composition_is_not_commutative() {
        let p = Quaternion::from_axis_angle(Vector::UNIT_X, HALF_PI);
        let q = Quaternion::from_axis_angle(Vector::UNIT_Y, HALF_PI);
        let pq = p * q;
        let qp = q * p;
        assert!((pq.x - qp.x).abs() > EPSILON || (pq.z - qp.z).abs() > EPSILON);
    }

    #[test]
    fn test_composition_applies_right_operand_first() {
        let yaw = Quaternion::from_axis_angle(Vector::UNIT_Y, HALF_PI);
        let pitch = Quaternion::from_axis_angle(Vector::UNIT_X, HALF_PI);
        let v = Vector::UNIT_Z;

        let composed = (yaw * pitch).rotate(v);
        let sequential = yaw.rotate(pitch.rotate(v));
        assert_relative_eq!(composed, sequential, epsilon = EPSILON);
    }

    #[test]
    fn test_inverse_undoes_rotation() {
        let q = Quaternion::from_axis_angle(Vector::new(1.0, 1.0, 0.0), PI / 3.0);
        let v = Vector::new(0.3, -2.0, 5.0);
        assert_relative_eq!(q.inverse().rotate(q.rotate(v)), v, epsilon = 1e-4);
    }

    #[test]
    fn test_matches_nalgebra() {
        let q = Quaternion::from_axis_angle(Vector::new(0.2, 1.0, -0.4), 1.234);
        let v = Vector::new(3.0, -1.0, 2.0);
        let expected: Vector = (q.to_nalgebra() * v.to_nalgebra()).into();
        assert_relative_eq!(q.rotate(v), expected, epsilon = 1e-4);
    }
}
