//! Homogeneous 3D vector

use super::Vec3;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Cartesian axis selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X axis (right)
    X,
    /// Y axis (up)
    Y,
    /// Z axis (forward)
    Z,
}

/// 3D vector with a homogeneous `w` coordinate.
///
/// `w` only matters when the vector is fed through a 4x4 transform
/// (1 for points, 0 for directions). Ordinary arithmetic works on `xyz` and
/// carries the left operand's `w` through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// Homogeneous component
    #[serde(default)]
    pub w: f32,
}

impl Vector {
    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit scale
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// +X
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// +Y, the world up axis
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// +Z, the world forward axis
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Alias for [`Vector::UNIT_Y`]
    pub const UP: Self = Self::UNIT_Y;

    /// Create a vector with `w = 0`
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Create a vector with an explicit homogeneous component
    pub const fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a vector with all three components set to `value`
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Dot product (ignores `w`)
    pub fn dot(&self, other: &Vector) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product (right-handed)
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Squared Euclidean length
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Euclidean distance between two points
    pub fn distance(a: Vector, b: Vector) -> f32 {
        (a - b).magnitude()
    }

    /// Scale to unit length.
    ///
    /// The zero vector has no direction; normalizing it divides by zero and
    /// yields NaN components. Callers must rule that case out.
    pub fn normalize(&self) -> Vector {
        *self / self.magnitude()
    }

    /// Mirror this vector about the plane with normal `normal`:
    /// `v - 2(v·n)n`. `normal` is expected to be unit length.
    pub fn reflect(&self, normal: &Vector) -> Vector {
        *self - *normal * (2.0 * self.dot(normal))
    }

    /// Linear interpolation from `a` to `b` with `t` clamped to [0, 1]
    pub fn lerp(a: Vector, b: Vector, t: f32) -> Vector {
        let t = t.clamp(0.0, 1.0);
        a + (b - a) * t
    }

    /// Per-component product
    pub fn component_mul(&self, other: &Vector) -> Vector {
        Vector::with_w(self.x * other.x, self.y * other.y, self.z * other.z, self.w)
    }

    /// Per-component absolute value
    pub fn abs(&self) -> Vector {
        Vector::with_w(self.x.abs(), self.y.abs(), self.z.abs(), self.w)
    }

    /// Largest of the three components
    pub fn max_component(&self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    /// Read a single axis
    pub fn component(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with one axis replaced
    pub fn with_component(&self, axis: Axis, value: f32) -> Vector {
        let mut out = *self;
        match axis {
            Axis::X => out.x = value,
            Axis::Y => out.y = value,
            Axis::Z => out.z = value,
        }
        out
    }

    /// Drop the homogeneous component into an nalgebra vector
    pub fn to_nalgebra(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for Vector {
    fn from(v: Vec3) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<Vector> for Vec3 {
    fn from(v: Vector) -> Self {
        v.to_nalgebra()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::with_w(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::with_w(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        Vector::with_w(self.x * rhs, self.y * rhs, self.z * rhs, self.w)
    }
}

impl Div<f32> for Vector {
    type Output = Vector;

    fn div(self, rhs: f32) -> Vector {
        Vector::with_w(self.x / rhs, self.y / rhs, self.z / rhs, self.w)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::with_w(-self.x, -self.y, -self.z, self.w)
    }
}

impl approx::AbsDiffEq for Vector {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl approx::RelativeEq for Vector {
    fn default_max_relative() -> f32 {
        f32::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
