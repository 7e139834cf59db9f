//! Math utilities and types
//!
//! Provides the value types used by the physics core (vector, quaternion,
//! matrix) and the stateless function library built on top of them.
//!
//! Conventions: Y is up, Z is forward, matrices act on column vectors
//! (`M × v`) and are stored row-major.

pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod rotation;
pub mod transform;
pub mod vector;

pub use error::MathError;
pub use matrix::Matrix;
pub use quaternion::Quaternion;
pub use vector::{Axis, Vector};

/// nalgebra 3D vector, used at interop boundaries
pub type Vec3 = nalgebra::Vector3<f32>;

/// nalgebra unit quaternion, used at interop boundaries
pub type Quat = nalgebra::UnitQuaternion<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Tolerance used for degenerate-direction checks
    pub const EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation with `t` clamped to [0, 1]
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        let t = clamp(t, 0.0, 1.0);
        a + (b - a) * t
    }
}
