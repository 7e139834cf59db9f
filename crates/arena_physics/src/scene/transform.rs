//! Entity pose: position, rotation and scale

use crate::foundation::math::{constants::EPSILON, rotation, transform, MathError, Matrix, Quaternion, Vector};

/// World-space pose of an entity.
///
/// For entities with a rigid body the position is overwritten from the body
/// at the end of every step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World space position (Y-up)
    pub position: Vector,
    /// World space rotation
    pub rotation: Quaternion,
    /// Per-axis scale factors
    pub scale: Vector,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vector::ONE,
        }
    }
}

impl Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vector) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation from quaternion
    pub fn with_rotation(mut self, rotation: Quaternion) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set rotation from yaw/pitch/roll (radians)
    pub fn with_rotation_euler(mut self, yaw: f32, pitch: f32, roll: f32) -> Self {
        self.rotation = rotation::from_euler(yaw, pitch, roll);
        self
    }

    /// Builder pattern: Set scale (uniform)
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector::splat(scale);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vector) -> Self {
        self.scale = scale;
        self
    }

    /// Local +Z in world space
    pub fn forward(&self) -> Vector {
        self.rotation.rotate(Vector::UNIT_Z)
    }

    /// Local +X in world space
    pub fn right(&self) -> Vector {
        self.rotation.rotate(Vector::UNIT_X)
    }

    /// Turn so that +Z points at `target`; no-op when already there.
    /// Looking straight up or down keeps +Y leaning toward world +Z.
    pub fn look_at(&mut self, target: Vector) {
        let offset = target - self.position;
        if offset.magnitude_squared() <= EPSILON * EPSILON {
            return;
        }
        let up = if Vector::UP.cross(&offset).magnitude_squared() <= EPSILON * EPSILON {
            Vector::UNIT_Z
        } else {
            Vector::UP
        };
        self.rotation = rotation::look_rotation(offset, up);
    }

    /// Model matrix in TRS order
    pub fn to_matrix(&self) -> Result<Matrix, MathError> {
        transform::translation(self.position)
            .multiply(&rotation::to_matrix(self.rotation))?
            .multiply(&transform::scale(self.scale))
    }
}
