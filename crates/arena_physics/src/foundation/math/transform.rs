//! Transform builders and decomposition
//!
//! All builders return 4x4 matrices for column vectors, so a point is moved
//! with `M × [x, y, z, 1]ᵀ` and translation lives in the last column.

use super::{MathError, Matrix, Vector};

/// Translation by `offset`
pub fn translation(offset: Vector) -> Matrix {
    Matrix::from_4x4([
        1.0, 0.0, 0.0, offset.x,
        0.0, 1.0, 0.0, offset.y,
        0.0, 0.0, 1.0, offset.z,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Non-uniform scale
pub fn scale(factors: Vector) -> Matrix {
    Matrix::from_4x4([
        factors.x, 0.0, 0.0, 0.0,
        0.0, factors.y, 0.0, 0.0,
        0.0, 0.0, factors.z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation of `angle` radians about +Y
pub fn rotation_yaw(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_4x4([
        c, 0.0, s, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -s, 0.0, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation of `angle` radians about +X
pub fn rotation_pitch(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_4x4([
        1.0, 0.0, 0.0, 0.0,
        0.0, c, -s, 0.0,
        0.0, s, c, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation of `angle` radians about +Z
pub fn rotation_roll(angle: f32) -> Matrix {
    let (s, c) = angle.sin_cos();
    Matrix::from_4x4([
        c, -s, 0.0, 0.0,
        s, c, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Euler rotation composed as `yaw ∘ pitch ∘ roll` (roll applied first).
///
/// Camera and movement code depend on this exact order.
pub fn rotation_euler(yaw: f32, pitch: f32, roll: f32) -> Result<Matrix, MathError> {
    rotation_yaw(yaw)
        .multiply(&rotation_pitch(pitch))?
        .multiply(&rotation_roll(roll))
}

/// Translation column of a 4x4 transform
pub fn extract_position(m: &Matrix) -> Result<Vector, MathError> {
    require_4x4(m, "extract_position")?;
    Ok(Vector::with_w(m.get(0, 3)?, m.get(1, 3)?, m.get(2, 3)?, 1.0))
}

/// Per-axis scale of a 4x4 transform (lengths of the basis columns)
pub fn extract_scale(m: &Matrix) -> Result<Vector, MathError> {
    require_4x4(m, "extract_scale")?;
    let column = |c: usize| -> Result<f32, MathError> {
        Ok(Vector::new(m.get(0, c)?, m.get(1, c)?, m.get(2, c)?).magnitude())
    };
    Ok(Vector::new(column(0)?, column(1)?, column(2)?))
}

fn require_4x4(m: &Matrix, operation: &str) -> Result<(), MathError> {
    if m.is_shape(4, 4) {
        Ok(())
    } else {
        Err(MathError::InvalidOperation(format!(
            "{} needs a 4x4 matrix, got {}x{}",
            operation,
            m.rows(),
            m.cols()
        )))
    }
}
