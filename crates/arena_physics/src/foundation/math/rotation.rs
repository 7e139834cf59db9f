//! Quaternion construction and extraction
//!
//! Builders used by movement, camera, AI and projectile code to turn
//! directions and bases into rotations.

use super::constants::EPSILON;
use super::{MathError, Matrix, Quaternion, Vector};

/// Rotation composed as `yaw ∘ pitch ∘ roll`, matching
/// [`transform::rotation_euler`](super::transform::rotation_euler).
pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Quaternion {
    Quaternion::from_axis_angle(Vector::UNIT_Y, yaw)
        * Quaternion::from_axis_angle(Vector::UNIT_X, pitch)
        * Quaternion::from_axis_angle(Vector::UNIT_Z, roll)
}

/// Shortest rotation taking direction `from` onto direction `to`.
///
/// Parallel inputs give the identity. Anti-parallel inputs give a half turn
/// about an axis orthogonal to `from`; the axis is built from whichever of
/// `|from.x|` and `|from.z|` is larger.
pub fn from_to_rotation(from: Vector, to: Vector) -> Quaternion {
    let from = from.normalize();
    let to = to.normalize();
    let d = from.dot(&to);

    if d >= 1.0 - EPSILON {
        return Quaternion::IDENTITY;
    }

    if d <= -1.0 + EPSILON {
        let orthogonal = if from.x.abs() > from.z.abs() {
            Vector::new(-from.y, from.x, 0.0)
        } else {
            Vector::new(0.0, -from.z, from.y)
        };
        let axis = orthogonal.normalize();
        return Quaternion::new(axis.x, axis.y, axis.z, 0.0);
    }

    let axis = from.cross(&to);
    Quaternion::new(axis.x, axis.y, axis.z, 1.0 + d).normalize()
}

/// Rotation whose +Z points along `forward` and whose +Y leans toward `up`
pub fn look_rotation(forward: Vector, up: Vector) -> Quaternion {
    let forward = forward.normalize();
    let right = up.cross(&forward).normalize();
    let up = forward.cross(&right);

    from_basis([
        [right.x, up.x, forward.x],
        [right.y, up.y, forward.y],
        [right.z, up.z, forward.z],
    ])
}

/// Extract the rotation of a 3x3 or 4x4 matrix (upper-left block)
pub fn from_matrix(m: &Matrix) -> Result<Quaternion, MathError> {
    if m.rows() < 3 || m.cols() < 3 {
        return Err(MathError::InvalidOperation(format!(
            "rotation extraction needs at least a 3x3 matrix, got {}x{}",
            m.rows(),
            m.cols()
        )));
    }

    let mut basis = [[0.0f32; 3]; 3];
    for (r, row) in basis.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = m.get(r, c)?;
        }
    }
    Ok(from_basis(basis))
}

/// 4x4 rotation matrix for `q`
pub fn to_matrix(q: Quaternion) -> Matrix {
    let (x, y, z, w) = (q.x, q.y, q.z, q.w);
    Matrix::from_4x4([
        1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - z * w), 2.0 * (x * z + y * w), 0.0,
        2.0 * (x * y + z * w), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - x * w), 0.0,
        2.0 * (x * z - y * w), 2.0 * (y * z + x * w), 1.0 - 2.0 * (x * x + y * y), 0.0,
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Trace method. The branch order decides which component is used as the
/// pivot and must stay as is: axis-aligned half turns sit exactly on the
/// tie-breaks.
fn from_basis(m: [[f32; 3]; 3]) -> Quaternion {
    let trace = m[0][0] + m[1][1] + m[2][2];

    if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        Quaternion::new(
            (m[2][1] - m[1][2]) / s,
            (m[0][2] - m[2][0]) / s,
            (m[1][0] - m[0][1]) / s,
            0.25 * s,
        )
    } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
        let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
        Quaternion::new(
            0.25 * s,
            (m[0][1] + m[1][0]) / s,
            (m[0][2] + m[2][0]) / s,
            (m[2][1] - m[1][2]) / s,
        )
    } else if m[1][1] > m[2][2] {
        let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
        Quaternion::new(
            (m[0][1] + m[1][0]) / s,
            0.25 * s,
            (m[1][2] + m[2][1]) / s,
            (m[0][2] - m[2][0]) / s,
        )
    } else {
        let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
        Quaternion::new(
            (m[0][2] + m[2][0]) / s,
            (m[1][2] + m[2][1]) / s,
            0.25 * s,
            (m[1][0] - m[0][1]) / s,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn assert_same_rotation(a: Quaternion, b: Quaternion) {
        // q and -q describe the same rotation
        assert_relative_eq!(a.dot(&b).abs(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_from_matrix_branch_positive_trace() {
        let q = Quaternion::from_axis_angle(Vector::new(0.3, 1.0, -0.2), 0.6);
        let m = to_matrix(q);
        assert!(m.get(0, 0).unwrap() + m.get(1, 1).unwrap() + m.get(2, 2).unwrap() > 0.0);
        assert_same_rotation(from_matrix(&m).unwrap(), q);
    }

    #[test]
    fn test_from_matrix_branch_x_pivot() {
        for q in [
            Quaternion::from_axis_angle(Vector::UNIT_X, PI),
            Quaternion::from_axis_angle(Vector::new(1.0, 0.1, 0.05), 170f32.to_radians()),
        ] {
            assert_same_rotation(from_matrix(&to_matrix(q)).unwrap(), q);
        }
    }

    #[test]
    fn test_from_matrix_branch_y_pivot() {
        for q in [
            Quaternion::from_axis_angle(Vector::UNIT_Y, PI),
            Quaternion::from_axis_angle(Vector::new(0.05, 1.0, 0.1), 170f32.to_radians()),
        ] {
            assert_same_rotation(from_matrix(&to_matrix(q)).unwrap(), q);
        }
    }

    #[test]
    fn test_from_matrix_branch_z_pivot() {
        for q in [
            Quaternion::from_axis_angle(Vector::UNIT_Z, PI),
            Quaternion::from_axis_angle(Vector::new(0.1, 0.05, 1.0), 170f32.to_radians()),
        ] {
            assert_same_rotation(from_matrix(&to_matrix(q)).unwrap(), q);
        }
    }

    #[test]
    fn test_from_matrix_rejects_small_input() {
        let m = Matrix::zeros(4, 1);
        assert!(matches!(from_matrix(&m), Err(MathError::InvalidOperation(_))));
    }

    #[test]
    fn test_to_matrix_agrees_with_rotate() {
        let q = Quaternion::from_axis_angle(Vector::new(-1.0, 2.0, 0.5), 2.2);
        let v = Vector::new(1.5, -0.5, 3.0);
        let by_matrix = to_matrix(q).transform_direction(v).unwrap();
        assert_relative_eq!(by_matrix, q.rotate(v), epsilon = 1e-4);
    }

    #[test]
    fn test_from_to_same_direction_is_identity() {
        let q = from_to_rotation(Vector::new(0.0, 0.0, 2.0), Vector::UNIT_Z);
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_from_to_opposite_direction_is_half_turn() {
        for from in [Vector::UNIT_Z, Vector::UNIT_X, Vector::new(0.3, 0.4, -0.8)] {
            let q = from_to_rotation(from, -from);
            assert_relative_eq!(q.w, 0.0, epsilon = EPSILON);
            let axis = Vector::new(q.x, q.y, q.z);
            assert_relative_eq!(axis.dot(&from.normalize()), 0.0, epsilon = EPSILON);
            assert_relative_eq!(q.rotate(from.normalize()), -from.normalize(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_from_to_general_case() {
        let from = Vector::new(1.0, 0.0, 0.0);
        let to = Vector::new(0.0, 1.0, 1.0);
        let q = from_to_rotation(from, to);
        assert_relative_eq!(q.rotate(from), to.normalize(), epsilon = 1e-4);
    }

    #[test]
    fn test_look_rotation_forward_is_identity() {
        let q = look_rotation(Vector::UNIT_Z, Vector::UP);
        assert_same_rotation(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_look_rotation_points_z_axis() {
        let forward = Vector::new(1.0, 0.0, 1.0);
        let q = look_rotation(forward, Vector::UP);
        assert_relative_eq!(q.rotate(Vector::UNIT_Z), forward.normalize(), epsilon = 1e-4);
        assert_relative_eq!(q.rotate(Vector::UP), Vector::UP, epsilon = 1e-4);
    }

    #[test]
    fn test_euler_order() {
        let q = from_euler(HALF_PI, 0.3, -0.7);
        let expected = Quaternion::from_axis_angle(Vector::UNIT_Y, HALF_PI)
            * (Quaternion::from_axis_angle(Vector::UNIT_X, 0.3)
                * Quaternion::from_axis_angle(Vector::UNIT_Z, -0.7));
        assert_relative_eq!(q, expected, epsilon = EPSILON);

        let m = crate::foundation::math::transform::rotation_euler(HALF_PI, 0.3, -0.7).unwrap();
        assert_same_rotation(from_matrix(&m).unwrap(), q);
    }
}
