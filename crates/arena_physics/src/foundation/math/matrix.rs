//! Row-major, dimension-checked matrix

use super::{MathError, Vector};
use nalgebra::DMatrix;

/// Dense `f32` matrix with dimensions fixed at construction.
///
/// Values are supplied and reported in row-major order. Every constructor
/// copies its input, so a `Matrix` never aliases caller storage. In practice
/// only 4x4 transforms and 4x1 homogeneous columns flow through the physics
/// pipeline, but shapes are checked at runtime rather than in the type.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f32>,
}

impl Matrix {
    /// Build a `rows x cols` matrix from row-major values
    pub fn new(rows: usize, cols: usize, values: &[f32]) -> Result<Self, MathError> {
        let expected = rows * cols;
        if values.len() != expected {
            return Err(MathError::DimensionMismatch {
                rows,
                cols,
                expected,
                actual: values.len(),
            });
        }

        Ok(Self {
            data: DMatrix::from_row_slice(rows, cols, values),
        })
    }

    /// 4x4 matrix from row-major values; the array length fixes the shape
    pub fn from_4x4(values: [f32; 16]) -> Self {
        Self {
            data: DMatrix::from_row_slice(4, 4, &values),
        }
    }

    /// All-zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: DMatrix::zeros(rows, cols),
        }
    }

    /// `n x n` identity
    pub fn identity(n: usize) -> Self {
        Self {
            data: DMatrix::identity(n, n),
        }
    }

    /// Homogeneous 4x1 column `[x, y, z, w]`
    pub fn from_vector(v: Vector) -> Self {
        Self {
            data: DMatrix::from_row_slice(4, 1, &[v.x, v.y, v.z, v.w]),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// `true` when the matrix is `rows x cols`
    pub fn is_shape(&self, rows: usize, cols: usize) -> bool {
        self.rows() == rows && self.cols() == cols
    }

    /// Element at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<f32, MathError> {
        if row >= self.rows() || col >= self.cols() {
            return Err(MathError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.data[(row, col)])
    }

    /// Copy of the values in row-major order
    pub fn values(&self) -> Vec<f32> {
        self.data.transpose().as_slice().to_vec()
    }

    /// Transposed copy
    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Element-wise sum; both operands must share dimensions
    pub fn add(&self, other: &Matrix) -> Result<Self, MathError> {
        if !other.is_shape(self.rows(), self.cols()) {
            return Err(MathError::InvalidOperation(format!(
                "cannot add {}x{} and {}x{} matrices",
                self.rows(),
                self.cols(),
                other.rows(),
                other.cols()
            )));
        }
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Matrix product `self × other`; requires `self.cols == other.rows`
    pub fn multiply(&self, other: &Matrix) -> Result<Self, MathError> {
        if self.cols() != other.rows() {
            return Err(MathError::InvalidOperation(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows(),
                self.cols(),
                other.rows(),
                other.cols()
            )));
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Read a 4x1 column back as a vector (keeps `w`)
    pub fn to_vector(&self) -> Result<Vector, MathError> {
        if !self.is_shape(4, 1) {
            return Err(MathError::InvalidOperation(format!(
                "vector conversion needs a 4x1 matrix, got {}x{}",
                self.rows(),
                self.cols()
            )));
        }
        Ok(Vector::with_w(
            self.data[(0, 0)],
            self.data[(1, 0)],
            self.data[(2, 0)],
            self.data[(3, 0)],
        ))
    }

    /// Apply this transform to a point (`w = 1`)
    pub fn transform_point(&self, point: Vector) -> Result<Vector, MathError> {
        let column = Matrix::from_vector(Vector::with_w(point.x, point.y, point.z, 1.0));
        let out = self.multiply(&column)?.to_vector()?;
        Ok(Vector::with_w(out.x, out.y, out.z, point.w))
    }

    /// Apply this transform to a direction (`w = 0`, translation ignored)
    pub fn transform_direction(&self, direction: Vector) -> Result<Vector, MathError> {
        let column = Matrix::from_vector(Vector::with_w(direction.x, direction.y, direction.z, 0.0));
        let out = self.multiply(&column)?.to_vector()?;
        Ok(Vector::with_w(out.x, out.y, out.z, direction.w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_4x4(offset: f32) -> Matrix {
        let values: Vec<f32> = (0..16).map(|i| i as f32 * 0.5 + offset).collect();
        Matrix::new(4, 4, &values).unwrap()
    }

    #[test]
    fn test_construction_checks_value_count() {
        let err = Matrix::new(2, 2, &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(
            err,
            MathError::DimensionMismatch { rows: 2, cols: 2, expected: 4, actual: 3 }
        );
    }

    #[test]
    fn test_row_major_layout() {
        let m = Matrix::new(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(0, 2).unwrap(), 3.0);
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
        assert_eq!(m.values(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_out_of_range_access() {
        let m = Matrix::identity(4);
        assert!(matches!(m.get(4, 0), Err(MathError::OutOfRange { .. })));
        assert!(matches!(m.get(0, 4), Err(MathError::OutOfRange { .. })));
    }

    #[test]
    fn test_add_requires_same_shape() {
        let a = Matrix::identity(4);
        let b = Matrix::zeros(4, 1);
        assert!(matches!(a.add(&b), Err(MathError::InvalidOperation(_))));

        let sum = a.add(&Matrix::identity(4)).unwrap();
        assert_eq!(sum.get(2, 2).unwrap(), 2.0);
    }

    #[test]
    fn test_multiply_requires_inner_dimension() {
        let a = Matrix::zeros(4, 1);
        let b = Matrix::identity(4);
        assert!(matches!(a.multiply(&b), Err(MathError::InvalidOperation(_))));
    }

    #[test]
    fn test_identity_multiply_is_noop() {
        let m = sample_4x4(1.0);
        let id = Matrix::identity(4);
        assert_eq!(id.multiply(&m).unwrap(), m);
        assert_eq!(m.multiply(&id).unwrap(), m);
    }

    #[test]
    fn test_multiply_is_associative() {
        let a = sample_4x4(0.1);
        let b = sample_4x4(-2.0).transpose();
        let c = Matrix::new(4, 1, &[1.0, -1.0, 0.5, 1.0]).unwrap();

        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();

        for (l, r) in left.values().iter().zip(right.values()) {
            assert_relative_eq!(*l, r, epsilon = 1e-2, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_vector_conversion_requires_4x1() {
        assert!(matches!(Matrix::identity(4).to_vector(), Err(MathError::InvalidOperation(_))));

        let v = Vector::with_w(1.0, 2.0, 3.0, 1.0);
        assert_eq!(Matrix::from_vector(v).to_vector().unwrap(), v);
    }
}
