//! Math error types

use thiserror::Error;

/// Precondition violations raised by the matrix and transform library.
///
/// None of these are expected during normal play; they point at a caller bug
/// and are propagated rather than papered over.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Value count does not match the requested shape
    #[error("Dimension mismatch: a {rows}x{cols} matrix needs {expected} values, got {actual}")]
    DimensionMismatch {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
        /// `rows * cols`
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },

    /// Element access outside the matrix
    #[error("Index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    OutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix row count
        rows: usize,
        /// Matrix column count
        cols: usize,
    },

    /// Operation not defined for the given operand shapes
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
