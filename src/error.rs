//! Error type shared by every matrix operation in the crate.

/// Errors returned by matrix construction, views, multiplication and inversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// Operand extents are incompatible with the requested operation.
    #[error("shape mismatch in {op}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A pivot or 1×1 block is zero, so the matrix cannot be inverted
    /// along this path.
    #[error("singular matrix: zero pivot at diagonal index {index}")]
    SingularMatrix { index: usize },

    /// A pivot is non-finite or vanishingly small relative to the input.
    #[error("numerically unstable pivot {pivot:e} at diagonal index {index}")]
    NumericalInstability { index: usize, pivot: f64 },

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A requested sub-block does not fit inside its parent.
    #[error(
        "block {rows}x{cols} at ({row_offset}, {col_offset}) exceeds {parent_rows}x{parent_cols} parent"
    )]
    OutOfBounds {
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
        parent_rows: usize,
        parent_cols: usize,
    },
}

/// Convenience alias for `Result<T, MatrixError>`.
pub type Result<T> = std::result::Result<T, MatrixError>;
