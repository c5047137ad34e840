//! Pivot classification shared by the block and LU inverses.
//!
//! A pivot is the value a path is about to divide by: a 1×1 block at the
//! bottom of the Schur recursion, or `U[i][i]` in Doolittle. Both paths
//! compute it as a difference of accumulated terms, and `scale` is the
//! largest magnitude that went into that difference. A pivot that is small
//! next to its own `scale` is cancellation noise, whatever the magnitude
//! of the rest of the matrix.

use crate::error::{MatrixError, Result};

#[derive(Debug, Clone, Copy)]
pub(crate) struct PivotTest {
    /// `n · ε` for the matrix being inverted.
    relative: f64,
    /// Caller-configured singular band, never negative.
    absolute: f64,
}

impl PivotTest {
    pub(crate) fn new(n: usize, absolute: f64) -> Self {
        Self {
            relative: n as f64 * f64::EPSILON,
            absolute: absolute.max(0.0),
        }
    }

    /// - `SingularMatrix` for an exact zero or a value inside the
    ///   configured band.
    /// - `NumericalInstability` for a non-finite value, a value whose
    ///   reciprocal overflows, or one below `n · ε · scale`.
    pub(crate) fn check(&self, pivot: f64, scale: f64, index: usize) -> Result<()> {
        if pivot == 0.0 || pivot.abs() <= self.absolute {
            log::debug!("singular pivot {:e} at diagonal index {}", pivot, index);
            return Err(MatrixError::SingularMatrix { index });
        }

        let tolerance = self.relative * scale;
        if !pivot.is_finite() || !pivot.recip().is_finite() || pivot.abs() < tolerance {
            log::debug!(
                "unstable pivot {:e} at diagonal index {} (tolerance {:e})",
                pivot,
                index,
                tolerance
            );
            return Err(MatrixError::NumericalInstability { index, pivot });
        }
        Ok(())
    }
}
