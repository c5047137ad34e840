//! Doolittle LU factorization without pivoting.

use crate::error::{MatrixError, Result};
use crate::matrix::buffer::{Matrix, MatrixRef};
use crate::pivot::PivotTest;

/// `A = L U` with unit-diagonal lower `L` and upper `U`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuDecomposition {
    l: Matrix,
    u: Matrix,
}

impl LuDecomposition {
    pub fn l(&self) -> &Matrix {
        &self.l
    }

    pub fn u(&self) -> &Matrix {
        &self.u
    }

    pub fn size(&self) -> usize {
        self.u.rows()
    }

    /// Solve `A x = b` for one right-hand side.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.size();
        if b.len() != n {
            return Err(MatrixError::ShapeMismatch {
                op: "solve",
                expected: (n, 1),
                found: (b.len(), 1),
            });
        }
        let mut y = vec![0.0; n];
        let mut x = vec![0.0; n];
        self.forward_substitution(b, &mut y);
        self.back_substitution(&y, &mut x);
        Ok(x)
    }

    /// `L y = b`. `L` has a unit diagonal, so there is no division.
    pub(crate) fn forward_substitution(&self, b: &[f64], y: &mut [f64]) {
        let n = self.size();
        for i in 0..n {
            let mut acc = b[i];
            for j in 0..i {
                acc -= self.l[(i, j)] * y[j];
            }
            y[i] = acc;
        }
    }

    /// `U x = y`. Pivots were checked non-zero during factorization.
    pub(crate) fn back_substitution(&self, y: &[f64], x: &mut [f64]) {
        let n = self.size();
        for i in (0..n).rev() {
            let mut acc = y[i];
            for j in i + 1..n {
                acc -= self.u[(i, j)] * x[j];
            }
            x[i] = acc / self.u[(i, i)];
        }
    }
}

/// Factor a square matrix as `L U` (Doolittle, no pivoting).
///
/// ```text
/// U[i][j] = A[i][j] - Σ_{k<i} L[i][k] U[k][j]              j >= i
/// L[j][i] = (A[j][i] - Σ_{k<i} L[j][k] U[k][i]) / U[i][i]   j > i
/// ```
///
/// # Errors
///
/// - `ShapeMismatch` if `a` is not square.
/// - `SingularMatrix { index }` if pivot `U[index][index]` is exactly zero.
/// - `NumericalInstability` if a pivot is non-finite, or smaller in
///   magnitude than `n · ε · max(|A[i][i]|, Σ_k |L[i][k] U[k][i]|)`. The
///   bound follows the terms that produced that pivot, so a diagonal with a
///   wide dynamic range is fine while cancellation noise is rejected.
pub fn lu_decompose<'a>(a: impl Into<MatrixRef<'a>>) -> Result<LuDecomposition> {
    let a = a.into();
    if !a.is_square() {
        return Err(MatrixError::ShapeMismatch {
            op: "lu_decompose",
            expected: (a.rows(), a.rows()),
            found: a.shape(),
        });
    }

    let n = a.rows();
    let pivots = PivotTest::new(n, 0.0);

    let mut l = Matrix::zeros(n, n);
    let mut u = Matrix::zeros(n, n);

    for i in 0..n {
        l[(i, i)] = 1.0;

        let mut scale = 0.0f64;
        for j in i..n {
            let mut acc = a[(i, j)];
            let mut subtracted = 0.0;
            for k in 0..i {
                let term = l[(i, k)] * u[(k, j)];
                acc -= term;
                subtracted += term.abs();
            }
            u[(i, j)] = acc;
            if j == i {
                scale = a[(i, i)].abs().max(subtracted);
            }
        }

        pivots.check(u[(i, i)], scale, i)?;

        for j in i + 1..n {
            let mut acc = a[(j, i)];
            for k in 0..i {
                acc -= l[(j, k)] * u[(k, i)];
            }
            l[(j, i)] = acc / u[(i, i)];
        }
    }

    Ok(LuDecomposition { l, u })
}
