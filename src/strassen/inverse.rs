//! Recursive inversion through the Schur complement.
//!
//! For `A = [[A11, A12], [A21, A22]]` with `E = A11⁻¹` and the Schur
//! complement `S = A22 - A21 E A12`, `T = S⁻¹`:
//!
//! ```text
//! A⁻¹ = [[ E + E A12 T A21 E,   -E A12 T ],
//!        [ -T A21 E,             T        ]]
//! ```
//!
//! There is no pivoting. `A11` and `S` must be invertible at every level, so
//! an invertible matrix with a singular leading block still fails with
//! [`MatrixError::SingularMatrix`]. Use
//! [`lu_inverse`](crate::lu::inverse::lu_inverse) or reorder rows in that
//! case.

use crate::config::Config;
use crate::error::{MatrixError, Result};
use crate::matrix::buffer::{Matrix, MatrixRef};
use crate::matrix::elementwise::{add, negate, subtract};
use crate::matrix::pad::{is_power_of_two, next_power_of_two};
use crate::pivot::PivotTest;
use crate::strassen::multiply::strassen_view;

/// Invert a power-of-two square matrix by block recursion.
///
/// Every block product goes through Strassen with `config.threshold`.
///
/// # Errors
///
/// - `ShapeMismatch` unless `a` is square with a power-of-two size.
/// - `SingularMatrix { index }` when a 1×1 block is exactly zero, or within
///   `config.singular_tolerance` of it.
/// - `NumericalInstability` when a 1×1 block is non-finite, or so small
///   next to the terms it was computed from (`n · ε` times their largest
///   magnitude) that it is only rounding noise.
///
/// ```
/// use strassen::{Config, Matrix};
/// use strassen::strassen::inverse::block_inverse;
///
/// let a = Matrix::from_rows(&[[4.0, 3.0], [6.0, 3.0]]).unwrap();
/// let inv = block_inverse(&a, &Config::default()).unwrap();
///
/// let expected = Matrix::from_rows(&[[-0.5, 0.5], [1.0, -2.0 / 3.0]]).unwrap();
/// assert!(inv.approx_eq(&expected, 1e-12));
/// ```
pub fn block_inverse<'a>(a: impl Into<MatrixRef<'a>>, config: &Config) -> Result<Matrix> {
    let a = a.into();
    let size = a.rows();
    if !a.is_square() || !is_power_of_two(size) {
        return Err(MatrixError::ShapeMismatch {
            op: "block_inverse",
            expected: (next_power_of_two(size), next_power_of_two(size)),
            found: a.shape(),
        });
    }

    let recursion = Recursion {
        threshold: config.effective_threshold(),
        pivots: PivotTest::new(size, config.singular_tolerance),
    };
    let scale = Matrix::from_fn(size, size, |i, j| a[(i, j)].abs());
    recursion.invert(a, scale.as_view(), 0)
}

struct Recursion {
    threshold: usize,
    pivots: PivotTest,
}

impl Recursion {
    /// `scale` bounds, entry by entry, the magnitudes that were summed into
    /// `a`. `offset` is the position of `a`'s top-left element on the
    /// diagonal of the outermost matrix, so a failing 1×1 block reports
    /// where it sits.
    fn invert(&self, a: MatrixRef<'_>, scale: MatrixRef<'_>, offset: usize) -> Result<Matrix> {
        let size = a.rows();
        if size == 1 {
            let value = a[(0, 0)];
            self.pivots.check(value, scale[(0, 0)], offset)?;
            return Ok(Matrix::from_fn(1, 1, |_, _| value.recip()));
        }

        log::trace!("block inverse frame: size={} offset={}", size, offset);
        let h = size / 2;
        let threshold = self.threshold;
        let [a11, a12, a21, a22] = a.split_quadrants();
        let [s11, _, _, s22] = scale.split_quadrants();

        let e = self.invert(a11, s11, offset)?;
        let e_a12 = strassen_view(e.as_view(), a12, threshold);
        let a21_e = strassen_view(a21, e.as_view(), threshold);

        let a21_e_a12 = strassen_view(a21, e_a12.as_view(), threshold);
        let schur = subtract(a22, &a21_e_a12)?;
        let schur_scale = Matrix::from_fn(h, h, |i, j| s22[(i, j)].max(a21_e_a12[(i, j)].abs()));
        let t = self.invert(schur.as_view(), schur_scale.as_view(), offset + h)?;

        let t_a21_e = strassen_view(t.as_view(), a21_e.as_view(), threshold);
        let y = negate(&strassen_view(e_a12.as_view(), t.as_view(), threshold));
        let z = negate(&t_a21_e);
        let x = add(&e, &strassen_view(e_a12.as_view(), t_a21_e.as_view(), threshold))?;

        Matrix::from_quadrants(x.as_view(), y.as_view(), z.as_view(), t.as_view())
    }
}
