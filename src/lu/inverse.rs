//! Inversion by solving `A x = e_i` for every unit vector.

use crate::error::{MatrixError, Result};
use crate::lu::decompose::lu_decompose;
use crate::matrix::buffer::{Matrix, MatrixRef};

/// Invert any square matrix through its LU factors.
///
/// Column `i` of the result solves `L y = e_i`, then `U x = y`. The `n`
/// solves are independent of each other and run one after another.
///
/// ```
/// use strassen::Matrix;
/// use strassen::lu::inverse::lu_inverse;
///
/// let a = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]).unwrap();
/// let inv = lu_inverse(&a).unwrap();
///
/// assert_eq!(inv[(2, 2)], 0.125);
/// ```
pub fn lu_inverse<'a>(a: impl Into<MatrixRef<'a>>) -> Result<Matrix> {
    let a = a.into();
    if !a.is_square() {
        return Err(MatrixError::ShapeMismatch {
            op: "lu_inverse",
            expected: (a.rows(), a.rows()),
            found: a.shape(),
        });
    }

    let lu = lu_decompose(a)?;
    let n = lu.size();
    let mut inv = Matrix::zeros(n, n);

    let mut e = vec![0.0; n];
    let mut y = vec![0.0; n];
    let mut x = vec![0.0; n];
    for i in 0..n {
        e.fill(0.0);
        e[i] = 1.0;

        lu.forward_substitution(&e, &mut y);
        lu.back_substitution(&y, &mut x);

        for (j, x_j) in x.iter().enumerate() {
            inv[(j, i)] = *x_j;
        }
    }

    Ok(inv)
}
