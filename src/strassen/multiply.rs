//! Strassen multiplication.
//!
//! With quadrants `M = [[a, b], [c, d]]` and `N = [[x, y], [z, t]]` the
//! seven half-size products are
//!
//! ```text
//! Q1 = a (x + z)          Q5 = (b - a) z
//! Q2 = d (y + t)          Q6 = (c - a)(x + y)
//! Q3 = (d - a)(z - y)     Q7 = (c - d) y
//! Q4 = (b - d)(z + t)
//! ```
//!
//! and the result quadrants are
//!
//! ```text
//! R11 = Q1 + Q5                R12 = Q2 + Q3 + Q4 - Q5
//! R21 = Q1 + Q3 + Q6 - Q7      R22 = Q2 + Q7
//! ```
//!
//! Expanding each `R` gives back `ax + bz`, `ay + bt`, `cx + dz` and
//! `cy + dt`.

use crate::error::{MatrixError, Result};
use crate::matrix::buffer::{Matrix, MatrixRef};
use crate::matrix::elementwise::zip_into;
use crate::matrix::naive_ikj::multiply_view;
use crate::matrix::pad::{is_power_of_two, next_power_of_two};

/// Strassen product of two `size × size` matrices, `size` a power of two.
///
/// Blocks of size `threshold` or smaller are multiplied with the naive
/// i-k-j kernel. A threshold of 0 behaves like 1.
///
/// The result agrees with [`naive_multiply`](crate::naive_multiply) up to
/// floating-point rounding; the summation order differs, so it is not
/// bit-exact.
///
/// ```
/// use strassen::Matrix;
/// use strassen::strassen::multiply::strassen_multiply;
///
/// let a = Matrix::from_fn(8, 8, |i, j| (i + 2 * j) as f64);
/// let b = Matrix::identity(8);
///
/// let c = strassen_multiply(&a, &b, 2).unwrap();
/// assert!(c.approx_eq(&a, 1e-12));
/// ```
pub fn strassen_multiply<'a, 'b>(
    m: impl Into<MatrixRef<'a>>,
    n: impl Into<MatrixRef<'b>>,
    threshold: usize,
) -> Result<Matrix> {
    let (m, n) = (m.into(), n.into());
    check_strassen_operands(m, n)?;
    Ok(strassen_view(m, n, threshold.max(1)))
}

/// Both operands square, equal in size, and that size a power of two.
fn check_strassen_operands(m: MatrixRef<'_>, n: MatrixRef<'_>) -> Result<()> {
    let size = m.rows();
    let expected = (next_power_of_two(size), next_power_of_two(size));
    if !m.is_square() || !is_power_of_two(size) {
        return Err(MatrixError::ShapeMismatch {
            op: "strassen_multiply",
            expected,
            found: m.shape(),
        });
    }
    if n.shape() != m.shape() {
        return Err(MatrixError::ShapeMismatch {
            op: "strassen_multiply",
            expected: m.shape(),
            found: n.shape(),
        });
    }
    Ok(())
}

/// Recursion over validated power-of-two squares.
///
/// Every temporary is owned by this frame. The two scratch operands are
/// reused across the seven products of this frame only; nothing is shared
/// with sibling or parent frames.
pub(crate) fn strassen_view(m: MatrixRef<'_>, n: MatrixRef<'_>, threshold: usize) -> Matrix {
    let size = m.rows();
    if size <= threshold {
        return multiply_view(m, n);
    }

    log::trace!("strassen frame: size={}", size);
    let h = size / 2;
    let [a, b, c, d] = m.split_quadrants();
    let [x, y, z, t] = n.split_quadrants();

    let mut lhs = Matrix::zeros(h, h);
    let mut rhs = Matrix::zeros(h, h);
    let plus = |p: f64, q: f64| p + q;
    let minus = |p: f64, q: f64| p - q;

    // Q1 = a (x + z)
    zip_into(x, z, &mut rhs.as_view_mut(), plus);
    let q1 = strassen_view(a, rhs.as_view(), threshold);

    // Q2 = d (y + t)
    zip_into(y, t, &mut rhs.as_view_mut(), plus);
    let q2 = strassen_view(d, rhs.as_view(), threshold);

    // Q3 = (d - a)(z - y)
    zip_into(d, a, &mut lhs.as_view_mut(), minus);
    zip_into(z, y, &mut rhs.as_view_mut(), minus);
    let q3 = strassen_view(lhs.as_view(), rhs.as_view(), threshold);

    // Q4 = (b - d)(z + t)
    zip_into(b, d, &mut lhs.as_view_mut(), minus);
    zip_into(z, t, &mut rhs.as_view_mut(), plus);
    let q4 = strassen_view(lhs.as_view(), rhs.as_view(), threshold);

    // Q5 = (b - a) z
    zip_into(b, a, &mut lhs.as_view_mut(), minus);
    let q5 = strassen_view(lhs.as_view(), z, threshold);

    // Q6 = (c - a)(x + y)
    zip_into(c, a, &mut lhs.as_view_mut(), minus);
    zip_into(x, y, &mut rhs.as_view_mut(), plus);
    let q6 = strassen_view(lhs.as_view(), rhs.as_view(), threshold);

    // Q7 = (c - d) y
    zip_into(c, d, &mut lhs.as_view_mut(), minus);
    let q7 = strassen_view(lhs.as_view(), y, threshold);

    let mut r = Matrix::zeros(size, size);
    for i in 0..h {
        for j in 0..h {
            r[(i, j)] = q1[(i, j)] + q5[(i, j)];
            r[(i, j + h)] = q2[(i, j)] + q3[(i, j)] + q4[(i, j)] - q5[(i, j)];
            r[(i + h, j)] = q1[(i, j)] + q3[(i, j)] + q6[(i, j)] - q7[(i, j)];
            r[(i + h, j + h)] = q2[(i, j)] + q7[(i, j)];
        }
    }
    r
}
