//! Cache-friendly i-k-j multiplication, the recursion base case.

use crate::error::{MatrixError, Result};
use crate::matrix::buffer::{Matrix, MatrixMut, MatrixRef};

/// Cache-friendly matrix multiplication using i-k-j loop order.
///
/// By swapping the j and k loops, the innermost loop accesses both B and C
/// sequentially (stride 1) while every `C[i][j]` still accumulates its
/// products in ascending `k` order.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major with leading dimension `lda`
/// * `b` - Matrix B (k × n), row-major with leading dimension `ldb`
/// * `c` - Matrix C (m × n), row-major with leading dimension `ldc`,
///   accumulated into (C += A * B)
/// * `m` - Rows of A and C
/// * `n` - Columns of B and C
/// * `k` - Columns of A, rows of B
#[allow(clippy::too_many_arguments)]
pub fn matmul_naive_ikj(
    a: &[f64],
    lda: usize,
    b: &[f64],
    ldb: usize,
    c: &mut [f64],
    ldc: usize,
    m: usize,
    n: usize,
    k: usize,
) {
    for i in 0..m {
        let c_row = &mut c[i * ldc..i * ldc + n];
        for p in 0..k {
            let a_ip = a[i * lda + p];
            let b_row = &b[p * ldb..p * ldb + n];
            for (c_ij, b_pj) in c_row.iter_mut().zip(b_row) {
                *c_ij += a_ip * b_pj;
            }
        }
    }
}

/// `A.cols == B.rows`, or `ShapeMismatch`.
pub(crate) fn check_product_shape(a: MatrixRef<'_>, b: MatrixRef<'_>) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(MatrixError::ShapeMismatch {
            op: "multiply",
            expected: (a.cols(), b.cols()),
            found: b.shape(),
        });
    }
    Ok(())
}

/// Reference product `C = A * B`, `C` of shape `(A.rows, B.cols)`.
///
/// Non-finite inputs propagate per IEEE-754; nothing is special-cased.
///
/// ```
/// use strassen::{Matrix, naive_multiply};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();
///
/// let c = naive_multiply(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn naive_multiply<'a, 'b>(
    a: impl Into<MatrixRef<'a>>,
    b: impl Into<MatrixRef<'b>>,
) -> Result<Matrix> {
    let (a, b) = (a.into(), b.into());
    check_product_shape(a, b)?;
    Ok(multiply_view(a, b))
}

/// Unchecked product for callers that already validated shapes.
pub(crate) fn multiply_view(a: MatrixRef<'_>, b: MatrixRef<'_>) -> Matrix {
    let mut c = Matrix::zeros(a.rows(), b.cols());
    multiply_into(a, b, &mut c.as_view_mut());
    c
}

/// `C += A * B` into an existing block.
pub(crate) fn multiply_into(a: MatrixRef<'_>, b: MatrixRef<'_>, c: &mut MatrixMut<'_>) {
    debug_assert_eq!(a.cols(), b.rows());
    debug_assert_eq!(c.shape(), (a.rows(), b.cols()));
    let ldc = c.leading_dim();
    matmul_naive_ikj(
        a.data(),
        a.leading_dim(),
        b.data(),
        b.leading_dim(),
        c.data_mut(),
        ldc,
        a.rows(),
        b.cols(),
        a.cols(),
    );
}
