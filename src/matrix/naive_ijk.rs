//! Textbook i-j-k multiplication.

use crate::error::Result;
use crate::matrix::buffer::{Matrix, MatrixRef};
use crate::matrix::naive_ikj::check_product_shape;

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple-loop implementation. The innermost loop walks
/// B with stride `ldb` (column-wise), so it misses cache on every iteration.
///
/// Use this as a correctness baseline, not for performance.
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
pub fn matmul_naive_ijk(
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
        for j in 0..n {
            for p in 0..k {
                c[i * ldc + j] += a[i * lda + p] * b[p * ldb + j];
            }
        }
    }
}

/// `A * B` with the i-j-k kernel.
///
/// Produces exactly the same bits as
/// [`naive_multiply`](crate::matrix::naive_ikj::naive_multiply): both sum
/// each output cell over `k` in ascending order starting from zero.
pub fn naive_multiply_ijk<'a, 'b>(
    a: impl Into<MatrixRef<'a>>,
    b: impl Into<MatrixRef<'b>>,
) -> Result<Matrix> {
    let (a, b) = (a.into(), b.into());
    check_product_shape(a, b)?;

    let mut c = Matrix::zeros(a.rows(), b.cols());
    let ldc = c.cols();
    matmul_naive_ijk(
        a.data(),
        a.leading_dim(),
        b.data(),
        b.leading_dim(),
        c.as_view_mut().data_mut(),
        ldc,
        a.rows(),
        b.cols(),
        a.cols(),
    );
    Ok(c)
}
