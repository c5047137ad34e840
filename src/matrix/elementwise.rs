//! Elementwise add, subtract and scale over equally shaped matrices.
//!
//! The allocating forms (`add`, `subtract`, `scale`) return a fresh matrix
//! shaped like the first operand. The `_into` and `_assign` forms write into
//! a caller-provided block; the borrow checker guarantees that block is
//! distinct from the inputs.

use crate::error::Result;
use crate::matrix::buffer::{Matrix, MatrixMut, MatrixRef, ensure_same_shape};

/// `out[i][j] = f(a[i][j], b[i][j])` for callers that checked shapes.
pub(crate) fn zip_into(
    a: MatrixRef<'_>,
    b: MatrixRef<'_>,
    out: &mut MatrixMut<'_>,
    f: impl Fn(f64, f64) -> f64,
) {
    debug_assert_eq!(a.shape(), b.shape());
    debug_assert_eq!(a.shape(), out.shape());
    for i in 0..a.rows() {
        let dst = out.row_mut(i);
        for ((d, x), y) in dst.iter_mut().zip(a.row(i)).zip(b.row(i)) {
            *d = f(*x, *y);
        }
    }
}

fn zip_alloc(a: MatrixRef<'_>, b: MatrixRef<'_>, f: impl Fn(f64, f64) -> f64) -> Matrix {
    let mut c = Matrix::zeros(a.rows(), a.cols());
    zip_into(a, b, &mut c.as_view_mut(), f);
    c
}

/// `C = A + B`.
pub fn add<'a, 'b>(a: impl Into<MatrixRef<'a>>, b: impl Into<MatrixRef<'b>>) -> Result<Matrix> {
    let (a, b) = (a.into(), b.into());
    ensure_same_shape("add", a, b)?;
    Ok(zip_alloc(a, b, |x, y| x + y))
}

/// `C = A - B`.
pub fn subtract<'a, 'b>(
    a: impl Into<MatrixRef<'a>>,
    b: impl Into<MatrixRef<'b>>,
) -> Result<Matrix> {
    let (a, b) = (a.into(), b.into());
    ensure_same_shape("subtract", a, b)?;
    Ok(zip_alloc(a, b, |x, y| x - y))
}

/// `C = k * A`.
pub fn scale<'a>(a: impl Into<MatrixRef<'a>>, k: f64) -> Matrix {
    let a = a.into();
    let mut c = Matrix::zeros(a.rows(), a.cols());
    let mut out = c.as_view_mut();
    for i in 0..a.rows() {
        for (d, x) in out.row_mut(i).iter_mut().zip(a.row(i)) {
            *d = k * x;
        }
    }
    c
}

/// `C = -A`.
pub fn negate<'a>(a: impl Into<MatrixRef<'a>>) -> Matrix {
    scale(a, -1.0)
}

/// `out = A + B`.
pub fn add_into(a: MatrixRef<'_>, b: MatrixRef<'_>, out: &mut MatrixMut<'_>) -> Result<()> {
    ensure_same_shape("add_into", a, b)?;
    ensure_same_shape("add_into", a, out.as_view())?;
    zip_into(a, b, out, |x, y| x + y);
    Ok(())
}

/// `out = A - B`.
pub fn subtract_into(a: MatrixRef<'_>, b: MatrixRef<'_>, out: &mut MatrixMut<'_>) -> Result<()> {
    ensure_same_shape("subtract_into", a, b)?;
    ensure_same_shape("subtract_into", a, out.as_view())?;
    zip_into(a, b, out, |x, y| x - y);
    Ok(())
}

/// `dst += src`.
pub fn add_assign(dst: &mut MatrixMut<'_>, src: MatrixRef<'_>) -> Result<()> {
    ensure_same_shape("add_assign", dst.as_view(), src)?;
    for i in 0..src.rows() {
        for (d, s) in dst.row_mut(i).iter_mut().zip(src.row(i)) {
            *d += s;
        }
    }
    Ok(())
}

/// `dst -= src`.
pub fn subtract_assign(dst: &mut MatrixMut<'_>, src: MatrixRef<'_>) -> Result<()> {
    ensure_same_shape("subtract_assign", dst.as_view(), src)?;
    for i in 0..src.rows() {
        for (d, s) in dst.row_mut(i).iter_mut().zip(src.row(i)) {
            *d -= s;
        }
    }
    Ok(())
}
