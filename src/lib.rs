//! Strassen multiplication and block-recursive inversion for dense `f64`
//! matrices.
//!
//! Multiplication halves both operands into quadrants and gets away with
//! seven half-size products instead of eight. Inversion halves the matrix
//! the same way and reduces to two half-size inversions through the Schur
//! complement, doing all its block products with Strassen. Below a size
//! threshold everything falls back to the plain triple loop.
//!
//! ## Usage
//!
//! ```
//! use strassen::{invert, multiply, Matrix};
//!
//! let a = Matrix::from_rows(&[[4.0, 3.0], [6.0, 3.0]]).unwrap();
//! let a_inv = invert(&a).unwrap();
//!
//! let product = multiply(&a, &a_inv).unwrap();
//! assert!(product.approx_eq(&Matrix::identity(2), 1e-12));
//! ```
//!
//! Sizes that are not powers of two are padded internally and cut back
//! before returning:
//!
//! ```
//! use strassen::{multiply, naive_multiply, Matrix};
//!
//! let a = Matrix::from_fn(5, 3, |i, j| (i * 3 + j) as f64);
//! let b = Matrix::from_fn(3, 7, |i, j| (i + j) as f64);
//!
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.shape(), (5, 7));
//! assert!(c.approx_eq(&naive_multiply(&a, &b).unwrap(), 1e-9));
//! ```
//!
//! ## What's inside
//!
//! - Strided views: quadrants are borrowed, never copied
//! - Naive i-j-k and i-k-j kernels (baseline and base case)
//! - Strassen with a tunable cutover ([`Config::threshold`])
//! - Schur-complement inversion, no pivoting
//! - Doolittle LU inversion as an independent cross-check

pub mod config;
pub mod error;
pub mod lu;
pub mod matrix;
mod pivot;
pub mod strassen;

pub use config::{Config, DEFAULT_THRESHOLD};
pub use error::{MatrixError, Result};
pub use matrix::buffer::{Matrix, MatrixMut, MatrixRef};
pub use matrix::elementwise::{add, negate, scale, subtract};
pub use matrix::naive_ijk::naive_multiply_ijk;
pub use matrix::naive_ikj::naive_multiply;
pub use matrix::pad::PadFill;

use crate::matrix::naive_ikj::check_product_shape;
use crate::matrix::pad::{next_power_of_two, pad_to_power_of_two, pad_to_square, unpad};
use crate::strassen::inverse::block_inverse;
use crate::strassen::multiply::strassen_view;

/// Matrix multiply: `C = A * B` with the default [`Config`].
///
/// A is m×k, B is k×n, C is m×n.
///
/// # Errors
///
/// `ShapeMismatch` if `A.cols != B.rows`.
pub fn multiply<'a, 'b>(a: impl Into<MatrixRef<'a>>, b: impl Into<MatrixRef<'b>>) -> Result<Matrix> {
    multiply_with(a, b, &Config::default())
}

/// Same as [`multiply`] with an explicit configuration.
///
/// Both operands are zero-padded to the smallest power-of-two square that
/// holds every extent, multiplied with Strassen, and the `m × n` block is
/// returned.
pub fn multiply_with<'a, 'b>(
    a: impl Into<MatrixRef<'a>>,
    b: impl Into<MatrixRef<'b>>,
    config: &Config,
) -> Result<Matrix> {
    let (a, b) = (a.into(), b.into());
    check_product_shape(a, b)?;

    let size = next_power_of_two(a.rows().max(a.cols()).max(b.cols()));
    log::debug!(
        "multiply {}x{} by {}x{}: padded size {}, threshold {}",
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        size,
        config.effective_threshold()
    );

    let a_padded = pad_to_square(a, size, PadFill::Zero)?;
    let b_padded = pad_to_square(b, size, PadFill::Zero)?;
    let product = strassen_view(a_padded.view(), b_padded.view(), config.effective_threshold());

    if product.shape() == (a.rows(), b.cols()) {
        return Ok(product);
    }
    unpad(&product, a.rows(), b.cols())
}

/// Invert a square matrix with the default [`Config`].
///
/// # Errors
///
/// - `ShapeMismatch` if `A` is not square.
/// - `SingularMatrix` if a leading block or Schur complement is singular at
///   some recursion level. This includes some invertible matrices, since
///   the recursion does not pivot; [`invert_via_lu`] or a row reordering
///   may still succeed.
pub fn invert<'a>(a: impl Into<MatrixRef<'a>>) -> Result<Matrix> {
    invert_with(a, &Config::default())
}

/// Same as [`invert`] with an explicit configuration.
///
/// A size that is not a power of two is padded with `config.pad_fill`
/// first, and the original block of the inverse is returned.
pub fn invert_with<'a>(a: impl Into<MatrixRef<'a>>, config: &Config) -> Result<Matrix> {
    let a = a.into();
    if !a.is_square() {
        return Err(MatrixError::ShapeMismatch {
            op: "invert",
            expected: (a.rows(), a.rows()),
            found: a.shape(),
        });
    }

    let padded = pad_to_power_of_two(a, config.pad_fill);
    log::debug!(
        "invert {}x{}: padded size {}, threshold {}",
        a.rows(),
        a.cols(),
        padded.size(),
        config.effective_threshold()
    );

    let inverse = block_inverse(padded.view(), config)?;
    if !padded.is_padded() {
        return Ok(inverse);
    }
    unpad(&inverse, a.rows(), a.cols())
}

/// Invert a square matrix of any size through LU decomposition.
///
/// Independent of the Strassen path; useful as a cross-check.
///
/// # Errors
///
/// `ShapeMismatch` for non-square input, `SingularMatrix` or
/// `NumericalInstability` for a zero or vanishing pivot.
pub fn invert_via_lu<'a>(a: impl Into<MatrixRef<'a>>) -> Result<Matrix> {
    crate::lu::inverse::lu_inverse(a)
}
