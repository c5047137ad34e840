//! Embedding matrices into power-of-two squares and cutting them back out.
//!
//! Block-halving recursion only stays exact when every level splits into
//! equal quadrants, so `multiply` and `invert` embed their operands into the
//! next power-of-two square first. Padding and unpadding only copy values,
//! so `unpad(pad(A)) == A` bit for bit.

use crate::error::{MatrixError, Result};
use crate::matrix::buffer::{Matrix, MatrixRef};

/// What goes into the cells outside the original extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadFill {
    /// Every padding cell is `0.0`. Right for multiplication: the zero
    /// border contributes nothing to the top-left block of the product.
    Zero,
    /// Padding diagonal cells are `1.0`, other padding cells are
    /// `off_diagonal`.
    ///
    /// With `off_diagonal == 0.0` the padded matrix is `diag(A, I)`, which is
    /// invertible exactly when `A` is and whose inverse carries `A⁻¹` in its
    /// top-left block. A non-zero value couples the border to `A`, so the
    /// top-left block of the inverse is no longer `A⁻¹`.
    Identity { off_diagonal: f64 },
}

/// `n` is a power of two (and therefore non-zero).
pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Smallest power of two `>= n`; `1` for `n == 0`.
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

#[derive(Debug, Clone)]
enum Storage<'a> {
    Borrowed(MatrixRef<'a>),
    Owned(Matrix),
}

/// A square operand ready for block recursion, plus the extents it had
/// before padding.
#[derive(Debug, Clone)]
pub struct Padded<'a> {
    storage: Storage<'a>,
    original_rows: usize,
    original_cols: usize,
}

impl Padded<'_> {
    /// The square matrix to recurse on.
    pub fn view(&self) -> MatrixRef<'_> {
        match &self.storage {
            Storage::Borrowed(v) => *v,
            Storage::Owned(m) => m.as_view(),
        }
    }

    /// Side length of the padded square.
    pub fn size(&self) -> usize {
        self.view().rows()
    }

    pub fn original_rows(&self) -> usize {
        self.original_rows
    }

    pub fn original_cols(&self) -> usize {
        self.original_cols
    }

    /// False when the input was already a power-of-two square and is
    /// borrowed as is.
    pub fn is_padded(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Copy the original extents back out.
    pub fn unpad(&self) -> Matrix {
        self.view()
            .view(0, 0, self.original_rows, self.original_cols)
            .map(|v| v.to_matrix())
            .unwrap_or_else(|_| unreachable!("padded matrix always covers its original extents"))
    }
}

/// Embed `a` into the top-left corner of a `size × size` square.
///
/// Borrows instead of copying when `a` is already `size × size`.
pub fn pad_to_square<'a>(a: impl Into<MatrixRef<'a>>, size: usize, fill: PadFill) -> Result<Padded<'a>> {
    let a = a.into();
    let (rows, cols) = a.shape();
    if size < rows.max(cols) {
        return Err(MatrixError::ShapeMismatch {
            op: "pad",
            expected: (size, size),
            found: (rows, cols),
        });
    }

    if rows == size && cols == size {
        return Ok(Padded {
            storage: Storage::Borrowed(a),
            original_rows: rows,
            original_cols: cols,
        });
    }

    log::trace!("padding {}x{} into {}x{} with {:?}", rows, cols, size, size, fill);

    let mut padded = Matrix::zeros(size, size);
    if let PadFill::Identity { off_diagonal } = fill {
        for i in 0..size {
            for j in 0..size {
                if i >= rows || j >= cols {
                    padded[(i, j)] = if i == j { 1.0 } else { off_diagonal };
                }
            }
        }
    }
    padded.view_mut(0, 0, rows, cols)?.copy_from(a)?;

    Ok(Padded {
        storage: Storage::Owned(padded),
        original_rows: rows,
        original_cols: cols,
    })
}

/// Embed `a` into the next power-of-two square `2^⌈log2(max(rows, cols))⌉`.
///
/// A no-op borrow when `a` is already square with power-of-two size.
///
/// ```
/// use strassen::Matrix;
/// use strassen::matrix::pad::{pad_to_power_of_two, PadFill};
///
/// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
/// let padded = pad_to_power_of_two(&a, PadFill::Zero);
///
/// assert_eq!(padded.size(), 4);
/// assert_eq!(padded.unpad(), a);
/// ```
pub fn pad_to_power_of_two<'a>(a: impl Into<MatrixRef<'a>>, fill: PadFill) -> Padded<'a> {
    let a = a.into();
    let target = next_power_of_two(a.rows().max(a.cols()));
    match pad_to_square(a, target, fill) {
        Ok(padded) => padded,
        Err(_) => unreachable!("next power of two always covers both extents"),
    }
}

/// Extract the top-left `rows × cols` block as a fresh matrix.
pub fn unpad<'a>(padded: impl Into<MatrixRef<'a>>, rows: usize, cols: usize) -> Result<Matrix> {
    Ok(padded.into().view(0, 0, rows, cols)?.to_matrix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_helpers() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(12));
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(8), 8);
    }

    #[test]
    fn already_power_of_two_square_is_borrowed() {
        let a = Matrix::identity(4);
        let padded = pad_to_power_of_two(&a, PadFill::Zero);

        assert!(!padded.is_padded());
        assert!(std::ptr::eq(&padded.view()[(0, 0)], &a[(0, 0)]));
    }

    #[test]
    fn zero_fill() {
        let a = Matrix::from_fn(3, 3, |i, j| (i + j + 1) as f64);
        let padded = pad_to_power_of_two(&a, PadFill::Zero);
        let v = padded.view();

        assert_eq!(padded.size(), 4);
        for k in 0..4 {
            assert_eq!(v[(3, k)], 0.0);
            assert_eq!(v[(k, 3)], 0.0);
        }
        assert_eq!(v[(2, 2)], 5.0);
    }

    #[test]
    fn identity_fill_with_off_diagonal_constant() {
        let a = Matrix::from_fn(2, 3, |_, _| 9.0);
        let padded = pad_to_power_of_two(&a, PadFill::Identity { off_diagonal: 0.01 });
        let v = padded.view();

        assert_eq!(v[(0, 0)], 9.0);
        assert_eq!(v[(1, 2)], 9.0);
        // Row 2, 3 and column 3 are padding.
        assert_eq!(v[(2, 2)], 1.0);
        assert_eq!(v[(3, 3)], 1.0);
        assert_eq!(v[(2, 0)], 0.01);
        assert_eq!(v[(0, 3)], 0.01);
        assert_eq!(v[(3, 2)], 0.01);
    }

    #[test]
    fn unpad_restores_rectangular_input() {
        let a = Matrix::from_fn(5, 3, |i, j| 0.1 * (i as f64) - 0.3 * (j as f64));
        let padded = pad_to_power_of_two(&a, PadFill::Identity { off_diagonal: 0.0 });

        assert_eq!(padded.original_rows(), 5);
        assert_eq!(padded.original_cols(), 3);
        assert_eq!(unpad(padded.view(), 5, 3).unwrap(), a);
        assert_eq!(padded.unpad(), a);
    }

    #[test]
    fn pad_to_smaller_square_fails() {
        let a = Matrix::zeros(4, 2);
        assert!(matches!(
            pad_to_square(&a, 2, PadFill::Zero),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn unpad_larger_than_source_fails() {
        let a = Matrix::zeros(2, 2);
        assert!(matches!(
            unpad(&a, 3, 1),
            Err(MatrixError::OutOfBounds { .. })
        ));
    }
}
