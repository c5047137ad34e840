//! Dense row-major storage and zero-copy strided views.
//!
//! One [`Matrix`] owns a contiguous buffer. Sub-blocks are borrowed as
//! [`MatrixRef`] / [`MatrixMut`], which carry their own extents and a
//! leading dimension (the distance between consecutive rows in the parent
//! buffer). Splitting a matrix into quadrants is therefore pointer and
//! stride arithmetic, not a copy.
//!
//! ```
//! use strassen::Matrix;
//!
//! let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0,
//!                                     4.0, 5.0, 6.0]).unwrap();
//! let right = m.view(0, 1, 2, 2).unwrap();
//!
//! assert_eq!(right.leading_dim(), 3);
//! assert_eq!(right[(1, 0)], 5.0);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MatrixError, Result};

/// Number of slice elements a `rows × cols` block with stride `ld` touches.
fn span(rows: usize, cols: usize, ld: usize) -> usize {
    (rows - 1) * ld + cols
}

/// Validate that a `rows × cols` block at `(row_offset, col_offset)` fits
/// inside a `parent_rows × parent_cols` matrix and is non-empty.
fn check_block(
    parent_rows: usize,
    parent_cols: usize,
    row_offset: usize,
    col_offset: usize,
    rows: usize,
    cols: usize,
) -> Result<()> {
    let fits = |offset: usize, len: usize, limit: usize| {
        offset.checked_add(len).is_some_and(|end| end <= limit)
    };
    if rows == 0
        || cols == 0
        || !fits(row_offset, rows, parent_rows)
        || !fits(col_offset, cols, parent_cols)
    {
        return Err(MatrixError::OutOfBounds {
            row_offset,
            col_offset,
            rows,
            cols,
            parent_rows,
            parent_cols,
        });
    }
    Ok(())
}

fn check_index(row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
    if row >= rows || col >= cols {
        return Err(MatrixError::IndexOutOfRange {
            row,
            col,
            rows,
            cols,
        });
    }
    Ok(())
}

/// Fixed-arity shape check used by every binary elementwise operation.
pub(crate) fn ensure_same_shape(op: &'static str, a: MatrixRef<'_>, b: MatrixRef<'_>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(MatrixError::ShapeMismatch {
            op,
            expected: a.shape(),
            found: b.shape(),
        });
    }
    Ok(())
}

// ============================================================
// Owned matrix
// ============================================================

/// Owned dense matrix, row-major, leading dimension equal to `cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Allocate a zero-filled `rows × cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        assert!(
            rows > 0 && cols > 0,
            "matrix extents must be non-zero, got {}x{}",
            rows,
            cols
        );
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Wrap row-major caller data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::OutOfBounds {
                row_offset: 0,
                col_offset: 0,
                rows,
                cols,
                parent_rows: rows,
                parent_cols: cols,
            });
        }
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                op: "from_vec",
                expected: (rows, cols),
                found: (data.len() / cols, cols),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build a matrix from a list of equally long rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::ShapeMismatch {
                    op: "from_rows",
                    expected: (rows.len(), cols),
                    found: (rows.len(), row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(rows.len(), cols, data)
    }

    /// Build a matrix by evaluating `f(i, j)` for every cell.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut m = Self::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                m.data[i * cols + j] = f(i, j);
            }
        }
        m
    }

    /// `n × n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Merge four equally shaped blocks into `[[q11, q12], [q21, q22]]`.
    pub fn from_quadrants(
        q11: MatrixRef<'_>,
        q12: MatrixRef<'_>,
        q21: MatrixRef<'_>,
        q22: MatrixRef<'_>,
    ) -> Result<Self> {
        ensure_same_shape("from_quadrants", q11, q12)?;
        ensure_same_shape("from_quadrants", q11, q21)?;
        ensure_same_shape("from_quadrants", q11, q22)?;

        let (h, w) = q11.shape();
        let mut out = Self::zeros(2 * h, 2 * w);
        out.view_mut(0, 0, h, w)?.copy_from(q11)?;
        out.view_mut(0, w, h, w)?.copy_from(q12)?;
        out.view_mut(h, 0, h, w)?.copy_from(q21)?;
        out.view_mut(h, w, h, w)?.copy_from(q22)?;
        Ok(out)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major contents.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.as_view().get(row, col)
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(row, col, self.rows, self.cols)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Borrow the whole matrix as a view.
    pub fn as_view(&self) -> MatrixRef<'_> {
        MatrixRef {
            data: &self.data,
            rows: self.rows,
            cols: self.cols,
            ld: self.cols,
        }
    }

    /// Borrow the whole matrix as a mutable view.
    pub fn as_view_mut(&mut self) -> MatrixMut<'_> {
        MatrixMut {
            data: &mut self.data,
            rows: self.rows,
            cols: self.cols,
            ld: self.cols,
        }
    }

    /// Borrow a `rows × cols` block starting at `(row_offset, col_offset)`.
    pub fn view(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixRef<'_>> {
        self.as_view().view(row_offset, col_offset, rows, cols)
    }

    /// Mutably borrow a `rows × cols` block starting at `(row_offset, col_offset)`.
    pub fn view_mut(
        &mut self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixMut<'_>> {
        check_block(self.rows, self.cols, row_offset, col_offset, rows, cols)?;
        let ld = self.cols;
        let start = row_offset * ld + col_offset;
        Ok(MatrixMut {
            data: &mut self.data[start..start + span(rows, cols, ld)],
            rows,
            cols,
            ld,
        })
    }

    /// Split a square matrix of even size into `[M11, M12, M21, M22]`.
    pub fn quadrants(&self) -> Result<[MatrixRef<'_>; 4]> {
        self.as_view().quadrants()
    }

    /// Largest absolute elementwise difference.
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64> {
        self.as_view().max_abs_diff(other.as_view())
    }

    /// True when shapes match and every element is within `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.as_view().approx_eq(other.as_view(), tol)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

// ============================================================
// Read-only view
// ============================================================

/// Borrowed read-only block of a matrix.
///
/// `data` starts at the block's top-left element; row `i` begins at
/// `data[i * ld]`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixRef<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> From<&'a Matrix> for MatrixRef<'a> {
    fn from(m: &'a Matrix) -> Self {
        m.as_view()
    }
}

impl<'a> MatrixRef<'a> {
    /// View caller-owned strided data as a `rows × cols` matrix whose rows
    /// are `ld` elements apart.
    pub fn from_slice(data: &'a [f64], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MatrixError::OutOfBounds {
                row_offset: 0,
                col_offset: 0,
                rows,
                cols,
                parent_rows: rows,
                parent_cols: ld,
            });
        }
        if ld < cols || data.len() < span(rows, cols, ld) {
            return Err(MatrixError::ShapeMismatch {
                op: "from_slice",
                expected: (rows, ld.max(cols)),
                found: (data.len() / ld.max(1), ld),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            ld,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Distance between the starts of consecutive rows.
    pub fn leading_dim(&self) -> usize {
        self.ld
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Backing slice starting at the top-left element.
    pub(crate) fn data(&self) -> &'a [f64] {
        self.data
    }

    /// Row `i` as a contiguous slice of `cols` elements.
    pub fn row(&self, i: usize) -> &'a [f64] {
        let data = self.data;
        let start = i * self.ld;
        &data[start..start + self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_index(row, col, self.rows, self.cols)?;
        Ok(self.data[row * self.ld + col])
    }

    /// Borrow a sub-block of this view. The result shares the parent's storage.
    pub fn view(
        &self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixRef<'a>> {
        check_block(self.rows, self.cols, row_offset, col_offset, rows, cols)?;
        Ok(self.block(row_offset, col_offset, rows, cols))
    }

    /// Sub-block without bounds validation beyond slice indexing.
    fn block(&self, row_offset: usize, col_offset: usize, rows: usize, cols: usize) -> MatrixRef<'a> {
        let data = self.data;
        let start = row_offset * self.ld + col_offset;
        MatrixRef {
            data: &data[start..start + span(rows, cols, self.ld)],
            rows,
            cols,
            ld: self.ld,
        }
    }

    /// Split a square view of even size into `[M11, M12, M21, M22]`.
    pub fn quadrants(&self) -> Result<[MatrixRef<'a>; 4]> {
        if !self.is_square() || self.rows % 2 != 0 {
            return Err(MatrixError::ShapeMismatch {
                op: "quadrants",
                expected: (self.rows + self.rows % 2, self.rows + self.rows % 2),
                found: self.shape(),
            });
        }
        Ok(self.split_quadrants())
    }

    /// Quadrant split for callers that already know the size is even.
    pub(crate) fn split_quadrants(&self) -> [MatrixRef<'a>; 4] {
        debug_assert!(self.is_square() && self.rows % 2 == 0);
        let h = self.rows / 2;
        [
            self.block(0, 0, h, h),
            self.block(0, h, h, h),
            self.block(h, 0, h, h),
            self.block(h, h, h, h),
        ]
    }

    /// Deep copy into a freshly allocated, tightly packed matrix.
    pub fn to_matrix(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
        }
        Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn max_abs_diff(&self, other: MatrixRef<'_>) -> Result<f64> {
        ensure_same_shape("max_abs_diff", *self, other)?;
        let mut worst = 0.0f64;
        for i in 0..self.rows {
            for (x, y) in self.row(i).iter().zip(other.row(i)) {
                worst = worst.max((x - y).abs());
            }
        }
        Ok(worst)
    }

    pub fn approx_eq(&self, other: MatrixRef<'_>, tol: f64) -> bool {
        self.max_abs_diff(other).is_ok_and(|d| d <= tol)
    }
}

impl Index<(usize, usize)> for MatrixRef<'_> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} view",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.ld + col]
    }
}

impl fmt::Display for MatrixRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for x in self.row(i) {
                write!(f, "{:8.4} ", x)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================
// Mutable view
// ============================================================

/// Exclusive mutable block of a matrix.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    data: &'a mut [f64],
    rows: usize,
    cols: usize,
    ld: usize,
}

impl<'a> From<&'a mut Matrix> for MatrixMut<'a> {
    fn from(m: &'a mut Matrix) -> Self {
        m.as_view_mut()
    }
}

impl MatrixMut<'_> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn leading_dim(&self) -> usize {
        self.ld
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> MatrixRef<'_> {
        MatrixRef {
            data: &self.data[..],
            rows: self.rows,
            cols: self.cols,
            ld: self.ld,
        }
    }

    /// Mutable row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let start = i * self.ld;
        &mut self.data[start..start + self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        check_index(row, col, self.rows, self.cols)?;
        Ok(self.data[row * self.ld + col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        check_index(row, col, self.rows, self.cols)?;
        self.data[row * self.ld + col] = value;
        Ok(())
    }

    /// Mutably borrow a sub-block of this view.
    pub fn view_mut(
        &mut self,
        row_offset: usize,
        col_offset: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixMut<'_>> {
        check_block(self.rows, self.cols, row_offset, col_offset, rows, cols)?;
        let start = row_offset * self.ld + col_offset;
        Ok(MatrixMut {
            data: &mut self.data[start..start + span(rows, cols, self.ld)],
            rows,
            cols,
            ld: self.ld,
        })
    }

    /// Overwrite every element with `src`, which must have the same shape.
    pub fn copy_from(&mut self, src: MatrixRef<'_>) -> Result<()> {
        ensure_same_shape("copy_from", self.as_view(), src)?;
        for i in 0..self.rows {
            self.row_mut(i).copy_from_slice(src.row(i));
        }
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        for i in 0..self.rows {
            self.row_mut(i).fill(value);
        }
    }

    /// Backing slice and stride for kernels writing in place.
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data[..]
    }
}

impl Index<(usize, usize)> for MatrixMut<'_> {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} view",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.ld + col]
    }
}

impl IndexMut<(usize, usize)> for MatrixMut<'_> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of range for {}x{} view",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.ld + col]
    }
}
