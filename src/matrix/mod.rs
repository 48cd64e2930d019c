mod linalg;
mod ops;

pub use linalg::MatrixError;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{CastFrom, Scalar};
use crate::vector::{AllocError, Vector};

/// Owning, resizable 2-D numeric container.
///
/// Stored as a boxed array of row [`Vector`]s, all of identical width.
/// A matrix with zero rows or zero columns is "null"; constructing one is
/// valid and never an error. Every instance exclusively owns its rows, and
/// `Clone` is a deep copy.
///
/// Linear algebra (transpose, multiply, determinant, Gauss-Jordan inverse)
/// lives in the same module; shape and singularity problems are reported
/// through [`MatrixError`] instead of silently returning the left operand.
///
/// # Examples
///
/// ```
/// use sigmath::Matrix;
///
/// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(m[(0, 1)], 2.0);
/// let p = m.multiply(&Matrix::identity(2)).unwrap();
/// assert_eq!(p, m);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: Vec<Vector<T>>,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Create a null matrix (no rows, no columns).
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            ncols: 0,
        }
    }

    /// Create a zero-filled `nrows x ncols` matrix.
    ///
    /// Either dimension being 0 yields a null matrix.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        if nrows == 0 || ncols == 0 {
            return Self::new();
        }
        Self {
            rows: (0..nrows).map(|_| Vector::zeros(ncols)).collect(),
            ncols,
        }
    }

    /// Create a zero-filled matrix, reporting allocation failure.
    pub fn try_zeros(nrows: usize, ncols: usize) -> Result<Self, AllocError> {
        if nrows == 0 || ncols == 0 {
            return Ok(Self::new());
        }
        let mut rows = Vec::new();
        rows.try_reserve_exact(nrows)
            .map_err(|_| AllocError { requested: nrows })?;
        for _ in 0..nrows {
            rows.push(Vector::try_zeros(ncols)?);
        }
        Ok(Self { rows, ncols })
    }

    /// Create an `n x n` identity matrix.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let id = Matrix::<f64>::identity(3);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(1, 2)], 0.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.rows[i][i] = T::one();
        }
        m
    }

    /// Create a matrix from a flat slice in row-major order.
    ///
    /// Panics if `data.len() != nrows * ncols`.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, data: &[T]) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        if nrows == 0 || ncols == 0 {
            return Self::new();
        }
        Self {
            rows: data.chunks(ncols).map(Vector::from_slice).collect(),
            ncols,
        }
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        if nrows == 0 || ncols == 0 {
            return Self::new();
        }
        Self {
            rows: (0..nrows)
                .map(|i| Vector::from_fn(ncols, |j| f(i, j)))
                .collect(),
            ncols,
        }
    }
}

impl<T: Scalar> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shape and access ────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Row width.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether the matrix is null.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the matrix is square (null counts as square).
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows.len() == self.ncols
    }

    /// Checked row access.
    #[inline]
    pub fn row(&self, i: usize) -> Option<&Vector<T>> {
        self.rows.get(i)
    }

    /// Checked mutable row access.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> Option<&mut Vector<T>> {
        self.rows.get_mut(i)
    }

    /// Iterate over rows.
    #[inline]
    pub fn iter_rows(&self) -> core::slice::Iter<'_, Vector<T>> {
        self.rows.iter()
    }
}

impl<T: Scalar> Matrix<T> {
    /// Soft element read: `T::zero()` when either index is out of range.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> T {
        match self.rows.get(row) {
            Some(r) => r.at(col),
            None => T::zero(),
        }
    }

    /// Soft element write: ignored when either index is out of range.
    #[inline]
    pub fn set_at(&mut self, row: usize, col: usize, value: T) {
        if let Some(r) = self.rows.get_mut(row) {
            r.set_at(col, value);
        }
    }

    /// Copy `v` into row `i`, element-wise up to the shorter length.
    /// Out-of-range rows are ignored (soft semantics, like element writes).
    ///
    /// ```
    /// use sigmath::{Matrix, Vector};
    /// let mut m = Matrix::<f64>::zeros(2, 3);
    /// m.set_row(0, &Vector::from_slice(&[1.0, 2.0]));
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 2)], 0.0);
    /// ```
    pub fn set_row(&mut self, i: usize, v: &Vector<T>) {
        if let Some(r) = self.rows.get_mut(i) {
            r.copy_from(v);
        }
    }
}

// ── Resize ──────────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Resize to `nrows x ncols`.
    ///
    /// Row-count changes preserve the row objects whose indices overlap
    /// and allocate fresh zero rows elsewhere. A width change resizes
    /// every row, which discards that row's contents (per
    /// [`Vector::resize`]). Resizing to the current shape is a no-op.
    /// Either dimension being 0 collapses to a null matrix.
    pub fn resize(&mut self, nrows: usize, ncols: usize) -> Result<(), AllocError> {
        if nrows == 0 || ncols == 0 {
            self.rows.clear();
            self.ncols = 0;
            return Ok(());
        }
        if nrows == self.rows.len() && ncols == self.ncols {
            return Ok(());
        }
        self.rows.truncate(nrows);
        if ncols != self.ncols {
            for row in self.rows.iter_mut() {
                row.resize(ncols)?;
            }
        }
        while self.rows.len() < nrows {
            self.rows.push(Vector::try_zeros(ncols)?);
        }
        self.ncols = ncols;
        Ok(())
    }
}

// ── Transpose ───────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Return the `ncols x nrows` transpose.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = m.transpose();
    /// assert_eq!(t.nrows(), 3);
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.ncols, self.rows.len(), |i, j| self.rows[j][i])
    }
}

// ── Conversions and raw-buffer boundary ─────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Convert every element to another numeric type (see
    /// [`CastFrom`](crate::traits::CastFrom)).
    pub fn cast<U: Scalar + CastFrom<T>>(&self) -> Matrix<U> {
        Matrix {
            rows: self.rows.iter().map(|r| r.cast()).collect(),
            ncols: self.ncols,
        }
    }

    /// Apply a function to every element, producing a new matrix.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows.iter().map(|r| r.map(&f)).collect(),
            ncols: self.ncols,
        }
    }

    /// Bulk-fill from an interleaved sample buffer: one row per channel,
    /// one column per frame. A trailing partial frame is dropped. This and
    /// [`to_interleaved`](Matrix::to_interleaved) are the two entry points
    /// the external file-I/O layer needs.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// // L R L R L R
    /// let m = Matrix::from_interleaved(&[1.0, -1.0, 2.0, -2.0, 3.0, -3.0], 2);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.row(0).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
    /// assert_eq!(m.row(1).unwrap().as_slice(), &[-1.0, -2.0, -3.0]);
    /// ```
    pub fn from_interleaved(samples: &[T], channels: usize) -> Self {
        if channels == 0 {
            return Self::new();
        }
        let frames = samples.len() / channels;
        Self::from_fn(channels, frames, |ch, fr| samples[fr * channels + ch])
    }

    /// Bulk-read out as an interleaved sample buffer (frame-major).
    pub fn to_interleaved(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.rows.len() * self.ncols);
        for fr in 0..self.ncols {
            for row in &self.rows {
                out.push(row[fr]);
            }
        }
        out
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Matrix<T> {
    type Output = Vector<T>;

    #[inline]
    fn index(&self, i: usize) -> &Vector<T> {
        &self.rows[i]
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Vector<T> {
        &mut self.rows[i]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.rows[row][col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.rows[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_shape() {
        let m = Matrix::<f64>::zeros(3, 4);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        assert!(!m.is_square());
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn zero_dimension_is_null() {
        assert!(Matrix::<f64>::zeros(0, 5).is_empty());
        assert!(Matrix::<f64>::zeros(5, 0).is_empty());
        assert_eq!(Matrix::<f64>::zeros(5, 0).ncols(), 0);
    }

    #[test]
    fn identity() {
        let id = Matrix::<f64>::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn from_rows() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(1, 0)], 4.0);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn from_rows_wrong_length() {
        let _ = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn soft_access() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m.set_at(0, 1, 5.0);
        assert_eq!(m.at(0, 1), 5.0);
        assert_eq!(m.at(9, 9), 0.0);
        m.set_at(9, 9, 1.0); // ignored
        assert_eq!(m.at(9, 9), 0.0);
    }

    #[test]
    fn set_row_copies_min_length() {
        let mut m = Matrix::<f64>::zeros(2, 3);
        m.set_row(1, &Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(m.row(1).unwrap().as_slice(), &[1.0, 2.0, 3.0]);
        m.set_row(7, &Vector::from_slice(&[9.0]));
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn resize_same_shape_is_noop() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(2, 2).unwrap();
        assert_eq!(m[(1, 1)], 4.0);
    }

    #[test]
    fn resize_rows_preserves_overlap() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(3, 2).unwrap();
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 1)], 4.0);
        assert_eq!(m[(2, 0)], 0.0);

        m.resize(1, 2).unwrap();
        assert_eq!(m.nrows(), 1);
        assert_eq!(m[(0, 1)], 2.0);
    }

    #[test]
    fn resize_cols_discards_row_contents() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(2, 3).unwrap();
        assert_eq!(m.ncols(), 3);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(m[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn resize_to_zero_is_null() {
        let mut m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(0, 2).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.ncols(), 0);
    }

    #[test]
    fn transpose_involution() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = m.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.ncols(), 2);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn interleaved_round_trip() {
        let raw = [1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        let m = Matrix::from_interleaved(&raw, 2);
        assert_eq!(m.to_interleaved(), raw.to_vec());
    }

    #[test]
    fn interleaved_drops_partial_frame() {
        let m = Matrix::from_interleaved(&[1.0, 2.0, 3.0, 4.0, 5.0], 2);
        assert_eq!(m.ncols(), 2);
    }

    #[test]
    fn cast_matrix() {
        let m = Matrix::from_rows(2, 2, &[1_i16, -2, 3, -4]);
        let f: Matrix<f64> = m.cast();
        assert_eq!(f[(1, 1)], -4.0);
        let back: Matrix<i16> = f.cast();
        assert_eq!(back, m);
    }

    #[test]
    fn row_assignment_through_index() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m[0][1] = 8.0;
        assert_eq!(m[(0, 1)], 8.0);
    }
}
