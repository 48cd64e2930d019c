use core::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::matrix::{Matrix, MatrixError};
use crate::simd;
use crate::vector::AllocError;

use super::{padded_len, AlignedVector};

/// A 32-byte-aligned `f64` matrix.
///
/// One contiguous allocation; each row starts on a 32-byte boundary
/// because the row stride is rounded up to a whole number of 4-lane
/// groups. Row access hands out plain slices, so a row can feed any
/// kernel or [`AlignedVector`] operation without copying.
///
/// Square-matrix algebra (determinant, inverse) delegates to the
/// generic [`Matrix<f64>`] path; the aligned type earns its keep in
/// the row-dot inner loops of [`multiply`](AlignedMatrix::multiply)
/// and [`mul_vector`](AlignedMatrix::mul_vector).
///
/// ```
/// use sigmath::AlignedMatrix;
///
/// let m = AlignedMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
/// assert_eq!(m.row(1).as_ptr() as usize % 32, 0);
/// ```
#[derive(Clone, PartialEq)]
pub struct AlignedMatrix {
    buf: AlignedVector,
    nrows: usize,
    ncols: usize,
    /// Row stride in elements, a lane multiple, `>= ncols`.
    stride: usize,
}

// ── Construction ────────────────────────────────────────────────────

impl AlignedMatrix {
    /// A null matrix. Allocates nothing.
    pub fn new() -> Self {
        AlignedMatrix {
            buf: AlignedVector::new(),
            nrows: 0,
            ncols: 0,
            stride: 0,
        }
    }

    /// An `nrows x ncols` matrix of zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        if nrows == 0 || ncols == 0 {
            return Self::new();
        }
        let stride = padded_len(ncols);
        AlignedMatrix {
            buf: AlignedVector::zeros(nrows * stride),
            nrows,
            ncols,
            stride,
        }
    }

    /// An `nrows x ncols` matrix of zeros, reporting allocation failure.
    pub fn try_zeros(nrows: usize, ncols: usize) -> Result<Self, AllocError> {
        if nrows == 0 || ncols == 0 {
            return Ok(Self::new());
        }
        let stride = padded_len(ncols);
        Ok(AlignedMatrix {
            buf: AlignedVector::try_zeros(nrows * stride)?,
            nrows,
            ncols,
            stride,
        })
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from a flat row-major slice.
    ///
    /// Panics if `data.len() != nrows * ncols`; a malformed literal is a
    /// programmer error, not a data condition.
    pub fn from_rows(nrows: usize, ncols: usize, data: &[f64]) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "from_rows: {} elements for a {}x{} matrix",
            data.len(),
            nrows,
            ncols
        );
        let mut m = Self::zeros(nrows, ncols);
        for r in 0..nrows {
            m.row_mut(r).copy_from_slice(&data[r * ncols..(r + 1) * ncols]);
        }
        m
    }

    /// An aligned copy of a generic matrix.
    pub fn from_matrix(src: &Matrix<f64>) -> Self {
        let mut m = Self::zeros(src.nrows(), src.ncols());
        for r in 0..src.nrows() {
            m.row_mut(r).copy_from_slice(src[r].as_slice());
        }
        m
    }

    /// Copy out into a generic [`Matrix<f64>`].
    pub fn to_matrix(&self) -> Matrix<f64> {
        Matrix::from_fn(self.nrows, self.ncols, |r, c| self[(r, c)])
    }
}

impl Default for AlignedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

// ── Access ──────────────────────────────────────────────────────────

impl AlignedMatrix {
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Row `r` as an aligned slice of `ncols` elements.
    #[inline]
    pub fn row(&self, r: usize) -> &[f64] {
        &self.buf.as_slice()[r * self.stride..r * self.stride + self.ncols]
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [f64] {
        let start = r * self.stride;
        let ncols = self.ncols;
        &mut self.buf.as_mut_slice()[start..start + ncols]
    }

    /// Soft read: the element, or `0.0` when either index is out of
    /// range. Never panics.
    #[inline]
    pub fn at(&self, r: usize, c: usize) -> f64 {
        if r < self.nrows && c < self.ncols {
            self.buf.as_slice()[r * self.stride + c]
        } else {
            0.0
        }
    }

    /// Soft write: stores `value` at `(r, c)`, or does nothing out of
    /// range.
    #[inline]
    pub fn set_at(&mut self, r: usize, c: usize, value: f64) {
        if r < self.nrows && c < self.ncols {
            let stride = self.stride;
            self.buf.as_mut_slice()[r * stride + c] = value;
        }
    }
}

// ── Resize / transpose ──────────────────────────────────────────────

impl AlignedMatrix {
    /// Resize to `nrows x ncols`. Changing only the row count keeps the
    /// overlapping rows' contents; changing the column count discards
    /// everything (the result is zero-filled). Either dimension at zero
    /// collapses to the null matrix.
    pub fn resize(&mut self, nrows: usize, ncols: usize) -> Result<(), AllocError> {
        if nrows == self.nrows && ncols == self.ncols {
            return Ok(());
        }
        if nrows == 0 || ncols == 0 {
            *self = Self::new();
            return Ok(());
        }
        let mut next = Self::try_zeros(nrows, ncols)?;
        if ncols == self.ncols {
            for r in 0..nrows.min(self.nrows) {
                next.row_mut(r).copy_from_slice(self.row(r));
            }
        }
        *self = next;
        Ok(())
    }

    /// The transposed matrix (`ncols x nrows`).
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.ncols, self.nrows);
        for r in 0..self.nrows {
            for c in 0..self.ncols {
                out[(c, r)] = self[(r, c)];
            }
        }
        out
    }
}

// ── Algebra ─────────────────────────────────────────────────────────

impl AlignedMatrix {
    /// Matrix product via SIMD row dots against the transposed right
    /// operand, so both sides of every dot stream contiguously.
    ///
    /// ```
    /// use sigmath::AlignedMatrix;
    /// let a = AlignedMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = AlignedMatrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c[(1, 0)], 43.0);
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Result<Self, MatrixError> {
        if self.ncols != rhs.nrows {
            return Err(MatrixError::DimensionMismatch {
                left: (self.nrows, self.ncols),
                right: (rhs.nrows, rhs.ncols),
            });
        }
        let rhs_t = rhs.transpose();
        let mut out = Self::zeros(self.nrows, rhs.ncols);
        for r in 0..self.nrows {
            for c in 0..rhs.ncols {
                out[(r, c)] = simd::dot(self.row(r), rhs_t.row(c));
            }
        }
        Ok(out)
    }

    /// Matrix-vector product.
    pub fn mul_vector(&self, v: &AlignedVector) -> Result<AlignedVector, MatrixError> {
        if self.ncols != v.len() {
            return Err(MatrixError::DimensionMismatch {
                left: (self.nrows, self.ncols),
                right: (v.len(), 1),
            });
        }
        let mut out = AlignedVector::zeros(self.nrows);
        for r in 0..self.nrows {
            out[r] = simd::dot(self.row(r), v.as_slice());
        }
        Ok(out)
    }

    /// Determinant, via the generic elimination path.
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.to_matrix().determinant()
    }

    /// Inverse, via the generic Gauss-Jordan path.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        Ok(Self::from_matrix(&self.to_matrix().inverse()?))
    }
}

// ── Operators ───────────────────────────────────────────────────────

macro_rules! impl_aligned_matrix_elementwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl $assign_trait<&AlignedMatrix> for AlignedMatrix {
            fn $assign_method(&mut self, rhs: &AlignedMatrix) {
                assert_eq!(
                    (self.nrows, self.ncols),
                    (rhs.nrows, rhs.ncols),
                    "dimension mismatch: {}x{} vs {}x{}",
                    self.nrows,
                    self.ncols,
                    rhs.nrows,
                    rhs.ncols
                );
                for r in 0..self.nrows {
                    let stride = self.stride;
                    let ncols = self.ncols;
                    let a = &mut self.buf.as_mut_slice()[r * stride..r * stride + ncols];
                    simd::$kernel(a, rhs.row(r));
                }
            }
        }

        impl $trait<&AlignedMatrix> for &AlignedMatrix {
            type Output = AlignedMatrix;
            fn $method(self, rhs: &AlignedMatrix) -> AlignedMatrix {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }
    };
}

impl_aligned_matrix_elementwise!(Add, add, AddAssign, add_assign, add_assign);
impl_aligned_matrix_elementwise!(Sub, sub, SubAssign, sub_assign, sub_assign);

macro_rules! impl_aligned_matrix_scalar {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl $assign_trait<f64> for AlignedMatrix {
            fn $assign_method(&mut self, rhs: f64) {
                for r in 0..self.nrows {
                    simd::$kernel(self.row_mut(r), rhs);
                }
            }
        }

        impl $trait<f64> for &AlignedMatrix {
            type Output = AlignedMatrix;
            fn $method(self, rhs: f64) -> AlignedMatrix {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }
    };
}

impl_aligned_matrix_scalar!(Mul, mul, MulAssign, mul_assign, mul_scalar);
impl_aligned_matrix_scalar!(Div, div, DivAssign, div_assign, div_scalar);

impl Neg for &AlignedMatrix {
    type Output = AlignedMatrix;

    fn neg(self) -> AlignedMatrix {
        let mut out = self.clone();
        out *= -1.0;
        out
    }
}

impl Index<(usize, usize)> for AlignedMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &f64 {
        assert!(r < self.nrows && c < self.ncols);
        &self.buf.as_slice()[r * self.stride + c]
    }
}

impl IndexMut<(usize, usize)> for AlignedMatrix {
    #[inline]
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f64 {
        assert!(r < self.nrows && c < self.ncols);
        let stride = self.stride;
        &mut self.buf.as_mut_slice()[r * stride + c]
    }
}

impl core::fmt::Debug for AlignedMatrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.nrows {
            list.entry(&self.row(r));
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned_for_odd_widths() {
        for ncols in [1, 2, 3, 4, 5, 7, 9] {
            let m = AlignedMatrix::zeros(3, ncols);
            for r in 0..3 {
                assert_eq!(m.row(r).as_ptr() as usize % 32, 0);
                assert_eq!(m.row(r).len(), ncols);
            }
        }
    }

    #[test]
    fn multiply_matches_generic_path() {
        let a = AlignedMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = AlignedMatrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let fast = a.multiply(&b).unwrap();
        let slow = a.to_matrix().multiply(&b.to_matrix()).unwrap();
        for r in 0..2 {
            for c in 0..2 {
                assert!((fast[(r, c)] - slow[(r, c)]).abs() < 1e-12);
            }
        }
        assert!(a.multiply(&a).is_err());
    }

    #[test]
    fn mul_vector() {
        let m = AlignedMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = AlignedVector::from_slice(&[1.0, 0.0, -1.0]);
        let r = m.mul_vector(&v).unwrap();
        assert_eq!(r.as_slice(), &[-2.0, -2.0]);
    }

    #[test]
    fn inverse_round_trip() {
        let m = AlignedMatrix::from_rows(3, 3, &[2.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 3.0]);
        let inv = m.inverse().unwrap();
        let id = m.multiply(&inv).unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert!((id[(r, c)] - expected).abs() < 1e-9);
            }
        }
        assert_eq!(
            AlignedMatrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]).inverse(),
            Err(MatrixError::Singular)
        );
    }

    #[test]
    fn transpose() {
        let m = AlignedMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = m.transpose();
        assert_eq!(t.nrows(), 3);
        assert_eq!(t.row(0), &[1.0, 4.0]);
        assert_eq!(t.row(2), &[3.0, 6.0]);
    }

    #[test]
    fn resize_keeps_rows_only_when_width_unchanged() {
        let mut m = AlignedMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.resize(3, 2).unwrap();
        assert_eq!(m.row(0), &[1.0, 2.0]);
        assert_eq!(m.row(2), &[0.0, 0.0]);
        m.resize(3, 4).unwrap();
        assert_eq!(m.row(0), &[0.0, 0.0, 0.0, 0.0]);
        m.resize(0, 4).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn soft_access() {
        let mut m = AlignedMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.at(1, 1), 4.0);
        assert_eq!(m.at(2, 0), 0.0);
        assert_eq!(m.at(0, 9), 0.0);
        m.set_at(0, 0, 5.0);
        m.set_at(9, 9, 7.0);
        assert_eq!(m.row(0), &[5.0, 2.0]);
    }

    #[test]
    fn elementwise_and_scalar_ops() {
        let a = AlignedMatrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = AlignedMatrix::identity(3);
        let sum = &a + &a;
        assert_eq!(sum.row(1), &[8.0, 10.0, 12.0]);
        let diff = &sum - &a;
        assert_eq!(diff.row(0), &[1.0, 2.0, 3.0]);
        let scaled = &a * 2.0;
        assert_eq!(scaled.row(0), &[2.0, 4.0, 6.0]);
        let halved = &scaled / 2.0;
        assert_eq!(halved.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!((-&b)[(2, 2)], -1.0);
    }
}
