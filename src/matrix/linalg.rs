use alloc::vec::Vec;

use crate::traits::{FloatScalar, Scalar};
use crate::vector::Vector;

use super::Matrix;

/// Magnitudes below this are treated as zero pivots during elimination.
const SINGULAR_THRESHOLD: f64 = 1e-10;

/// Errors from matrix algebra.
///
/// Shape and singularity problems are explicit results; callers must
/// handle them rather than silently continuing with wrong data.
///
/// ```
/// use sigmath::{Matrix, MatrixError};
///
/// let a = Matrix::<f64>::zeros(2, 3);
/// let b = Matrix::<f64>::zeros(2, 2);
/// assert!(matches!(a.multiply(&b), Err(MatrixError::DimensionMismatch { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible (`left.ncols != right.nrows`, or a
    /// vector length does not match).
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Determinant or inverse requested on a non-square matrix.
    NotSquare { nrows: usize, ncols: usize },
    /// Elimination found no pivot above the singularity threshold.
    Singular,
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::DimensionMismatch { left, right } => write!(
                f,
                "dimension mismatch: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::NotSquare { nrows, ncols } => {
                write!(f, "matrix is {nrows}x{ncols}, not square")
            }
            MatrixError::Singular => write!(f, "matrix is singular or nearly singular"),
        }
    }
}

// ── Multiply ────────────────────────────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Matrix product `(M x N) * (N x P) -> (M x P)` by triple-loop
    /// dot-product accumulation.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
    /// let c = a.multiply(&b).unwrap();
    /// assert_eq!(c[(0, 0)], 19.0);
    /// assert_eq!(c[(1, 1)], 50.0);
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Result<Self, MatrixError> {
        if self.ncols() != rhs.nrows() {
            return Err(MatrixError::DimensionMismatch {
                left: (self.nrows(), self.ncols()),
                right: (rhs.nrows(), rhs.ncols()),
            });
        }
        let m = self.nrows();
        let n = self.ncols();
        let p = rhs.ncols();
        let mut out = Self::zeros(m, p);
        for r in 0..m {
            for k in 0..n {
                let a_rk = self[(r, k)];
                for c in 0..p {
                    out[(r, c)] = out[(r, c)] + a_rk * rhs[(k, c)];
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `(M x N) * (N) -> (M)`.
    pub fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>, MatrixError> {
        if self.ncols() != v.len() {
            return Err(MatrixError::DimensionMismatch {
                left: (self.nrows(), self.ncols()),
                right: (v.len(), 1),
            });
        }
        Ok(Vector::from_fn(self.nrows(), |i| self[i].dot(v)))
    }
}

// ── Determinant ─────────────────────────────────────────────────────

impl<T: FloatScalar> Matrix<T> {
    /// Determinant of a square matrix.
    ///
    /// Closed-form for 1x1, 2x2, and 3x3 (Sarrus' rule); recursive
    /// cofactor expansion along column 0 beyond that. The recursion is
    /// **O(n!)** — it matches the reference algorithm faithfully and is
    /// only intended for small matrices. Returns
    /// [`MatrixError::NotSquare`] for rectangular input; the determinant
    /// of a null matrix is 1 (empty product).
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[3.0_f64, 8.0, 4.0, 6.0]);
    /// assert!((m.determinant().unwrap() + 14.0).abs() < 1e-12);
    /// ```
    pub fn determinant(&self) -> Result<T, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: self.nrows(),
                ncols: self.ncols(),
            });
        }
        Ok(det_recursive(self))
    }

    /// Inverse of a square matrix via Gauss-Jordan elimination on the
    /// augmented `[A | I]` system.
    ///
    /// Each row is first normalized by its maximum-absolute coefficient
    /// (conditioning), then columns are eliminated with partial pivoting:
    /// the largest-magnitude candidate below the diagonal becomes the
    /// pivot. If no candidate exceeds the 1e-10 threshold the matrix is
    /// reported as [`MatrixError::Singular`] — never a silently wrong
    /// inverse.
    ///
    /// ```
    /// use sigmath::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[4.0_f64, 7.0, 2.0, 6.0]);
    /// let inv = m.inverse().unwrap();
    /// let id = m.multiply(&inv).unwrap();
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!(id[(0, 1)].abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: self.nrows(),
                ncols: self.ncols(),
            });
        }
        let n = self.nrows();
        if n == 0 {
            return Ok(Self::new());
        }
        let threshold = T::from(SINGULAR_THRESHOLD).unwrap_or_else(T::epsilon);

        // Build [A | I], normalizing each row by its max-abs coefficient.
        let mut aug = Self::zeros(n, 2 * n);
        for i in 0..n {
            let scale = self[i].max_abs();
            if scale < threshold {
                return Err(MatrixError::Singular);
            }
            for j in 0..n {
                aug[(i, j)] = self[(i, j)] / scale;
            }
            aug[(i, n + i)] = T::one() / scale;
        }

        for col in 0..n {
            // Partial pivot: largest magnitude in this column, at or
            // below the diagonal.
            let mut pivot_row = col;
            let mut pivot_mag = aug[(col, col)].abs();
            for r in (col + 1)..n {
                let mag = aug[(r, col)].abs();
                if mag > pivot_mag {
                    pivot_mag = mag;
                    pivot_row = r;
                }
            }
            if pivot_mag < threshold {
                return Err(MatrixError::Singular);
            }
            if pivot_row != col {
                aug.rows.swap(pivot_row, col);
            }

            let pivot = aug[(col, col)];
            for j in 0..2 * n {
                aug[(col, j)] = aug[(col, j)] / pivot;
            }

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = aug[(r, col)];
                if factor == T::zero() {
                    continue;
                }
                for j in 0..2 * n {
                    let v = aug[(col, j)];
                    aug[(r, j)] = aug[(r, j)] - factor * v;
                }
            }
        }

        // Right half of the augmented system is the inverse.
        Ok(Self::from_fn(n, n, |i, j| aug[(i, n + j)]))
    }
}

fn det_recursive<T: FloatScalar>(m: &Matrix<T>) -> T {
    let n = m.nrows();
    match n {
        0 => T::one(),
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        3 => {
            // Sarrus' rule.
            m[(0, 0)] * m[(1, 1)] * m[(2, 2)]
                + m[(0, 1)] * m[(1, 2)] * m[(2, 0)]
                + m[(0, 2)] * m[(1, 0)] * m[(2, 1)]
                - m[(0, 2)] * m[(1, 1)] * m[(2, 0)]
                - m[(0, 1)] * m[(1, 0)] * m[(2, 2)]
                - m[(0, 0)] * m[(1, 2)] * m[(2, 1)]
        }
        _ => {
            // Cofactor expansion along column 0.
            let mut det = T::zero();
            for i in 0..n {
                let a_i0 = m[(i, 0)];
                if a_i0 == T::zero() {
                    continue;
                }
                let minor = minor_matrix(m, i, 0);
                let cofactor = a_i0 * det_recursive(&minor);
                det = if i % 2 == 0 {
                    det + cofactor
                } else {
                    det - cofactor
                };
            }
            det
        }
    }
}

/// Copy of `m` with row `skip_row` and column `skip_col` removed.
fn minor_matrix<T: FloatScalar>(m: &Matrix<T>, skip_row: usize, skip_col: usize) -> Matrix<T> {
    let n = m.nrows();
    let rows: Vec<usize> = (0..n).filter(|&r| r != skip_row).collect();
    let cols: Vec<usize> = (0..n).filter(|&c| c != skip_col).collect();
    Matrix::from_fn(n - 1, n - 1, |i, j| m[(rows[i], cols[j])])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "got {a}, expected {b}");
    }

    #[test]
    fn multiply_known_product() {
        let a = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.nrows(), 2);
        assert_eq!(c.ncols(), 2);
        assert_eq!(c[(0, 0)], 58.0);
        assert_eq!(c[(0, 1)], 64.0);
        assert_eq!(c[(1, 0)], 139.0);
        assert_eq!(c[(1, 1)], 154.0);
    }

    #[test]
    fn multiply_identity_is_noop() {
        let m = Matrix::from_rows(3, 3, &[2.0, -1.0, 0.5, 3.0, 0.0, 1.0, -2.0, 4.0, 7.0]);
        let p = m.multiply(&Matrix::identity(3)).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_close(p[(i, j)], m[(i, j)], 1e-12);
            }
        }
    }

    #[test]
    fn multiply_dimension_mismatch_is_error() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(2, 2);
        assert_eq!(
            a.multiply(&b),
            Err(MatrixError::DimensionMismatch {
                left: (2, 3),
                right: (2, 2),
            })
        );
    }

    #[test]
    fn mul_vector() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = Vector::from_slice(&[1.0, 0.0, -1.0]);
        let r = m.mul_vector(&v).unwrap();
        assert_eq!(r.as_slice(), &[-2.0, -2.0]);
        assert!(m.mul_vector(&Vector::zeros(2)).is_err());
    }

    #[test]
    fn det_small_sizes() {
        let d1 = Matrix::from_rows(1, 1, &[5.0]).determinant().unwrap();
        assert_close(d1, 5.0, 1e-12);

        let d2 = Matrix::from_rows(2, 2, &[3.0, 8.0, 4.0, 6.0])
            .determinant()
            .unwrap();
        assert_close(d2, -14.0, 1e-12);

        let d3 = Matrix::from_rows(3, 3, &[6.0, 1.0, 1.0, 4.0, -2.0, 5.0, 2.0, 8.0, 7.0])
            .determinant()
            .unwrap();
        assert_close(d3, -306.0, 1e-10);
    }

    #[test]
    fn det_4x4_known_value() {
        let m = Matrix::from_rows(
            4,
            4,
            &[
                1.0, 2.0, 1.0, 1.0, //
                3.0, 2.0, 4.0, 1.0, //
                5.0, -1.0, 3.0, 1.0, //
                1.0, 1.0, 1.0, 1.0,
            ],
        );
        assert_close(m.determinant().unwrap(), 1.0, 1e-9);
    }

    #[test]
    fn det_not_square() {
        let m = Matrix::<f64>::zeros(2, 3);
        assert_eq!(
            m.determinant(),
            Err(MatrixError::NotSquare { nrows: 2, ncols: 3 })
        );
    }

    #[test]
    fn det_null_is_one() {
        let m = Matrix::<f64>::new();
        assert_eq!(m.determinant().unwrap(), 1.0);
    }

    #[test]
    fn inverse_4x4_times_original_is_identity() {
        let m = Matrix::from_rows(
            4,
            4,
            &[
                3.0, 2.0, 1.0, 0.0, //
                1.0, 2.0, 3.0, 4.0, //
                2.0, 1.0, 0.0, 1.0, //
                2.0, 0.0, 2.0, 1.0,
            ],
        );
        let inv = m.inverse().unwrap();
        let id = m.multiply(&inv).unwrap();
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_close(id[(i, j)], expected, 1e-9);
            }
        }
    }

    #[test]
    fn inverse_agrees_with_determinant_2x2() {
        let m = Matrix::from_rows(2, 2, &[4.0, 7.0, 2.0, 6.0]);
        let inv = m.inverse().unwrap();
        // [[0.6, -0.7], [-0.2, 0.4]]
        assert_close(inv[(0, 0)], 0.6, 1e-12);
        assert_close(inv[(0, 1)], -0.7, 1e-12);
        assert_close(inv[(1, 0)], -0.2, 1e-12);
        assert_close(inv[(1, 1)], 0.4, 1e-12);
    }

    #[test]
    fn inverse_zero_row_is_singular() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 0.0, 0.0]);
        assert_eq!(m.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn inverse_linearly_dependent_rows_is_singular() {
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(m.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn inverse_near_singular_is_detected() {
        // Second row is a 1e-13 perturbation of the first.
        let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 1.0, 2.0 + 1e-13]);
        assert_eq!(m.inverse(), Err(MatrixError::Singular));
    }

    #[test]
    fn inverse_not_square() {
        let m = Matrix::<f64>::zeros(3, 2);
        assert!(matches!(m.inverse(), Err(MatrixError::NotSquare { .. })));
    }

    #[test]
    fn inverse_needs_pivoting() {
        // Zero in the (0,0) position forces a row swap.
        let m = Matrix::from_rows(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let inv = m.inverse().unwrap();
        assert_close(inv[(0, 1)], 1.0, 1e-12);
        assert_close(inv[(1, 0)], 1.0, 1e-12);
        assert_close(inv[(0, 0)], 0.0, 1e-12);
    }
}
