use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::Matrix;

// Element-wise matrix arithmetic requires matching shapes; unlike the
// vector ops there is no truncation policy here, a shape clash is a
// programmer error.

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_matrix_elementwise {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Scalar> $assign_trait<&Matrix<T>> for Matrix<T> {
            fn $assign_method(&mut self, rhs: &Matrix<T>) {
                assert_eq!(
                    (self.nrows(), self.ncols()),
                    (rhs.nrows(), rhs.ncols()),
                    "dimension mismatch: {}x{} vs {}x{}",
                    self.nrows(), self.ncols(), rhs.nrows(), rhs.ncols(),
                );
                for (a, b) in self.rows.iter_mut().zip(rhs.rows.iter()) {
                    for j in 0..b.len() {
                        a[j] = a[j] $op b[j];
                    }
                }
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(mut self, rhs: &Matrix<T>) -> Matrix<T> {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_matrix_elementwise!(Add, add, AddAssign, add_assign, +);
impl_matrix_elementwise!(Sub, sub, SubAssign, sub_assign, -);

// ── Scalar broadcast ────────────────────────────────────────────────

macro_rules! impl_matrix_scalar {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl<T: Scalar> $assign_trait<T> for Matrix<T> {
            fn $assign_method(&mut self, rhs: T) {
                for row in self.rows.iter_mut() {
                    row.$assign_method(rhs);
                }
            }
        }

        impl<T: Scalar> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;
            fn $method(self, rhs: T) -> Matrix<T> {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl<T: Scalar> $trait<T> for Matrix<T> {
            type Output = Matrix<T>;
            fn $method(mut self, rhs: T) -> Matrix<T> {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_matrix_scalar!(Mul, mul, MulAssign, mul_assign);
impl_matrix_scalar!(Div, div, DivAssign, div_assign);

// ── Matrix product operator ─────────────────────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    /// Operator form of [`Matrix::multiply`]; panics on shape mismatch.
    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        match self.multiply(rhs) {
            Ok(m) => m,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Scalar> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| T::zero() - x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_sub() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = &a + &b;
        assert_eq!(c[(0, 0)], 6.0);
        assert_eq!(c[(1, 1)], 12.0);
        let d = &b - &a;
        assert_eq!(d[(0, 1)], 4.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn add_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(2, 3);
        let _ = &a + &b;
    }

    #[test]
    fn scalar_scale() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = &a * 2.0;
        assert_eq!(b[(1, 1)], 8.0);
        let c = &b / 2.0;
        assert_eq!(c, a);
    }

    #[test]
    fn mul_operator_matches_multiply() {
        let a = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(&a * &b, a.multiply(&b).unwrap());
    }

    #[test]
    fn neg() {
        let a = Matrix::from_rows(2, 2, &[1.0, -2.0, 3.0, -4.0]);
        let b = -&a;
        assert_eq!(b[(0, 1)], 2.0);
    }
}
