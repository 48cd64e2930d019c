use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::traits::Scalar;

use super::Vector;

// Vector-vector arithmetic is deliberately length-forgiving: the assign
// forms iterate over `min(self.len(), rhs.len())` and leave any tail of
// `self` unmodified. Binary forms clone the left operand first, so the
// result always has the left operand's length. This truncation policy is
// part of the container contract, not an accident.

// ── Scalar broadcast ops ────────────────────────────────────────────

macro_rules! impl_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Scalar> $assign_trait<T> for Vector<T> {
            fn $assign_method(&mut self, rhs: T) {
                for x in self.data.iter_mut() {
                    *x = *x $op rhs;
                }
            }
        }

        impl<T: Scalar> $trait<T> for &Vector<T> {
            type Output = Vector<T>;
            fn $method(self, rhs: T) -> Vector<T> {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl<T: Scalar> $trait<T> for Vector<T> {
            type Output = Vector<T>;
            fn $method(mut self, rhs: T) -> Vector<T> {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_scalar_op!(Add, add, AddAssign, add_assign, +);
impl_scalar_op!(Sub, sub, SubAssign, sub_assign, -);
impl_scalar_op!(Mul, mul, MulAssign, mul_assign, *);
impl_scalar_op!(Div, div, DivAssign, div_assign, /);

// ── Element-wise vector-vector ops (min-length) ─────────────────────

macro_rules! impl_vector_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<T: Scalar> $assign_trait<&Vector<T>> for Vector<T> {
            fn $assign_method(&mut self, rhs: &Vector<T>) {
                let n = self.data.len().min(rhs.data.len());
                for i in 0..n {
                    self.data[i] = self.data[i] $op rhs.data[i];
                }
            }
        }

        impl<T: Scalar> $trait<&Vector<T>> for &Vector<T> {
            type Output = Vector<T>;
            fn $method(self, rhs: &Vector<T>) -> Vector<T> {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl<T: Scalar> $trait<&Vector<T>> for Vector<T> {
            type Output = Vector<T>;
            fn $method(mut self, rhs: &Vector<T>) -> Vector<T> {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_vector_op!(Add, add, AddAssign, add_assign, +);
impl_vector_op!(Sub, sub, SubAssign, sub_assign, -);
impl_vector_op!(Mul, mul, MulAssign, mul_assign, *);
impl_vector_op!(Div, div, DivAssign, div_assign, /);

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        Vector {
            data: self.data.iter().map(|&x| T::zero() - x).collect(),
        }
    }
}

impl<T: Scalar> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(mut self) -> Vector<T> {
        for x in self.data.iter_mut() {
            *x = T::zero() - *x;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_ops() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!((&v + 1.0).as_slice(), &[2.0, 3.0, 4.0]);
        assert_eq!((&v - 1.0).as_slice(), &[0.0, 1.0, 2.0]);
        assert_eq!((&v * 2.0).as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!((&v / 2.0).as_slice(), &[0.5, 1.0, 1.5]);
    }

    #[test]
    fn scalar_assign_ops() {
        let mut v = Vector::from_slice(&[2.0, 4.0]);
        v += 1.0;
        assert_eq!(v.as_slice(), &[3.0, 5.0]);
        v *= 2.0;
        assert_eq!(v.as_slice(), &[6.0, 10.0]);
        v -= 1.0;
        v /= 5.0;
        assert_eq!(v.as_slice(), &[1.0, 1.8]);
    }

    #[test]
    fn vector_add_truncates_to_min_length() {
        let mut a = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = Vector::from_slice(&[10.0, 10.0, 10.0]);
        a += &b;
        assert_eq!(a.as_slice(), &[11.0, 12.0, 13.0, 4.0, 5.0]);
    }

    #[test]
    fn vector_op_result_keeps_left_length() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[10.0, 10.0, 10.0]);
        let c = &a + &b;
        assert_eq!(c.as_slice(), &[11.0, 12.0]);

        let d = &b - &a;
        assert_eq!(d.as_slice(), &[9.0, 8.0, 10.0]);
    }

    #[test]
    fn elementwise_mul_div() {
        let a = Vector::from_slice(&[2.0, 6.0]);
        let b = Vector::from_slice(&[3.0, 2.0]);
        assert_eq!((&a * &b).as_slice(), &[6.0, 12.0]);
        assert_eq!((&a / &b).as_slice(), &[2.0 / 3.0, 3.0]);
    }

    #[test]
    fn neg() {
        let v = Vector::from_slice(&[1.0, -2.0]);
        assert_eq!((-&v).as_slice(), &[-1.0, 2.0]);
    }

    #[test]
    fn integer_elements() {
        let mut v = Vector::from_slice(&[1_i32, 2, 3]);
        v *= 3;
        assert_eq!(v.as_slice(), &[3, 6, 9]);
    }
}
