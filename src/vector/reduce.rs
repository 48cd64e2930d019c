use crate::traits::{FloatScalar, Scalar};

use super::Vector;

// Reductions on a null vector return `T::zero()` rather than failing;
// callers that care distinguish the cases with `is_empty()` first.

impl<T: Scalar> Vector<T> {
    /// Largest element, or zero for a null vector.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[3.0, -1.0, 2.0]);
    /// assert_eq!(v.max(), 3.0);
    /// ```
    pub fn max(&self) -> T {
        let mut it = self.data.iter().copied();
        let Some(mut best) = it.next() else {
            return T::zero();
        };
        for x in it {
            if x > best {
                best = x;
            }
        }
        best
    }

    /// Smallest element, or zero for a null vector.
    pub fn min(&self) -> T {
        let mut it = self.data.iter().copied();
        let Some(mut best) = it.next() else {
            return T::zero();
        };
        for x in it {
            if x < best {
                best = x;
            }
        }
        best
    }

    /// Sum of all elements.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(v.sum(), 10.0);
    /// ```
    pub fn sum(&self) -> T {
        let mut s = T::zero();
        for &x in &self.data {
            s = s + x;
        }
        s
    }

    /// Pairwise product-sum over `min(self.len(), rhs.len())` elements.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> T {
        let n = self.data.len().min(rhs.data.len());
        let mut s = T::zero();
        for i in 0..n {
            s = s + self.data[i] * rhs.data[i];
        }
        s
    }
}

impl<T: FloatScalar> Vector<T> {
    /// Largest absolute value, or zero for a null vector.
    pub fn max_abs(&self) -> T {
        let mut best = T::zero();
        for &x in &self.data {
            if x.abs() > best {
                best = x.abs();
            }
        }
        best
    }

    /// Smallest absolute value, or zero for a null vector.
    pub fn min_abs(&self) -> T {
        let mut it = self.data.iter().copied();
        let Some(first) = it.next() else {
            return T::zero();
        };
        let mut best = first.abs();
        for x in it {
            if x.abs() < best {
                best = x.abs();
            }
        }
        best
    }

    /// Arithmetic mean (`sum / len`), or zero for a null vector.
    pub fn mean(&self) -> T {
        if self.data.is_empty() {
            return T::zero();
        }
        self.sum() / T::from(self.data.len()).unwrap_or_else(T::one)
    }

    /// Euclidean norm `sqrt(Σ x²)`.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reductions_reference_values() {
        let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(v.sum(), 36.0);
        assert_eq!(v.max(), 8.0);
        assert_eq!(v.min(), 1.0);
        assert!((v.mean() - 4.5).abs() < 1e-12);
        assert!((v.norm() - 204.0_f64.sqrt()).abs() < 1e-12);
        assert!((v.dot(&v) - 204.0).abs() < 1e-12);
    }

    #[test]
    fn abs_reductions() {
        let v = Vector::from_slice(&[-3.0, 1.0, -7.0, 2.0]);
        assert_eq!(v.max_abs(), 7.0);
        assert_eq!(v.min_abs(), 1.0);
    }

    #[test]
    fn max_with_negatives() {
        let v = Vector::from_slice(&[-5.0, -2.0, -9.0]);
        assert_eq!(v.max(), -2.0);
        assert_eq!(v.min(), -9.0);
    }

    #[test]
    fn empty_reductions_are_zero() {
        let v: Vector<f64> = Vector::new();
        assert_eq!(v.sum(), 0.0);
        assert_eq!(v.max(), 0.0);
        assert_eq!(v.min(), 0.0);
        assert_eq!(v.max_abs(), 0.0);
        assert_eq!(v.min_abs(), 0.0);
        assert_eq!(v.mean(), 0.0);
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn dot_truncates_to_min_length() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 5.0]);
        assert_eq!(a.dot(&b), 14.0);
    }

    #[test]
    fn integer_reductions() {
        let v = Vector::from_slice(&[4_i32, 1, 7]);
        assert_eq!(v.sum(), 12);
        assert_eq!(v.max(), 7);
        assert_eq!(v.min(), 1);
    }
}
