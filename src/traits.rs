use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be stored in [`Vector`](crate::Vector) and
/// [`Matrix`](crate::Matrix).
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all primitive integer types.
pub trait Scalar: Copy + PartialEq + PartialOrd + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + PartialOrd + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point elements.
///
/// Required by operations that need `sqrt`, `abs`, `sin`, etc.
/// (norms, determinants, inversion, filter design).
pub trait FloatScalar: Scalar + Float {}

impl<T: Scalar + Float> FloatScalar for T {}

/// Explicit numeric conversion with the target type's native `as` semantics.
///
/// This is the single auditable precision-loss point of the crate: raw PCM
/// sample buffers (`i16`, `i32`) become `f64` math buffers through it, and
/// computed results go back the same way. Float-to-integer conversion
/// truncates toward zero and saturates at the integer type's bounds.
///
/// ```
/// use sigmath::traits::CastFrom;
///
/// assert_eq!(i16::cast_from(1.9_f64), 1);
/// assert_eq!(i16::cast_from(1e9_f64), i16::MAX);
/// assert_eq!(f64::cast_from(-3_i16), -3.0);
/// ```
pub trait CastFrom<U>: Sized {
    fn cast_from(value: U) -> Self;
}

macro_rules! impl_cast_from {
    ($dst:ty; $($src:ty),*) => {
        $(
            impl CastFrom<$src> for $dst {
                #[inline]
                fn cast_from(value: $src) -> $dst {
                    value as $dst
                }
            }
        )*
    };
}

macro_rules! impl_cast_from_all {
    ($($dst:ty),*) => {
        $(
            impl_cast_from!($dst; i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);
        )*
    };
}

impl_cast_from_all!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_is_exact() {
        assert_eq!(f64::cast_from(12345_i16), 12345.0);
        assert_eq!(i64::cast_from(-7_i8), -7);
        assert_eq!(f64::cast_from(0.5_f32), 0.5);
    }

    #[test]
    fn narrowing_truncates() {
        assert_eq!(i16::cast_from(3.99_f64), 3);
        assert_eq!(i16::cast_from(-3.99_f64), -3);
        assert_eq!(i8::cast_from(300_i32), 44); // native `as` wrap for int-to-int
    }

    #[test]
    fn float_to_int_saturates() {
        assert_eq!(i16::cast_from(1e12_f64), i16::MAX);
        assert_eq!(i16::cast_from(-1e12_f64), i16::MIN);
        assert_eq!(u8::cast_from(-1.0_f64), 0);
    }
}
