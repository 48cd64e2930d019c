//! SIMD-accelerated f64 kernels with compile-time architecture dispatch.
//!
//! This module is private — it provides internal acceleration for the
//! aligned containers. The public API is unchanged.
//!
//! The kernel set is selected at compile time: AVX when the build
//! targets it (`-C target-feature=+avx` or `-C target-cpu=native`),
//! otherwise SSE2 on x86_64, NEON on aarch64, and the portable scalar
//! fallback elsewhere. All kernels accept unaligned slices (loads and
//! stores are unaligned); alignment only improves throughput.
//!
//! The branchy reductions (`max`, `min`, and the absolute-value
//! variants) stay scalar on every architecture.

pub(crate) mod scalar;

#[cfg(target_arch = "aarch64")]
pub(crate) mod f64_neon;

#[cfg(all(target_arch = "x86_64", not(target_feature = "avx")))]
pub(crate) mod f64_sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub(crate) mod f64_avx;

#[cfg(target_arch = "aarch64")]
use f64_neon as kernel;

#[cfg(all(target_arch = "x86_64", not(target_feature = "avx")))]
use f64_sse2 as kernel;

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
use f64_avx as kernel;

#[cfg(not(any(target_arch = "aarch64", target_arch = "x86_64")))]
use scalar as kernel;

#[inline]
pub(crate) fn fill(dst: &mut [f64], value: f64) {
    kernel::fill(dst, value)
}

#[inline]
pub(crate) fn add_assign(a: &mut [f64], b: &[f64]) {
    kernel::add_assign(a, b)
}

#[inline]
pub(crate) fn sub_assign(a: &mut [f64], b: &[f64]) {
    kernel::sub_assign(a, b)
}

#[inline]
pub(crate) fn mul_assign(a: &mut [f64], b: &[f64]) {
    kernel::mul_assign(a, b)
}

#[inline]
pub(crate) fn div_assign(a: &mut [f64], b: &[f64]) {
    kernel::div_assign(a, b)
}

#[inline]
pub(crate) fn add_scalar(a: &mut [f64], s: f64) {
    kernel::add_scalar(a, s)
}

#[inline]
pub(crate) fn sub_scalar(a: &mut [f64], s: f64) {
    kernel::sub_scalar(a, s)
}

#[inline]
pub(crate) fn mul_scalar(a: &mut [f64], s: f64) {
    kernel::mul_scalar(a, s)
}

#[inline]
pub(crate) fn div_scalar(a: &mut [f64], s: f64) {
    kernel::div_scalar(a, s)
}

#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    kernel::dot(a, b)
}

#[inline]
pub(crate) fn sum(a: &[f64]) -> f64 {
    kernel::sum(a)
}

#[inline]
pub(crate) fn max(a: &[f64]) -> f64 {
    scalar::max(a)
}

#[inline]
pub(crate) fn min(a: &[f64]) -> f64 {
    scalar::min(a)
}

#[inline]
pub(crate) fn max_abs(a: &[f64]) -> f64 {
    scalar::max_abs(a)
}

#[inline]
pub(crate) fn min_abs(a: &[f64]) -> f64 {
    scalar::min_abs(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    // Lengths straddling every chunk boundary: empty, sub-lane, lane
    // multiples, and odd tails past the unrolled chunk size.
    const LENGTHS: [usize; 9] = [0, 1, 2, 3, 4, 7, 8, 15, 17];

    fn test_data(n: usize) -> (Vec<f64>, Vec<f64>) {
        let a: Vec<f64> = (0..n).map(|i| (i as f64) * 0.5 - 3.0).collect();
        let b: Vec<f64> = (0..n).map(|i| 1.25 + (i as f64) * 0.25).collect();
        (a, b)
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "kernel {a} != scalar {b}");
    }

    #[test]
    fn dot_matches_scalar_at_all_boundaries() {
        for n in LENGTHS {
            let (a, b) = test_data(n);
            assert_close(dot(&a, &b), scalar::dot(&a, &b));
        }
    }

    #[test]
    fn sum_matches_scalar_at_all_boundaries() {
        for n in LENGTHS {
            let (a, _) = test_data(n);
            assert_close(sum(&a), scalar::sum(&a));
        }
    }

    #[test]
    fn elementwise_match_scalar_at_all_boundaries() {
        type Pair = (fn(&mut [f64], &[f64]), fn(&mut [f64], &[f64]));
        let ops: [Pair; 4] = [
            (add_assign, scalar::add_assign),
            (sub_assign, scalar::sub_assign),
            (mul_assign, scalar::mul_assign),
            (div_assign, scalar::div_assign),
        ];
        for (simd_op, scalar_op) in ops {
            for n in LENGTHS {
                let (a, b) = test_data(n);
                let mut got = a.clone();
                let mut want = a.clone();
                simd_op(&mut got, &b);
                scalar_op(&mut want, &b);
                for i in 0..n {
                    assert_close(got[i], want[i]);
                }
            }
        }
    }

    #[test]
    fn broadcast_match_scalar_at_all_boundaries() {
        type Pair = (fn(&mut [f64], f64), fn(&mut [f64], f64));
        let ops: [Pair; 4] = [
            (add_scalar, scalar::add_scalar),
            (sub_scalar, scalar::sub_scalar),
            (mul_scalar, scalar::mul_scalar),
            (div_scalar, scalar::div_scalar),
        ];
        for (simd_op, scalar_op) in ops {
            for n in LENGTHS {
                let (a, _) = test_data(n);
                let mut got = a.clone();
                let mut want = a.clone();
                simd_op(&mut got, 1.5);
                scalar_op(&mut want, 1.5);
                for i in 0..n {
                    assert_close(got[i], want[i]);
                }
            }
        }
    }

    #[test]
    fn fill_all_boundaries() {
        for n in LENGTHS {
            let (mut a, _) = test_data(n);
            fill(&mut a, 2.5);
            assert!(a.iter().all(|&x| x == 2.5));
        }
    }

    #[test]
    fn reductions() {
        let a = [3.0, -7.0, 0.5, 6.0, -1.0];
        assert_eq!(max(&a), 6.0);
        assert_eq!(min(&a), -7.0);
        assert_eq!(max_abs(&a), 7.0);
        assert_eq!(min_abs(&a), 0.5);
        let empty: [f64; 0] = [];
        assert_eq!(max(&empty), 0.0);
        assert_eq!(min(&empty), 0.0);
        assert_eq!(max_abs(&empty), 0.0);
        assert_eq!(min_abs(&empty), 0.0);
    }
}
