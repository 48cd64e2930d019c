//! AVX-accelerated f64 kernels for x86_64.
//!
//! AVX provides 256-bit registers, 4 f64 lanes. Only compiled when the
//! build targets an AVX-capable CPU (`-C target-feature=+avx` or
//! `-C target-cpu=native`).

use core::arch::x86_64::*;

use super::scalar;

macro_rules! elementwise {
    ($name:ident, $intrinsic:ident, $fallback:ident) => {
        #[inline]
        pub fn $name(a: &mut [f64], b: &[f64]) {
            debug_assert_eq!(a.len(), b.len());
            let n = a.len();
            let quads = n / 4;
            unsafe {
                let ap = a.as_mut_ptr();
                let bp = b.as_ptr();
                for i in 0..quads {
                    let off = i * 4;
                    let va = _mm256_loadu_pd(ap.add(off));
                    let vb = _mm256_loadu_pd(bp.add(off));
                    _mm256_storeu_pd(ap.add(off), $intrinsic(va, vb));
                }
            }
            let tail = quads * 4;
            scalar::$fallback(&mut a[tail..], &b[tail..]);
        }
    };
}

macro_rules! broadcast {
    ($name:ident, $intrinsic:ident, $fallback:ident) => {
        #[inline]
        pub fn $name(a: &mut [f64], s: f64) {
            let n = a.len();
            let quads = n / 4;
            unsafe {
                let ap = a.as_mut_ptr();
                let vs = _mm256_set1_pd(s);
                for i in 0..quads {
                    let off = i * 4;
                    let va = _mm256_loadu_pd(ap.add(off));
                    _mm256_storeu_pd(ap.add(off), $intrinsic(va, vs));
                }
            }
            let tail = quads * 4;
            scalar::$fallback(&mut a[tail..], s);
        }
    };
}

elementwise!(add_assign, _mm256_add_pd, add_assign);
elementwise!(sub_assign, _mm256_sub_pd, sub_assign);
elementwise!(mul_assign, _mm256_mul_pd, mul_assign);
elementwise!(div_assign, _mm256_div_pd, div_assign);

broadcast!(add_scalar, _mm256_add_pd, add_scalar);
broadcast!(sub_scalar, _mm256_sub_pd, sub_scalar);
broadcast!(mul_scalar, _mm256_mul_pd, mul_scalar);
broadcast!(div_scalar, _mm256_div_pd, div_scalar);

#[inline]
pub fn fill(dst: &mut [f64], value: f64) {
    let n = dst.len();
    let quads = n / 4;
    unsafe {
        let dp = dst.as_mut_ptr();
        let vv = _mm256_set1_pd(value);
        for i in 0..quads {
            _mm256_storeu_pd(dp.add(i * 4), vv);
        }
    }
    scalar::fill(&mut dst[quads * 4..], value);
}

/// Horizontal sum of a 256-bit accumulator.
#[inline]
unsafe fn hsum(v: __m256d) -> f64 {
    let low = _mm256_castpd256_pd128(v);
    let high = _mm256_extractf128_pd(v, 1);
    let sum2 = _mm_add_pd(low, high);
    let hi64 = _mm_unpackhi_pd(sum2, sum2);
    _mm_cvtsd_f64(_mm_add_sd(sum2, hi64))
}

/// Dot product with two independent accumulators to hide
/// multiply-add latency.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let chunks = n / 8;
    let mut acc;
    unsafe {
        let ap = a.as_ptr();
        let bp = b.as_ptr();
        let mut acc0 = _mm256_setzero_pd();
        let mut acc1 = _mm256_setzero_pd();
        for i in 0..chunks {
            let off = i * 8;
            acc0 = _mm256_add_pd(
                acc0,
                _mm256_mul_pd(_mm256_loadu_pd(ap.add(off)), _mm256_loadu_pd(bp.add(off))),
            );
            acc1 = _mm256_add_pd(
                acc1,
                _mm256_mul_pd(
                    _mm256_loadu_pd(ap.add(off + 4)),
                    _mm256_loadu_pd(bp.add(off + 4)),
                ),
            );
        }
        acc = hsum(_mm256_add_pd(acc0, acc1));
    }
    let tail = chunks * 8;
    acc += scalar::dot(&a[tail..], &b[tail..]);
    acc
}

#[inline]
pub fn sum(a: &[f64]) -> f64 {
    let n = a.len();
    let chunks = n / 8;
    let mut acc;
    unsafe {
        let ap = a.as_ptr();
        let mut acc0 = _mm256_setzero_pd();
        let mut acc1 = _mm256_setzero_pd();
        for i in 0..chunks {
            let off = i * 8;
            acc0 = _mm256_add_pd(acc0, _mm256_loadu_pd(ap.add(off)));
            acc1 = _mm256_add_pd(acc1, _mm256_loadu_pd(ap.add(off + 4)));
        }
        acc = hsum(_mm256_add_pd(acc0, acc1));
    }
    acc + scalar::sum(&a[chunks * 8..])
}
