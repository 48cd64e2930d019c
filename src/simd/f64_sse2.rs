//! SSE2-accelerated f64 kernels for x86_64.
//!
//! SSE2 provides 128-bit registers, 2 f64 lanes. SSE2 is baseline on
//! x86_64 so this path needs no runtime detection.

use core::arch::x86_64::*;

use super::scalar;

macro_rules! elementwise {
    ($name:ident, $intrinsic:ident, $fallback:ident) => {
        #[inline]
        pub fn $name(a: &mut [f64], b: &[f64]) {
            debug_assert_eq!(a.len(), b.len());
            let n = a.len();
            let pairs = n / 2;
            unsafe {
                let ap = a.as_mut_ptr();
                let bp = b.as_ptr();
                for i in 0..pairs {
                    let off = i * 2;
                    let va = _mm_loadu_pd(ap.add(off));
                    let vb = _mm_loadu_pd(bp.add(off));
                    _mm_storeu_pd(ap.add(off), $intrinsic(va, vb));
                }
            }
            let tail = pairs * 2;
            scalar::$fallback(&mut a[tail..], &b[tail..]);
        }
    };
}

macro_rules! broadcast {
    ($name:ident, $intrinsic:ident, $fallback:ident) => {
        #[inline]
        pub fn $name(a: &mut [f64], s: f64) {
            let n = a.len();
            let pairs = n / 2;
            unsafe {
                let ap = a.as_mut_ptr();
                let vs = _mm_set1_pd(s);
                for i in 0..pairs {
                    let off = i * 2;
                    let va = _mm_loadu_pd(ap.add(off));
                    _mm_storeu_pd(ap.add(off), $intrinsic(va, vs));
                }
            }
            let tail = pairs * 2;
            scalar::$fallback(&mut a[tail..], s);
        }
    };
}

elementwise!(add_assign, _mm_add_pd, add_assign);
elementwise!(sub_assign, _mm_sub_pd, sub_assign);
elementwise!(mul_assign, _mm_mul_pd, mul_assign);
elementwise!(div_assign, _mm_div_pd, div_assign);

broadcast!(add_scalar, _mm_add_pd, add_scalar);
broadcast!(sub_scalar, _mm_sub_pd, sub_scalar);
broadcast!(mul_scalar, _mm_mul_pd, mul_scalar);
broadcast!(div_scalar, _mm_div_pd, div_scalar);

#[inline]
pub fn fill(dst: &mut [f64], value: f64) {
    let n = dst.len();
    let pairs = n / 2;
    unsafe {
        let dp = dst.as_mut_ptr();
        let vv = _mm_set1_pd(value);
        for i in 0..pairs {
            _mm_storeu_pd(dp.add(i * 2), vv);
        }
    }
    scalar::fill(&mut dst[pairs * 2..], value);
}

/// Dot product with two independent accumulators to hide
/// multiply-add latency.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let chunks = n / 4;
    let mut acc;
    unsafe {
        let ap = a.as_ptr();
        let bp = b.as_ptr();
        let mut acc0 = _mm_setzero_pd();
        let mut acc1 = _mm_setzero_pd();
        for i in 0..chunks {
            let off = i * 4;
            acc0 = _mm_add_pd(
                acc0,
                _mm_mul_pd(_mm_loadu_pd(ap.add(off)), _mm_loadu_pd(bp.add(off))),
            );
            acc1 = _mm_add_pd(
                acc1,
                _mm_mul_pd(_mm_loadu_pd(ap.add(off + 2)), _mm_loadu_pd(bp.add(off + 2))),
            );
        }
        acc0 = _mm_add_pd(acc0, acc1);
        let high = _mm_unpackhi_pd(acc0, acc0);
        acc = _mm_cvtsd_f64(_mm_add_sd(acc0, high));
    }
    let tail = chunks * 4;
    acc += scalar::dot(&a[tail..], &b[tail..]);
    acc
}

#[inline]
pub fn sum(a: &[f64]) -> f64 {
    let n = a.len();
    let chunks = n / 4;
    let mut acc;
    unsafe {
        let ap = a.as_ptr();
        let mut acc0 = _mm_setzero_pd();
        let mut acc1 = _mm_setzero_pd();
        for i in 0..chunks {
            let off = i * 4;
            acc0 = _mm_add_pd(acc0, _mm_loadu_pd(ap.add(off)));
            acc1 = _mm_add_pd(acc1, _mm_loadu_pd(ap.add(off + 2)));
        }
        acc0 = _mm_add_pd(acc0, acc1);
        let high = _mm_unpackhi_pd(acc0, acc0);
        acc = _mm_cvtsd_f64(_mm_add_sd(acc0, high));
    }
    acc + scalar::sum(&a[chunks * 4..])
}
