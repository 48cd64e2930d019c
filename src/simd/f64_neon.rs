//! NEON-accelerated f64 kernels for aarch64.
//!
//! NEON provides 128-bit registers, 2 f64 lanes, and is baseline on
//! aarch64 so this path needs no runtime detection.

use core::arch::aarch64::*;

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
                    let va = vld1q_f64(ap.add(off));
                    let vb = vld1q_f64(bp.add(off));
                    vst1q_f64(ap.add(off), $intrinsic(va, vb));
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
                let vs = vdupq_n_f64(s);
                for i in 0..pairs {
                    let off = i * 2;
                    let va = vld1q_f64(ap.add(off));
                    vst1q_f64(ap.add(off), $intrinsic(va, vs));
                }
            }
            let tail = pairs * 2;
            scalar::$fallback(&mut a[tail..], s);
        }
    };
}

elementwise!(add_assign, vaddq_f64, add_assign);
elementwise!(sub_assign, vsubq_f64, sub_assign);
elementwise!(mul_assign, vmulq_f64, mul_assign);
elementwise!(div_assign, vdivq_f64, div_assign);

broadcast!(add_scalar, vaddq_f64, add_scalar);
broadcast!(sub_scalar, vsubq_f64, sub_scalar);
broadcast!(mul_scalar, vmulq_f64, mul_scalar);
broadcast!(div_scalar, vdivq_f64, div_scalar);

#[inline]
pub fn fill(dst: &mut [f64], value: f64) {
    let n = dst.len();
    let pairs = n / 2;
    unsafe {
        let dp = dst.as_mut_ptr();
        let vv = vdupq_n_f64(value);
        for i in 0..pairs {
            vst1q_f64(dp.add(i * 2), vv);
        }
    }
    scalar::fill(&mut dst[pairs * 2..], value);
}

/// Dot product using fused multiply-add with two independent
/// accumulators.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let chunks = n / 4;
    let mut acc;
    unsafe {
        let ap = a.as_ptr();
        let bp = b.as_ptr();
        let mut acc0 = vdupq_n_f64(0.0);
        let mut acc1 = vdupq_n_f64(0.0);
        for i in 0..chunks {
            let off = i * 4;
            acc0 = vfmaq_f64(acc0, vld1q_f64(ap.add(off)), vld1q_f64(bp.add(off)));
            acc1 = vfmaq_f64(acc1, vld1q_f64(ap.add(off + 2)), vld1q_f64(bp.add(off + 2)));
        }
        acc = vaddvq_f64(vaddq_f64(acc0, acc1));
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
        let mut acc0 = vdupq_n_f64(0.0);
        let mut acc1 = vdupq_n_f64(0.0);
        for i in 0..chunks {
            let off = i * 4;
            acc0 = vaddq_f64(acc0, vld1q_f64(ap.add(off)));
            acc1 = vaddq_f64(acc1, vld1q_f64(ap.add(off + 2)));
        }
        acc = vaddvq_f64(vaddq_f64(acc0, acc1));
    }
    acc + scalar::sum(&a[chunks * 4..])
}
