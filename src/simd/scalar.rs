//! Portable scalar kernels.
//!
//! Reference implementation for every kernel, used directly on
//! architectures without a SIMD path and for the branchy reductions
//! where vectorization buys little. Tests compare the SIMD kernels
//! against these.

pub fn fill(dst: &mut [f64], value: f64) {
    for x in dst.iter_mut() {
        *x = value;
    }
}

pub fn add_assign(a: &mut [f64], b: &[f64]) {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x += *y;
    }
}

pub fn sub_assign(a: &mut [f64], b: &[f64]) {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x -= *y;
    }
}

pub fn mul_assign(a: &mut [f64], b: &[f64]) {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x *= *y;
    }
}

pub fn div_assign(a: &mut [f64], b: &[f64]) {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x /= *y;
    }
}

pub fn add_scalar(a: &mut [f64], s: f64) {
    for x in a.iter_mut() {
        *x += s;
    }
}

pub fn sub_scalar(a: &mut [f64], s: f64) {
    for x in a.iter_mut() {
        *x -= s;
    }
}

pub fn mul_scalar(a: &mut [f64], s: f64) {
    for x in a.iter_mut() {
        *x *= s;
    }
}

pub fn div_scalar(a: &mut [f64], s: f64) {
    for x in a.iter_mut() {
        *x /= s;
    }
}

pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        acc += *x * *y;
    }
    acc
}

pub fn sum(a: &[f64]) -> f64 {
    let mut acc = 0.0;
    for x in a.iter() {
        acc += *x;
    }
    acc
}

/// Maximum element; 0 on an empty slice.
pub fn max(a: &[f64]) -> f64 {
    let mut m = match a.first() {
        Some(&x) => x,
        None => return 0.0,
    };
    for &x in &a[1..] {
        if x > m {
            m = x;
        }
    }
    m
}

/// Minimum element; 0 on an empty slice.
pub fn min(a: &[f64]) -> f64 {
    let mut m = match a.first() {
        Some(&x) => x,
        None => return 0.0,
    };
    for &x in &a[1..] {
        if x < m {
            m = x;
        }
    }
    m
}

/// Maximum absolute value; 0 on an empty slice.
pub fn max_abs(a: &[f64]) -> f64 {
    let mut m = 0.0;
    for &x in a.iter() {
        if x.abs() > m {
            m = x.abs();
        }
    }
    m
}

/// Minimum absolute value; 0 on an empty slice.
pub fn min_abs(a: &[f64]) -> f64 {
    let mut m = match a.first() {
        Some(&x) => x.abs(),
        None => return 0.0,
    };
    for &x in &a[1..] {
        if x.abs() < m {
            m = x.abs();
        }
    }
    m
}
