//! Closed-form window functions for filter design and spectral
//! analysis.
//!
//! Every function returns an `n`-point symmetric window as a
//! [`Vector`]. A zero-length request yields a null vector and a
//! one-point window is `[1.0]`; the `n - 1` denominators below are
//! only evaluated for `n >= 2`.
//!
//! # Examples
//!
//! ```
//! use sigmath::window;
//!
//! let w = window::hanning::<f64>(5);
//! assert!((w.at(2) - 1.0).abs() < 1e-12); // symmetric, peak at center
//! assert!(w.at(0).abs() < 1e-12);
//! ```

use crate::traits::FloatScalar;
use crate::vector::Vector;

fn pi<T: FloatScalar>() -> T {
    T::from(core::f64::consts::PI).unwrap_or_else(T::one)
}

/// Generate an `n`-point window from a per-sample closed form over the
/// normalized position `i / (n - 1)`.
fn from_closed_form<T: FloatScalar>(n: usize, f: impl Fn(T) -> T) -> Vector<T> {
    if n == 0 {
        return Vector::new();
    }
    if n == 1 {
        return Vector::fill(1, T::one());
    }
    let denom = T::from(n - 1).unwrap_or_else(T::one);
    Vector::from_fn(n, |i| f(T::from(i).unwrap_or_else(T::zero) / denom))
}

/// All-ones window (no tapering).
pub fn rectangular<T: FloatScalar>(n: usize) -> Vector<T> {
    Vector::fill(n, T::one())
}

/// Hann window: `0.5 - 0.5·cos(2πx)`.
pub fn hanning<T: FloatScalar>(n: usize) -> Vector<T> {
    let half = T::from(0.5).unwrap_or_else(T::one);
    let two_pi = pi::<T>() + pi::<T>();
    from_closed_form(n, |x| half - half * (two_pi * x).cos())
}

/// Hamming window: `0.54 - 0.46·cos(2πx)`.
pub fn hamming<T: FloatScalar>(n: usize) -> Vector<T> {
    let a0 = T::from(0.54).unwrap_or_else(T::one);
    let a1 = T::from(0.46).unwrap_or_else(T::one);
    let two_pi = pi::<T>() + pi::<T>();
    from_closed_form(n, |x| a0 - a1 * (two_pi * x).cos())
}

/// Blackman window: `0.42 - 0.5·cos(2πx) + 0.08·cos(4πx)`.
pub fn blackman<T: FloatScalar>(n: usize) -> Vector<T> {
    let a0 = T::from(0.42).unwrap_or_else(T::one);
    let a1 = T::from(0.5).unwrap_or_else(T::one);
    let a2 = T::from(0.08).unwrap_or_else(T::one);
    let two_pi = pi::<T>() + pi::<T>();
    let four_pi = two_pi + two_pi;
    from_closed_form(n, |x| {
        a0 - a1 * (two_pi * x).cos() + a2 * (four_pi * x).cos()
    })
}

/// Kaiser window with shape parameter `beta`.
///
/// `I0(β·sqrt(1 - (2x - 1)²)) / I0(β)`, where `I0` is the zeroth-order
/// modified Bessel function of the first kind. `beta = 0` degenerates
/// to the rectangular window.
pub fn kaiser<T: FloatScalar>(n: usize, beta: T) -> Vector<T> {
    let two = T::one() + T::one();
    let denom = bessel_i0(beta);
    from_closed_form(n, |x| {
        let t = two * x - T::one();
        bessel_i0(beta * (T::one() - t * t).max(T::zero()).sqrt()) / denom
    })
}

/// Zeroth-order modified Bessel function of the first kind, by its
/// power series. Terms fall off as `(x/2)^(2k) / (k!)²`; iteration
/// stops once a term no longer moves the sum.
pub fn bessel_i0<T: FloatScalar>(x: T) -> T {
    let half_x = x / (T::one() + T::one());
    let mut sum = T::one();
    let mut term = T::one();
    let mut k = T::one();
    loop {
        term = term * (half_x / k) * (half_x / k);
        let next = sum + term;
        if next == sum {
            return sum;
        }
        sum = next;
        k = k + T::one();
    }
}
