//! Discrete Fourier transform of real-valued signals.
//!
//! [`forward`] uses an iterative radix-2 Cooley-Tukey transform when
//! the input length is a power of two and falls back to a direct
//! O(n²) DFT otherwise, so any length works and the common
//! power-of-two case is fast. [`inverse`] reconstructs the real
//! signal from a [`Spectrum`].
//!
//! # Examples
//!
//! ```
//! use sigmath::{fft, Vector};
//!
//! let x = Vector::from_fn(8, |i| (core::f64::consts::TAU * i as f64 / 8.0).cos());
//! let spec = fft::forward(&x).unwrap();
//! let gain = spec.gain();
//! assert!(gain.at(1) > 3.9); // energy concentrates in bin 1
//! assert!(gain.at(3) < 1e-9);
//! ```

use crate::traits::FloatScalar;
use crate::vector::Vector;

/// Errors from the transform entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// Zero-length input has no spectrum.
    EmptyInput,
    /// A [`Spectrum`]'s real and imaginary parts differ in length.
    LengthMismatch,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::EmptyInput => write!(f, "empty input"),
            FftError::LengthMismatch => write!(f, "spectrum re/im lengths differ"),
        }
    }
}

/// A complex spectrum in rectangular form.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum<T> {
    pub re: Vector<T>,
    pub im: Vector<T>,
}

impl<T: FloatScalar> Spectrum<T> {
    /// Number of frequency bins.
    pub fn len(&self) -> usize {
        self.re.len()
    }

    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    /// Per-bin magnitude `sqrt(re² + im²)`.
    pub fn gain(&self) -> Vector<T> {
        Vector::from_fn(self.re.len(), |i| {
            let (re, im) = (self.re[i], self.im[i]);
            (re * re + im * im).sqrt()
        })
    }

    /// Per-bin phase `atan2(im, re)` in radians.
    pub fn phase(&self) -> Vector<T> {
        Vector::from_fn(self.re.len(), |i| self.im[i].atan2(self.re[i]))
    }
}

/// Forward transform of a real signal.
pub fn forward<T: FloatScalar>(x: &Vector<T>) -> Result<Spectrum<T>, FftError> {
    if x.is_empty() {
        return Err(FftError::EmptyInput);
    }
    let mut re = x.clone();
    let mut im = Vector::zeros(x.len());
    transform(re.as_mut_slice(), im.as_mut_slice(), false);
    Ok(Spectrum { re, im })
}

/// Inverse transform; returns the real part of the reconstruction.
pub fn inverse<T: FloatScalar>(spec: &Spectrum<T>) -> Result<Vector<T>, FftError> {
    if spec.re.len() != spec.im.len() {
        return Err(FftError::LengthMismatch);
    }
    let n = spec.re.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    let mut re = spec.re.clone();
    let mut im = spec.im.clone();
    transform(re.as_mut_slice(), im.as_mut_slice(), true);
    let scale = T::one() / T::from(n).unwrap_or_else(T::one);
    Ok(&re * scale)
}

/// In-place complex transform. `invert` flips the twiddle sign; the
/// 1/n normalization is the caller's.
fn transform<T: FloatScalar>(re: &mut [T], im: &mut [T], invert: bool) {
    let n = re.len();
    if n.is_power_of_two() {
        radix2(re, im, invert);
    } else {
        direct_dft(re, im, invert);
    }
}

fn twiddle_sign<T: FloatScalar>(invert: bool) -> T {
    if invert {
        T::one()
    } else {
        T::zero() - T::one()
    }
}

fn radix2<T: FloatScalar>(re: &mut [T], im: &mut [T], invert: bool) {
    let n = re.len();

    // Bit-reversal permutation.
    let mut j = 0;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            re.swap(i, j);
            im.swap(i, j);
        }
    }

    let tau = T::from(core::f64::consts::TAU).unwrap_or_else(T::one);
    let sign = twiddle_sign::<T>(invert);

    let mut len = 2;
    while len <= n {
        let step = sign * tau / T::from(len).unwrap_or_else(T::one);
        let half = len / 2;
        let mut start = 0;
        while start < n {
            for k in 0..half {
                let ang = step * T::from(k).unwrap_or_else(T::zero);
                let (w_re, w_im) = (ang.cos(), ang.sin());
                let (u_re, u_im) = (re[start + k], im[start + k]);
                let (t_re, t_im) = (re[start + k + half], im[start + k + half]);
                let v_re = t_re * w_re - t_im * w_im;
                let v_im = t_re * w_im + t_im * w_re;
                re[start + k] = u_re + v_re;
                im[start + k] = u_im + v_im;
                re[start + k + half] = u_re - v_re;
                im[start + k + half] = u_im - v_im;
            }
            start += len;
        }
        len <<= 1;
    }
}

fn direct_dft<T: FloatScalar>(re: &mut [T], im: &mut [T], invert: bool) {
    let n = re.len();
    let tau = T::from(core::f64::consts::TAU).unwrap_or_else(T::one);
    let sign = twiddle_sign::<T>(invert);
    let step = sign * tau / T::from(n).unwrap_or_else(T::one);

    let mut out_re = Vector::<T>::zeros(n);
    let mut out_im = Vector::<T>::zeros(n);
    for k in 0..n {
        let mut acc_re = T::zero();
        let mut acc_im = T::zero();
        for (i, (&x_re, &x_im)) in re.iter().zip(im.iter()).enumerate() {
            let ang = step * T::from(k * i).unwrap_or_else(T::zero);
            let (w_re, w_im) = (ang.cos(), ang.sin());
            acc_re = acc_re + x_re * w_re - x_im * w_im;
            acc_im = acc_im + x_re * w_im + x_im * w_re;
        }
        out_re[k] = acc_re;
        out_im[k] = acc_im;
    }
    re.copy_from_slice(out_re.as_slice());
    im.copy_from_slice(out_im.as_slice());
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::TAU;

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "got {a}, expected {b}");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(forward(&Vector::<f64>::new()), Err(FftError::EmptyInput));
    }

    #[test]
    fn mismatched_spectrum_is_an_error() {
        let spec = Spectrum {
            re: Vector::<f64>::zeros(4),
            im: Vector::<f64>::zeros(3),
        };
        assert_eq!(inverse(&spec), Err(FftError::LengthMismatch));
    }

    #[test]
    fn impulse_has_flat_spectrum() {
        let mut x = Vector::<f64>::zeros(8);
        x[0] = 1.0;
        let spec = forward(&x).unwrap();
        let gain = spec.gain();
        for k in 0..8 {
            assert_close(gain[k], 1.0, 1e-12);
        }
    }

    #[test]
    fn dc_concentrates_in_bin_zero() {
        let x = Vector::fill(16, 2.0_f64);
        let spec = forward(&x).unwrap();
        let gain = spec.gain();
        assert_close(gain[0], 32.0, 1e-9);
        for k in 1..16 {
            assert_close(gain[k], 0.0, 1e-9);
        }
    }

    #[test]
    fn sinusoid_concentrates_in_its_bin() {
        let n = 32;
        let bin = 5;
        let x = Vector::from_fn(n, |i| (TAU * bin as f64 * i as f64 / n as f64).sin());
        let spec = forward(&x).unwrap();
        let gain = spec.gain();
        // A real sinusoid splits between bins k and n-k, n/2 each.
        assert_close(gain[bin], n as f64 / 2.0, 1e-9);
        assert_close(gain[n - bin], n as f64 / 2.0, 1e-9);
        assert_close(gain[bin + 2], 0.0, 1e-9);
    }

    #[test]
    fn round_trip_power_of_two() {
        let x = Vector::from_fn(16, |i| (i as f64 * 0.7).sin() + 0.3);
        let back = inverse(&forward(&x).unwrap()).unwrap();
        for i in 0..16 {
            assert_close(back[i], x[i], 1e-10);
        }
    }

    #[test]
    fn round_trip_non_power_of_two_uses_dft_path() {
        let x = Vector::from_fn(12, |i| (i as f64 - 4.5) * 0.25);
        let back = inverse(&forward(&x).unwrap()).unwrap();
        for i in 0..12 {
            assert_close(back[i], x[i], 1e-9);
        }
    }

    #[test]
    fn phase_of_cosine_is_zero_at_its_bin() {
        let n = 16;
        let x = Vector::from_fn(n, |i| (TAU * 3.0 * i as f64 / n as f64).cos());
        let spec = forward(&x).unwrap();
        let phase = spec.phase();
        assert_close(phase[3], 0.0, 1e-9);
    }
}
