//! Windowed-sinc FIR design and a SIMD-backed applicator.
//!
//! The design functions return plain coefficient [`Vector`]s (Hamming
//! window, unity passband gain); [`Fir`] runs the coefficients over an
//! [`AlignedVector`] delay line so each output sample is one SIMD dot
//! product.

use crate::aligned::AlignedVector;
use crate::traits::FloatScalar;
use crate::vector::Vector;

use super::{validate_design_params, DesignError};

/// Windowed-sinc lowpass prototype, normalized to unit DC gain.
///
/// `taps` coefficients, Hamming-windowed, linear phase with group
/// delay `(taps - 1) / 2` samples.
///
/// ```
/// use sigmath::filter::fir;
///
/// let h = fir::lowpass::<f64>(31, 1000.0, 8000.0).unwrap();
/// assert!((h.sum() - 1.0).abs() < 1e-12);
/// ```
pub fn lowpass<T: FloatScalar>(
    taps: usize,
    cutoff: T,
    sample_rate: T,
) -> Result<Vector<T>, DesignError> {
    validate_design_params(taps, cutoff, sample_rate)?;
    let fc = cutoff / sample_rate; // cycles per sample, < 0.5
    let two = T::one() + T::one();
    let pi = T::from(core::f64::consts::PI).unwrap_or_else(T::one);
    let center = T::from(taps - 1).unwrap_or_else(T::zero) / two;
    let window = crate::window::hamming::<T>(taps);

    let mut h = Vector::from_fn(taps, |i| {
        let t = T::from(i).unwrap_or_else(T::zero) - center;
        let sinc = if t == T::zero() {
            two * fc
        } else {
            (two * pi * fc * t).sin() / (pi * t)
        };
        sinc * window[i]
    });
    // Unity gain at DC.
    let sum = h.sum();
    h /= sum;
    Ok(h)
}

/// Windowed-sinc highpass by spectral inversion of the lowpass
/// prototype. Requires an odd tap count so the inverted impulse has an
/// exact center.
pub fn highpass<T: FloatScalar>(
    taps: usize,
    cutoff: T,
    sample_rate: T,
) -> Result<Vector<T>, DesignError> {
    if taps % 2 == 0 {
        return Err(DesignError::InvalidOrder);
    }
    let mut h = -lowpass(taps, cutoff, sample_rate)?;
    let center = (taps - 1) / 2;
    h[center] = h[center] + T::one();
    Ok(h)
}

/// Windowed-sinc bandpass: the difference of two lowpass prototypes,
/// `lowpass(high) - lowpass(low)`.
pub fn bandpass<T: FloatScalar>(
    taps: usize,
    low: T,
    high: T,
    sample_rate: T,
) -> Result<Vector<T>, DesignError> {
    if low >= high {
        return Err(DesignError::InvalidFrequency);
    }
    let upper = lowpass(taps, high, sample_rate)?;
    let lower = lowpass(taps, low, sample_rate)?;
    Ok(upper - &lower)
}

/// Windowed-sinc bandstop by spectral inversion of the bandpass.
/// Requires an odd tap count.
pub fn bandstop<T: FloatScalar>(
    taps: usize,
    low: T,
    high: T,
    sample_rate: T,
) -> Result<Vector<T>, DesignError> {
    if taps % 2 == 0 {
        return Err(DesignError::InvalidOrder);
    }
    let mut h = -bandpass(taps, low, high, sample_rate)?;
    let center = (taps - 1) / 2;
    h[center] = h[center] + T::one();
    Ok(h)
}

/// Streaming FIR applicator.
///
/// Holds the coefficients and the delay line in [`AlignedVector`]s;
/// every [`tick`](Fir::tick) is a `push_front` plus one SIMD dot.
/// Coefficient index 0 multiplies the newest sample.
#[derive(Debug, Clone)]
pub struct Fir {
    taps: AlignedVector,
    delay: AlignedVector,
}

impl Fir {
    pub fn new(taps: &[f64]) -> Self {
        Fir {
            taps: AlignedVector::from_slice(taps),
            delay: AlignedVector::zeros(taps.len()),
        }
    }

    pub fn from_vector(taps: &Vector<f64>) -> Self {
        Self::new(taps.as_slice())
    }

    /// Number of coefficients.
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Process one sample.
    #[inline]
    pub fn tick(&mut self, x: f64) -> f64 {
        self.delay.push_front(x);
        self.taps.dot(&self.delay)
    }

    /// Zero the delay line.
    pub fn reset(&mut self) {
        let n = self.delay.len();
        self.delay = AlignedVector::zeros(n);
    }

    /// Filter a whole signal, returning a same-length output.
    pub fn process(&mut self, input: &Vector<f64>) -> Vector<f64> {
        let mut out = Vector::zeros(input.len());
        for (i, &x) in input.iter().enumerate() {
            out[i] = self.tick(x);
        }
        out
    }

    /// Filter a slice in-place.
    pub fn process_inplace(&mut self, data: &mut [f64]) {
        for sample in data.iter_mut() {
            *sample = self.tick(*sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::TAU;

    /// Steady-state peak of the filter's response to a sine at `freq`.
    /// Tones are chosen so the sample grid hits the sine's peak
    /// exactly.
    fn tone_gain(h: &Vector<f64>, freq: f64, fs: f64) -> f64 {
        let mut f = Fir::from_vector(h);
        let mut peak = 0.0_f64;
        let n = 4 * h.len() + 400;
        for i in 0..n {
            let y = f.tick((TAU * freq * i as f64 / fs).sin());
            if i > 2 * h.len() {
                peak = peak.max(y.abs());
            }
        }
        peak
    }

    #[test]
    fn lowpass_is_symmetric_with_unit_dc_gain() {
        let h = lowpass::<f64>(41, 1000.0, 8000.0).unwrap();
        assert!((h.sum() - 1.0).abs() < 1e-12);
        for i in 0..41 {
            assert!((h[i] - h[40 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn lowpass_passes_low_and_blocks_high() {
        let h = lowpass::<f64>(63, 500.0, 8000.0).unwrap();
        assert!((tone_gain(&h, 100.0, 8000.0) - 1.0).abs() < 0.03);
        assert!(tone_gain(&h, 3000.0, 8000.0) < 0.01);
    }

    #[test]
    fn highpass_blocks_dc_and_passes_high() {
        let h = highpass::<f64>(63, 500.0, 8000.0).unwrap();
        assert!(h.sum().abs() < 1e-12);
        assert!((tone_gain(&h, 3000.0, 8000.0) - 1.0).abs() < 0.03);
        assert!(tone_gain(&h, 100.0, 8000.0) < 0.01);
    }

    #[test]
    fn highpass_requires_odd_taps() {
        assert_eq!(
            highpass::<f64>(64, 500.0, 8000.0).map(|_| ()),
            Err(DesignError::InvalidOrder)
        );
    }

    #[test]
    fn bandpass_selects_the_band() {
        let h = bandpass::<f64>(101, 1000.0, 2000.0, 8000.0).unwrap();
        assert!((tone_gain(&h, 1500.0, 8000.0) - 1.0).abs() < 0.03);
        assert!(tone_gain(&h, 400.0, 8000.0) < 0.02);
        assert!(tone_gain(&h, 3500.0, 8000.0) < 0.02);
        assert_eq!(
            bandpass::<f64>(101, 2000.0, 1000.0, 8000.0).map(|_| ()),
            Err(DesignError::InvalidFrequency)
        );
    }

    #[test]
    fn bandstop_notches_the_band() {
        let h = bandstop::<f64>(101, 1000.0, 2000.0, 8000.0).unwrap();
        assert!(tone_gain(&h, 1500.0, 8000.0) < 0.02);
        assert!((tone_gain(&h, 400.0, 8000.0) - 1.0).abs() < 0.03);
    }

    #[test]
    fn fir_applicator_matches_direct_convolution() {
        let h = Vector::from_slice(&[0.5, 0.25, 0.125]);
        let mut f = Fir::from_vector(&h);
        let x = [1.0, 2.0, 3.0, 4.0];
        let mut got = [0.0; 4];
        for (i, &xi) in x.iter().enumerate() {
            got[i] = f.tick(xi);
        }
        // y[n] = Σ h[k]·x[n-k]
        assert_eq!(got, [0.5, 1.25, 2.125, 3.0]);
    }

    #[test]
    fn reset_clears_the_delay_line() {
        let mut f = Fir::new(&[1.0, 1.0]);
        f.tick(5.0);
        f.reset();
        assert_eq!(f.tick(0.0), 0.0);
    }
}
