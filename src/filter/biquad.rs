//! Second-order IIR sections and Butterworth cascade design.
//!
//! Pole computation uses real arithmetic only; a conjugate pair
//! `(σ ± jω)` maps to one biquad through the bilinear transform, and
//! an odd-order design ends with a degenerate first-order section.

use alloc::vec::Vec;

use crate::traits::FloatScalar;

use super::{validate_design_params, DesignError};

/// A single second-order section using Direct Form II Transposed.
///
/// Transfer function:
/// ```text
/// H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
/// ```
///
/// The denominator is stored normalized so `a[0] = 1`.
#[derive(Debug, Clone, Copy)]
pub struct Biquad<T> {
    b: [T; 3],
    a: [T; 3], // [1, a1, a2]
    z: [T; 2], // DFII-T state
}

impl<T: FloatScalar> Biquad<T> {
    /// Create a biquad from numerator `b` and denominator `a`
    /// coefficients, normalizing by `a[0]`.
    ///
    /// ```
    /// use sigmath::filter::Biquad;
    ///
    /// let bq = Biquad::new([2.0, 4.0, 2.0], [2.0, -0.5, 0.1]);
    /// let (b, a) = bq.coefficients();
    /// assert_eq!(a[0], 1.0);
    /// assert_eq!(b[0], 1.0);
    /// ```
    pub fn new(b: [T; 3], a: [T; 3]) -> Self {
        let a0 = a[0];
        Self {
            b: [b[0] / a0, b[1] / a0, b[2] / a0],
            a: [T::one(), a[1] / a0, a[2] / a0],
            z: [T::zero(); 2],
        }
    }

    /// Process one sample through the section.
    #[inline]
    pub fn tick(&mut self, x: T) -> T {
        let y = self.b[0] * x + self.z[0];
        self.z[0] = self.b[1] * x - self.a[1] * y + self.z[1];
        self.z[1] = self.b[2] * x - self.a[2] * y;
        y
    }

    /// Reset internal state to zero.
    pub fn reset(&mut self) {
        self.z = [T::zero(); 2];
    }

    /// The `(b, a)` coefficient arrays.
    pub fn coefficients(&self) -> ([T; 3], [T; 3]) {
        (self.b, self.a)
    }
}

/// A series cascade of biquad sections.
///
/// Runtime-sized: an `order`-pole design yields `ceil(order / 2)`
/// sections, the last one first-order degenerate (`b2 = a2 = 0`) when
/// the order is odd.
#[derive(Debug, Clone)]
pub struct BiquadCascade<T> {
    sections: Vec<Biquad<T>>,
}

impl<T: FloatScalar> BiquadCascade<T> {
    pub fn from_sections(sections: Vec<Biquad<T>>) -> Self {
        Self { sections }
    }

    pub fn num_sections(&self) -> usize {
        self.sections.len()
    }

    /// Process one sample through every section in series.
    #[inline]
    pub fn tick(&mut self, x: T) -> T {
        let mut y = x;
        for section in self.sections.iter_mut() {
            y = section.tick(y);
        }
        y
    }

    /// Reset every section's state to zero.
    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }

    /// Process a slice of samples in-place.
    pub fn process_inplace(&mut self, data: &mut [T]) {
        for sample in data.iter_mut() {
            *sample = self.tick(*sample);
        }
    }

    /// Actual filter order (detects a degenerate first-order last
    /// section).
    pub fn order(&self) -> usize {
        let n = self.sections.len();
        if n == 0 {
            return 0;
        }
        let (b, a) = self.sections[n - 1].coefficients();
        if b[2] == T::zero() && a[2] == T::zero() {
            2 * n - 1
        } else {
            2 * n
        }
    }
}

// ── Butterworth design ──────────────────────────────────────────────

/// Design a Butterworth lowpass as a biquad cascade.
///
/// `order` poles on the analog Butterworth circle, pre-warped and
/// mapped through the bilinear transform. Rolloff is −20·order
/// dB/decade beyond the cutoff.
///
/// ```
/// use sigmath::filter::biquad::butterworth_lowpass;
///
/// let lpf = butterworth_lowpass::<f64>(5, 1000.0, 8000.0).unwrap();
/// assert_eq!(lpf.num_sections(), 3);
/// assert_eq!(lpf.order(), 5);
/// ```
pub fn butterworth_lowpass<T: FloatScalar>(
    order: usize,
    cutoff: T,
    sample_rate: T,
) -> Result<BiquadCascade<T>, DesignError> {
    design(order, cutoff, sample_rate, false)
}

/// Design a Butterworth highpass as a biquad cascade.
pub fn butterworth_highpass<T: FloatScalar>(
    order: usize,
    cutoff: T,
    sample_rate: T,
) -> Result<BiquadCascade<T>, DesignError> {
    design(order, cutoff, sample_rate, true)
}

fn design<T: FloatScalar>(
    order: usize,
    cutoff: T,
    sample_rate: T,
    highpass: bool,
) -> Result<BiquadCascade<T>, DesignError> {
    validate_design_params(order, cutoff, sample_rate)?;

    let two = T::one() + T::one();
    let pi = T::from(core::f64::consts::PI).unwrap_or_else(T::one);

    // Pre-warp the cutoff; c = 2·fs is the bilinear constant.
    let wa = two * sample_rate * (pi * cutoff / sample_rate).tan();
    let c = two * sample_rate;

    let nf = T::from(order).unwrap_or_else(T::one);
    let mut sections = Vec::with_capacity((order + 1) / 2);

    // Conjugate pole pairs: θ_k = π·(2k + n + 1) / (2n)
    for k in 0..order / 2 {
        let kf = T::from(k).unwrap_or_else(T::zero);
        let theta = pi * (two * kf + nf + T::one()) / (two * nf);
        let sigma = wa * theta.cos();
        let omega = wa * theta.sin();
        sections.push(if highpass {
            bilinear_hp_pair(sigma, omega, c)
        } else {
            bilinear_lp_pair(sigma, omega, wa, c)
        });
    }

    // Odd order: one real pole at σ = −ωa.
    if order % 2 == 1 {
        sections.push(if highpass {
            bilinear_hp_real(-wa, c)
        } else {
            bilinear_lp_real(-wa, wa, c)
        });
    }

    Ok(BiquadCascade { sections })
}

/// Lowpass biquad from a conjugate analog pole pair `(σ ± jω)`:
/// `H_a(s) = ωa² / (s² - 2σs + (σ² + ω²))` through `s = c·(z-1)/(z+1)`.
fn bilinear_lp_pair<T: FloatScalar>(sigma: T, omega: T, wa: T, c: T) -> Biquad<T> {
    let two = T::one() + T::one();
    let p2 = sigma * sigma + omega * omega;
    let d = c * c - two * sigma * c + p2;
    let wa2 = wa * wa;
    let b0 = wa2 / d;
    let a1 = two * (p2 - c * c) / d;
    let a2 = (c * c + two * sigma * c + p2) / d;
    Biquad::new([b0, two * wa2 / d, b0], [T::one(), a1, a2])
}

/// Highpass biquad from a conjugate analog pole pair:
/// `H_a(s) = s² / (s² - 2σs + (σ² + ω²))`.
fn bilinear_hp_pair<T: FloatScalar>(sigma: T, omega: T, c: T) -> Biquad<T> {
    let two = T::one() + T::one();
    let c2 = c * c;
    let p2 = sigma * sigma + omega * omega;
    let d = c2 - two * sigma * c + p2;
    let b0 = c2 / d;
    let a1 = two * (p2 - c2) / d;
    let a2 = (c2 + two * sigma * c + p2) / d;
    Biquad::new([b0, -(two * c2) / d, b0], [T::one(), a1, a2])
}

/// Lowpass first-order section from a single real pole:
/// `H_a(s) = ωa / (s - σ)` maps to
/// `(ωa(z+1)) / ((c-σ)z + (-c-σ))`.
fn bilinear_lp_real<T: FloatScalar>(sigma: T, wa: T, c: T) -> Biquad<T> {
    let denom = c - sigma;
    let b0 = wa / denom;
    Biquad::new(
        [b0, b0, T::zero()],
        [T::one(), (T::zero() - c - sigma) / denom, T::zero()],
    )
}

/// Highpass first-order section from a single real pole:
/// `H_a(s) = s / (s - σ)` maps to
/// `(c(z-1)) / ((c-σ)z + (-c-σ))`.
fn bilinear_hp_real<T: FloatScalar>(sigma: T, c: T) -> Biquad<T> {
    let denom = c - sigma;
    let b0 = c / denom;
    Biquad::new(
        [b0, -b0, T::zero()],
        [T::one(), (T::zero() - c - sigma) / denom, T::zero()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(cascade: &mut BiquadCascade<f64>, input: f64, count: usize) -> f64 {
        let mut y = 0.0;
        for _ in 0..count {
            y = cascade.tick(input);
        }
        y
    }

    #[test]
    fn section_counts_and_order() {
        let even = butterworth_lowpass::<f64>(4, 100.0, 1000.0).unwrap();
        assert_eq!(even.num_sections(), 2);
        assert_eq!(even.order(), 4);
        let odd = butterworth_lowpass::<f64>(3, 100.0, 1000.0).unwrap();
        assert_eq!(odd.num_sections(), 2);
        assert_eq!(odd.order(), 3);
    }

    #[test]
    fn lowpass_dc_gain_is_unity() {
        for order in [1, 2, 4, 5] {
            let mut lpf = butterworth_lowpass::<f64>(order, 500.0, 8000.0).unwrap();
            let y = settle(&mut lpf, 1.0, 4000);
            assert!((y - 1.0).abs() < 1e-6, "order {order}: dc gain {y}");
        }
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut hpf = butterworth_highpass::<f64>(4, 500.0, 8000.0).unwrap();
        let y = settle(&mut hpf, 1.0, 4000);
        assert!(y.abs() < 1e-6, "dc leak {y}");
    }

    #[test]
    fn lowpass_attenuates_high_frequency_tone() {
        let fs = 8000.0;
        let mut lpf = butterworth_lowpass::<f64>(4, 500.0, fs).unwrap();
        let tone = 3000.0;
        let mut peak = 0.0_f64;
        for i in 0..4000 {
            let x = (core::f64::consts::TAU * tone * i as f64 / fs).sin();
            let y = lpf.tick(x);
            if i > 2000 {
                peak = peak.max(y.abs());
            }
        }
        // 4th order, ~2.6 octaves above cutoff: > 60 dB down
        assert!(peak < 1e-3, "peak {peak}");
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            butterworth_lowpass::<f64>(0, 100.0, 1000.0),
            Err(DesignError::InvalidOrder)
        ));
        assert!(matches!(
            butterworth_lowpass::<f64>(4, 600.0, 1000.0),
            Err(DesignError::InvalidFrequency)
        ));
    }

    #[test]
    fn reset_clears_state() {
        let mut lpf = butterworth_lowpass::<f64>(2, 100.0, 1000.0).unwrap();
        settle(&mut lpf, 1.0, 100);
        lpf.reset();
        let y = lpf.tick(0.0);
        assert_eq!(y, 0.0);
    }
}
