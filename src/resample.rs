//! Rational-ratio polyphase resampling.
//!
//! [`Resampler`] changes the sample rate by `up / down` using a
//! windowed-sinc anti-aliasing prototype split into `up` phase rows.
//! Zero-stuffing and decimation never materialize: each output sample
//! is one dot product between a phase row and the input history, and
//! the phase/accumulator bookkeeping walks the rows in `(m·down) mod
//! up` order.
//!
//! # Examples
//!
//! ```
//! use sigmath::resample::Resampler;
//! use sigmath::Vector;
//!
//! let mut r = Resampler::new(2, 1, 16).unwrap();
//! let out = r.process(&Vector::fill(100, 1.0));
//! assert_eq!(out.len(), 200);
//! assert!((out.at(150) - 1.0).abs() < 0.05); // DC level survives
//! ```

use alloc::vec::Vec;

use crate::filter::fir;
use crate::filter::DesignError;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Streaming rational resampler.
#[derive(Debug, Clone)]
pub struct Resampler {
    up: usize,
    down: usize,
    /// `up` rows of `taps_per_phase` prototype coefficients.
    phases: Matrix<f64>,
    /// Input history, newest at index 0.
    history: Vector<f64>,
    phase: usize,
    /// Output-schedule accumulator; an output is due while positive.
    acc: i64,
}

impl Resampler {
    /// Build an `up / down` resampler whose prototype filter has
    /// `up · taps_per_phase` coefficients.
    ///
    /// The prototype is a Hamming-windowed sinc cut at 90% of the
    /// narrower Nyquist (`0.45 / max(up, down)` cycles per input
    /// sample), leaving a transition margin, and scaled by `up` to
    /// compensate the interpolation gain. Zero `up`, `down`, or
    /// `taps_per_phase` is rejected.
    pub fn new(up: usize, down: usize, taps_per_phase: usize) -> Result<Self, DesignError> {
        if up == 0 || down == 0 || taps_per_phase == 0 {
            return Err(DesignError::InvalidOrder);
        }
        let cutoff = 0.45 / up.max(down) as f64;
        let proto = fir::lowpass::<f64>(up * taps_per_phase, cutoff, 1.0)? * up as f64;
        let phases = Matrix::from_fn(up, taps_per_phase, |p, k| proto.at(p + k * up));
        Ok(Resampler {
            up,
            down,
            phases,
            history: Vector::zeros(taps_per_phase),
            phase: 0,
            acc: 0,
        })
    }

    /// The `(up, down)` ratio.
    pub fn ratio(&self) -> (usize, usize) {
        (self.up, self.down)
    }

    /// Push one input sample, appending any output samples that become
    /// due to `out`.
    pub fn push(&mut self, x: f64, out: &mut Vec<f64>) {
        self.history.push_front(x);
        self.acc += self.up as i64;
        while self.acc > 0 {
            out.push(self.phases[self.phase].dot(&self.history));
            self.acc -= self.down as i64;
            self.phase = (self.phase + self.down) % self.up;
        }
    }

    /// Resample a whole block. Output length is
    /// `ceil(input.len() · up / down)` once the stream is phase-aligned.
    pub fn process(&mut self, input: &Vector<f64>) -> Vector<f64> {
        let mut out = Vec::with_capacity(input.len() * self.up / self.down + 1);
        for &x in input.iter() {
            self.push(x, &mut out);
        }
        Vector::from_vec(out)
    }

    /// Drop all history and scheduling state.
    pub fn reset(&mut self) {
        let n = self.history.len();
        self.history = Vector::zeros(n);
        self.phase = 0;
        self.acc = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_counts_for_simple_ratios() {
        let mut up2 = Resampler::new(2, 1, 8).unwrap();
        assert_eq!(up2.process(&Vector::zeros(50)).len(), 100);

        let mut down2 = Resampler::new(1, 2, 8).unwrap();
        assert_eq!(down2.process(&Vector::zeros(100)).len(), 50);

        let mut identity = Resampler::new(1, 1, 8).unwrap();
        assert_eq!(identity.process(&Vector::zeros(30)).len(), 30);

        let mut three_halves = Resampler::new(3, 2, 8).unwrap();
        assert_eq!(three_halves.process(&Vector::zeros(100)).len(), 150);
    }

    #[test]
    fn dc_level_survives_upsampling() {
        let mut r = Resampler::new(2, 1, 16).unwrap();
        let out = r.process(&Vector::fill(200, 1.0));
        // Skip the fill transient of the 32-tap prototype.
        for i in 100..out.len() {
            assert!((out.at(i) - 1.0).abs() < 0.05, "sample {i}: {}", out.at(i));
        }
    }

    #[test]
    fn dc_level_survives_downsampling() {
        let mut r = Resampler::new(1, 2, 16).unwrap();
        let out = r.process(&Vector::fill(200, 1.0));
        for i in 50..out.len() {
            assert!((out.at(i) - 1.0).abs() < 0.05);
        }
    }

    #[test]
    fn dc_level_survives_fractional_ratio() {
        let mut r = Resampler::new(3, 2, 16).unwrap();
        let out = r.process(&Vector::fill(300, 2.0));
        for i in 150..out.len() {
            assert!((out.at(i) - 2.0).abs() < 0.1);
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Resampler::new(0, 1, 8).is_err());
        assert!(Resampler::new(2, 0, 8).is_err());
        assert!(Resampler::new(2, 1, 0).is_err());
    }

    #[test]
    fn reset_restores_phase_alignment() {
        let mut r = Resampler::new(3, 2, 8).unwrap();
        let first = r.process(&Vector::fill(40, 1.0));
        r.reset();
        let second = r.process(&Vector::fill(40, 1.0));
        assert_eq!(first.len(), second.len());
        for i in 0..first.len() {
            assert_eq!(first.at(i), second.at(i));
        }
    }
}
