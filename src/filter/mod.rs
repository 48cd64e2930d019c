//! Digital filters: windowed-sinc FIR design and IIR biquad cascades.
//!
//! [`fir`] designs linear-phase FIR coefficient vectors and runs them
//! through a SIMD-backed applicator; [`biquad`] provides second-order
//! sections and Butterworth cascade design via the bilinear transform.
//!
//! # Examples
//!
//! ```
//! use sigmath::filter::fir;
//!
//! let taps = fir::lowpass::<f64>(31, 1000.0, 8000.0).unwrap();
//! let mut lpf = fir::Fir::new(taps.as_slice());
//! let y = lpf.tick(1.0);
//! ```
//!
//! ```
//! use sigmath::filter::biquad::butterworth_lowpass;
//!
//! let mut lpf = butterworth_lowpass::<f64>(4, 1000.0, 8000.0).unwrap();
//! let y = lpf.tick(1.0);
//! ```

pub mod biquad;
pub mod fir;

pub use biquad::{butterworth_highpass, butterworth_lowpass, Biquad, BiquadCascade};
pub use fir::Fir;

use crate::traits::FloatScalar;

/// Errors from filter design functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignError {
    /// Filter order or tap count is zero, or a design requires an odd
    /// tap count and got an even one.
    InvalidOrder,
    /// A corner frequency is not in `(0, sample_rate / 2)`, or band
    /// edges are reversed.
    InvalidFrequency,
}

impl core::fmt::Display for DesignError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DesignError::InvalidOrder => write!(f, "invalid filter order or tap count"),
            DesignError::InvalidFrequency => {
                write!(f, "corner frequency must be in (0, sample_rate/2)")
            }
        }
    }
}

/// Validate common design parameters: a non-zero order and a corner
/// frequency strictly inside the Nyquist interval.
pub(crate) fn validate_design_params<T: FloatScalar>(
    order: usize,
    cutoff: T,
    sample_rate: T,
) -> Result<(), DesignError> {
    if order == 0 {
        return Err(DesignError::InvalidOrder);
    }
    let two = T::one() + T::one();
    if sample_rate <= T::zero() || cutoff <= T::zero() || cutoff >= sample_rate / two {
        return Err(DesignError::InvalidFrequency);
    }
    Ok(())
}
