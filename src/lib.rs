//! # sigmath
//!
//! DSP building blocks in pure Rust, no-std compatible (requires
//! `alloc`). Resizable numeric containers with soft out-of-range
//! semantics, SIMD-aligned fast paths, and the signal-processing layer
//! that exercises them.
//!
//! ## Quick start
//!
//! ```
//! use sigmath::{filter::fir, fft, Vector};
//!
//! // Design a lowpass FIR, filter a two-tone signal, inspect the spectrum
//! let fs = 8000.0;
//! let taps = fir::lowpass::<f64>(63, 1000.0, fs).unwrap();
//! let mut lpf = fir::Fir::from_vector(&taps);
//!
//! let x = Vector::from_fn(320, |i| {
//!     let t = i as f64 / fs;
//!     (core::f64::consts::TAU * 500.0 * t).sin()
//!         + (core::f64::consts::TAU * 3000.0 * t).sin()
//! });
//! // Drop the filter's fill transient before looking at the spectrum
//! let y = lpf.process(&x).subrange(64, 256);
//! let gain = fft::forward(&y).unwrap().gain();
//! assert!(gain.at(16) > 10.0 * gain.at(96)); // 500 Hz bin dominates 3 kHz bin
//! ```
//!
//! ## Modules
//!
//! - [`vector`] — Runtime-sized `Vector<T>` with soft out-of-range
//!   access (`at` / `set_at` degrade instead of panicking), min-length
//!   element-wise arithmetic, FIFO shifts, sub-ranges, reductions, and
//!   numeric casts.
//!
//! - [`matrix`] — `Matrix<T>` as a vector of rows. Transpose,
//!   multiply, determinant, and Gauss-Jordan inverse with partial
//!   pivoting; shape and singularity problems come back as
//!   [`MatrixError`] values.
//!
//! - [`aligned`] — `AlignedVector` / `AlignedMatrix`, `f64`-only
//!   mirrors of the generic containers over 32-byte-aligned storage.
//!   Arithmetic and summing reductions route through compile-time
//!   dispatched SIMD kernels (SSE2/AVX/NEON with a scalar fallback).
//!
//! - [`fft`] — Radix-2 Cooley-Tukey for power-of-two lengths, direct
//!   DFT otherwise; [`fft::Spectrum`] with gain and phase views.
//!
//! - [`window`] — Rectangular, Hann, Hamming, Blackman, and Kaiser
//!   windows.
//!
//! - [`filter`] — Windowed-sinc FIR design plus a SIMD-backed
//!   streaming applicator; biquad cascades with Butterworth design via
//!   the bilinear transform.
//!
//! - [`adaptive`] — Recursive least squares system identification.
//!
//! - [`resample`] — Rational polyphase sample-rate conversion.
//!
//! - [`traits`] — Element trait hierarchy: [`Scalar`] for all
//!   container elements, [`FloatScalar`] for real floats, and
//!   [`CastFrom`] for `as`-style numeric conversion.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm |
//! | `libm`  | no      | Pure-Rust software float fallback for no-std |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod adaptive;
pub mod aligned;
pub mod fft;
pub mod filter;
pub mod matrix;
pub mod resample;
pub(crate) mod simd;
pub mod traits;
pub mod vector;
pub mod window;

pub use aligned::{AlignedMatrix, AlignedVector};
pub use matrix::{Matrix, MatrixError};
pub use traits::{CastFrom, FloatScalar, Scalar};
pub use vector::{AllocError, Vector};
