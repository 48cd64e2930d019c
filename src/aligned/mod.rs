//! 32-byte-aligned `f64` containers for the SIMD fast path.
//!
//! [`AlignedVector`] and [`AlignedMatrix`] mirror the [`Vector`] and
//! [`Matrix`] APIs for `f64`, but store their data in buffers aligned
//! to a 32-byte boundary with capacity rounded up to a whole number of
//! 4-lane groups. Arithmetic and the summing reductions route through
//! the [`simd`](crate::simd) kernels.
//!
//! These are throughput containers for inner loops (filter delay
//! lines, correlation windows). Everything else should prefer the
//! generic containers.
//!
//! [`Vector`]: crate::Vector
//! [`Matrix`]: crate::Matrix

mod matrix;
mod vector;

pub use matrix::AlignedMatrix;
pub use vector::AlignedVector;

/// Allocation alignment in bytes. One AVX register.
pub(crate) const ALIGN: usize = 32;

/// `f64` lanes per aligned group.
pub(crate) const LANES: usize = ALIGN / core::mem::size_of::<f64>();

/// Round `n` up to a whole number of lane groups.
#[inline]
pub(crate) fn padded_len(n: usize) -> usize {
    (n + LANES - 1) / LANES * LANES
}
