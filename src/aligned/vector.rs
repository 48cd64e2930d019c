use alloc::alloc::{alloc_zeroed, dealloc, handle_alloc_error, Layout};
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use core::ptr::NonNull;

use crate::simd;
use crate::vector::{AllocError, Vector};

use super::{padded_len, ALIGN};

/// A 32-byte-aligned `f64` vector.
///
/// Mirrors the [`Vector<f64>`] API: the same soft out-of-range access,
/// min-length element-wise arithmetic, sub-range extraction, and FIFO
/// shifts. The backing buffer is aligned to [`ALIGN`](super::ALIGN)
/// bytes, its capacity is rounded up to a whole number of 4-lane
/// groups, and the padding lanes are kept at zero, so the SIMD kernels
/// can stream the buffer without an alignment prologue.
///
/// ```
/// use sigmath::AlignedVector;
///
/// let a = AlignedVector::from_slice(&[1.0, 2.0, 3.0]);
/// let b = AlignedVector::from_slice(&[4.0, 5.0, 6.0]);
/// assert_eq!(a.dot(&b), 32.0);
/// assert_eq!((&a + &b).as_slice(), &[5.0, 7.0, 9.0]);
/// assert_eq!(a.as_slice().as_ptr() as usize % 32, 0);
/// ```
pub struct AlignedVector {
    ptr: NonNull<f64>,
    len: usize,
    /// Allocated capacity in elements, a multiple of the lane count.
    /// Zero means nothing is allocated and `ptr` is dangling.
    cap: usize,
}

// The buffer is uniquely owned, exactly like a Vec<f64>.
unsafe impl Send for AlignedVector {}
unsafe impl Sync for AlignedVector {}

#[inline]
fn layout_for(cap: usize) -> Layout {
    // cap is a non-zero lane multiple; the size cannot overflow isize
    // for any allocation that previously succeeded.
    Layout::from_size_align(cap * core::mem::size_of::<f64>(), ALIGN)
        .unwrap_or_else(|_| Layout::new::<f64>())
}

/// Allocate a zeroed, aligned buffer of `cap` elements (`cap` > 0).
fn try_alloc(cap: usize) -> Result<NonNull<f64>, AllocError> {
    let layout = Layout::from_size_align(cap * core::mem::size_of::<f64>(), ALIGN)
        .map_err(|_| AllocError { requested: cap })?;
    let raw = unsafe { alloc_zeroed(layout) } as *mut f64;
    NonNull::new(raw).ok_or(AllocError { requested: cap })
}

// ── Construction ────────────────────────────────────────────────────

impl AlignedVector {
    /// A null vector. Allocates nothing.
    pub fn new() -> Self {
        AlignedVector {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
        }
    }

    /// An `n`-element vector of zeros.
    ///
    /// Aborts on allocation failure, like `Vec`; use
    /// [`try_zeros`](AlignedVector::try_zeros) to observe it instead.
    pub fn zeros(n: usize) -> Self {
        match Self::try_zeros(n) {
            Ok(v) => v,
            Err(_) => handle_alloc_error(layout_for(padded_len(n).max(1))),
        }
    }

    /// An `n`-element vector of zeros, reporting allocation failure.
    pub fn try_zeros(n: usize) -> Result<Self, AllocError> {
        if n == 0 {
            return Ok(Self::new());
        }
        let cap = padded_len(n);
        let ptr = try_alloc(cap)?;
        Ok(AlignedVector { ptr, len: n, cap })
    }

    /// An `n`-element vector with every element set to `value`.
    pub fn fill(n: usize, value: f64) -> Self {
        let mut v = Self::zeros(n);
        simd::fill(v.as_mut_slice(), value);
        v
    }

    /// An aligned copy of a slice.
    pub fn from_slice(data: &[f64]) -> Self {
        let mut v = Self::zeros(data.len());
        v.as_mut_slice().copy_from_slice(data);
        v
    }

    /// An aligned copy of a generic vector's contents.
    pub fn from_vector(src: &Vector<f64>) -> Self {
        Self::from_slice(src.as_slice())
    }

    /// Copy out into a generic [`Vector<f64>`].
    pub fn to_vector(&self) -> Vector<f64> {
        Vector::from_slice(self.as_slice())
    }
}

impl Default for AlignedVector {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AlignedVector {
    fn drop(&mut self) {
        if self.cap > 0 {
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout_for(self.cap)) };
        }
    }
}

impl Clone for AlignedVector {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

// ── Access ──────────────────────────────────────────────────────────

impl AlignedVector {
    /// Number of elements (excluding alignment padding).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View the elements as a slice. The pointer is 32-byte aligned
    /// whenever the vector is non-empty.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Checked read.
    #[inline]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.as_slice().get(i).copied()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, f64> {
        self.as_slice().iter()
    }

    /// Soft read: the element, or `0.0` out of range. Never panics.
    #[inline]
    pub fn at(&self, i: usize) -> f64 {
        self.get(i).unwrap_or(0.0)
    }

    /// Soft write: stores `value` at `i`, or does nothing out of range.
    #[inline]
    pub fn set_at(&mut self, i: usize, value: f64) {
        if let Some(slot) = self.as_mut_slice().get_mut(i) {
            *slot = value;
        }
    }
}

// ── Resize / copy / sub-range / FIFO shifts ─────────────────────────

impl AlignedVector {
    /// Resize to `n` elements, **discarding previous contents** (the
    /// new buffer is zero-filled). Resizing to the current length is a
    /// no-op that leaves all elements unchanged.
    pub fn resize(&mut self, n: usize) -> Result<(), AllocError> {
        if n == self.len {
            return Ok(());
        }
        if padded_len(n) == self.cap {
            // Same allocation class: reuse the buffer, zeroing the
            // whole capacity so the padding lanes stay at zero.
            self.len = n;
            unsafe { core::ptr::write_bytes(self.ptr.as_ptr(), 0, self.cap) };
            return Ok(());
        }
        *self = Self::try_zeros(n)?;
        Ok(())
    }

    /// Copy `min(self.len(), other.len())` elements from `other`;
    /// trailing elements of `self` are left unmodified.
    pub fn copy_from(&mut self, other: &Self) {
        let n = self.len.min(other.len);
        self.as_mut_slice()[..n].copy_from_slice(&other.as_slice()[..n]);
    }

    /// Become an equal copy of `other`.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), AllocError> {
        self.resize(other.len())?;
        self.copy_from(other);
        Ok(())
    }

    /// Extract `[offset, offset + len)` as a new aligned vector,
    /// clipped to the available data; fully out of range yields a null
    /// vector.
    pub fn subrange(&self, offset: usize, len: usize) -> Self {
        if offset >= self.len {
            return Self::new();
        }
        let end = self.len.min(offset.saturating_add(len));
        Self::from_slice(&self.as_slice()[offset..end])
    }

    /// FIFO shift toward the end: `value` enters at the back and the
    /// evicted front element is returned (pass-through when empty).
    pub fn push_back(&mut self, value: f64) -> f64 {
        let s = self.as_mut_slice();
        match s.first().copied() {
            None => value,
            Some(evicted) => {
                s.rotate_left(1);
                if let Some(last) = s.last_mut() {
                    *last = value;
                }
                evicted
            }
        }
    }

    /// FIFO shift toward the front: `value` enters at index 0 and the
    /// evicted back element is returned (pass-through when empty).
    pub fn push_front(&mut self, value: f64) -> f64 {
        let s = self.as_mut_slice();
        match s.last().copied() {
            None => value,
            Some(evicted) => {
                s.rotate_right(1);
                s[0] = value;
                evicted
            }
        }
    }
}

// ── Reductions ──────────────────────────────────────────────────────

impl AlignedVector {
    /// Maximum element; `0.0` when empty.
    pub fn max(&self) -> f64 {
        simd::max(self.as_slice())
    }

    /// Minimum element; `0.0` when empty.
    pub fn min(&self) -> f64 {
        simd::min(self.as_slice())
    }

    /// Maximum absolute value; `0.0` when empty.
    pub fn max_abs(&self) -> f64 {
        simd::max_abs(self.as_slice())
    }

    /// Minimum absolute value; `0.0` when empty.
    pub fn min_abs(&self) -> f64 {
        simd::min_abs(self.as_slice())
    }

    /// Sum of all elements; `0.0` when empty.
    pub fn sum(&self) -> f64 {
        simd::sum(self.as_slice())
    }

    /// Arithmetic mean; `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.sum() / self.len as f64
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Dot product over the common prefix of the two vectors.
    pub fn dot(&self, rhs: &Self) -> f64 {
        let n = self.len.min(rhs.len);
        simd::dot(&self.as_slice()[..n], &rhs.as_slice()[..n])
    }
}

// ── Operators ───────────────────────────────────────────────────────

macro_rules! impl_aligned_scalar_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl $assign_trait<f64> for AlignedVector {
            fn $assign_method(&mut self, rhs: f64) {
                simd::$kernel(self.as_mut_slice(), rhs);
            }
        }

        impl $trait<f64> for &AlignedVector {
            type Output = AlignedVector;
            fn $method(self, rhs: f64) -> AlignedVector {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl $trait<f64> for AlignedVector {
            type Output = AlignedVector;
            fn $method(mut self, rhs: f64) -> AlignedVector {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_aligned_scalar_op!(Add, add, AddAssign, add_assign, add_scalar);
impl_aligned_scalar_op!(Sub, sub, SubAssign, sub_assign, sub_scalar);
impl_aligned_scalar_op!(Mul, mul, MulAssign, mul_assign, mul_scalar);
impl_aligned_scalar_op!(Div, div, DivAssign, div_assign, div_scalar);

macro_rules! impl_aligned_vector_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $kernel:ident) => {
        impl $assign_trait<&AlignedVector> for AlignedVector {
            fn $assign_method(&mut self, rhs: &AlignedVector) {
                let n = self.len.min(rhs.len);
                simd::$kernel(&mut self.as_mut_slice()[..n], &rhs.as_slice()[..n]);
            }
        }

        impl $trait<&AlignedVector> for &AlignedVector {
            type Output = AlignedVector;
            fn $method(self, rhs: &AlignedVector) -> AlignedVector {
                let mut out = self.clone();
                out.$assign_method(rhs);
                out
            }
        }

        impl $trait<&AlignedVector> for AlignedVector {
            type Output = AlignedVector;
            fn $method(mut self, rhs: &AlignedVector) -> AlignedVector {
                self.$assign_method(rhs);
                self
            }
        }
    };
}

impl_aligned_vector_op!(Add, add, AddAssign, add_assign, add_assign);
impl_aligned_vector_op!(Sub, sub, SubAssign, sub_assign, sub_assign);
impl_aligned_vector_op!(Mul, mul, MulAssign, mul_assign, mul_assign);
impl_aligned_vector_op!(Div, div, DivAssign, div_assign, div_assign);

impl Neg for &AlignedVector {
    type Output = AlignedVector;

    fn neg(self) -> AlignedVector {
        let mut out = self.clone();
        simd::mul_scalar(out.as_mut_slice(), -1.0);
        out
    }
}

impl Neg for AlignedVector {
    type Output = AlignedVector;

    fn neg(mut self) -> AlignedVector {
        simd::mul_scalar(self.as_mut_slice(), -1.0);
        self
    }
}

// ── Trait plumbing ──────────────────────────────────────────────────

impl Index<usize> for AlignedVector {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.as_slice()[i]
    }
}

impl IndexMut<usize> for AlignedVector {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.as_mut_slice()[i]
    }
}

impl PartialEq for AlignedVector {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl core::fmt::Debug for AlignedVector {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a AlignedVector {
    type Item = &'a f64;
    type IntoIter = core::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
