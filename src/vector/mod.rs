mod ops;
mod reduce;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{CastFrom, Scalar};

/// Storage could not be obtained for a requested size.
///
/// Returned by [`Vector::try_zeros`], [`Vector::resize`], and
/// [`Vector::assign_from`]. Never silently swallowed: any operation that
/// allocates reports failure to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Number of elements that could not be allocated.
    pub requested: usize,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "allocation of {} elements failed", self.requested)
    }
}

/// Owning, resizable 1-D numeric container.
///
/// The workhorse buffer of the crate: DSP algorithms fill it by index or
/// bulk operation and hand it to the FFT, filters, and matrix algebra.
/// Every instance exclusively owns its storage; `Clone` is a deep copy and
/// sub-range extraction produces independent vectors, never views.
///
/// Two access styles coexist:
///
/// - **Strict**: `v[i]` panics out of range, [`get`](Vector::get) returns
///   `Option`. Use these in code that treats a bad index as a bug.
/// - **Soft**: [`at`](Vector::at) returns `T::zero()` out of range and
///   [`set_at`](Vector::set_at) ignores out-of-range writes. Exploratory
///   DSP loops rely on this "never crash, always degrade" contract. Each
///   out-of-range read produces a fresh default; no state is shared between
///   degraded accesses.
///
/// # Examples
///
/// ```
/// use sigmath::Vector;
///
/// let mut v = Vector::from_slice(&[1.0, 2.0, 3.0]);
/// v += 1.0;
/// assert_eq!(v.as_slice(), &[2.0, 3.0, 4.0]);
/// assert_eq!(v.at(99), 0.0); // soft out-of-range read
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Create a null (empty) vector.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v: Vector<f64> = Vector::new();
    /// assert!(v.is_empty());
    /// ```
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a zero-filled vector of length `n`.
    ///
    /// `n == 0` yields a valid null vector. Aborts on allocation
    /// exhaustion like any `Vec`; use [`try_zeros`](Vector::try_zeros)
    /// to observe that failure instead.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::<f64>::zeros(4);
    /// assert_eq!(v.len(), 4);
    /// assert_eq!(v[3], 0.0);
    /// ```
    pub fn zeros(n: usize) -> Self {
        Self {
            data: alloc::vec![T::zero(); n],
        }
    }

    /// Create a zero-filled vector, reporting allocation failure.
    pub fn try_zeros(n: usize) -> Result<Self, AllocError> {
        let mut data = Vec::new();
        data.try_reserve_exact(n)
            .map_err(|_| AllocError { requested: n })?;
        data.resize(n, T::zero());
        Ok(Self { data })
    }

    /// Create a vector filled with `value`.
    pub fn fill(n: usize, value: T) -> Self {
        Self {
            data: alloc::vec![value; n],
        }
    }

    /// Create a vector by copying a slice.
    ///
    /// This is one half of the raw-buffer boundary the file-I/O layer
    /// uses; [`as_slice`](Vector::as_slice) is the other.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[1.0, 2.0]);
    /// assert_eq!(v.len(), 2);
    /// ```
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a vector from an owned `Vec` without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a vector by calling `f(i)` for each index.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_fn(3, |i| (i * 2) as f64);
    /// assert_eq!(v.as_slice(), &[0.0, 2.0, 4.0]);
    /// ```
    pub fn from_fn(n: usize, f: impl Fn(usize) -> T) -> Self {
        Self {
            data: (0..n).map(f).collect(),
        }
    }
}

impl<T: Scalar> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Size and raw access ─────────────────────────────────────────────

impl<T> Vector<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is null (length 0).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Checked element access.
    #[inline]
    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }

    /// Checked mutable element access.
    #[inline]
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        self.data.get_mut(i)
    }

    /// Iterate over elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate mutably over elements.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

// ── Soft (degraded) access ──────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Soft read: returns the element, or a fresh `T::zero()` out of range.
    ///
    /// Never panics. Each degraded read produces an independent default
    /// value; out-of-range writes cannot influence later reads.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[7.0]);
    /// assert_eq!(v.at(0), 7.0);
    /// assert_eq!(v.at(1), 0.0);
    /// ```
    #[inline]
    pub fn at(&self, i: usize) -> T {
        self.data.get(i).copied().unwrap_or_else(T::zero)
    }

    /// Soft write: stores `value` at `i`, or does nothing out of range.
    ///
    /// Never panics and never corrupts adjacent data.
    #[inline]
    pub fn set_at(&mut self, i: usize, value: T) {
        if let Some(slot) = self.data.get_mut(i) {
            *slot = value;
        }
    }
}

// ── Resize / copy / assign ──────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Resize to `n` elements, **discarding previous contents** (the new
    /// buffer is zero-filled). Resizing to the current length is a no-op
    /// that leaves all elements unchanged. Callers that need the old data
    /// must [`copy_from`](Vector::copy_from) a clone first.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let mut v = Vector::from_slice(&[1.0, 2.0]);
    /// v.resize(4).unwrap();
    /// assert_eq!(v.as_slice(), &[0.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn resize(&mut self, n: usize) -> Result<(), AllocError> {
        if n == self.data.len() {
            return Ok(());
        }
        self.data = Self::try_zeros(n)?.data;
        Ok(())
    }

    /// Copy `min(self.len(), other.len())` elements from `other`,
    /// starting at index 0 of both. Does not resize; trailing elements of
    /// `self` beyond `other`'s length are left unmodified.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let mut a = Vector::from_slice(&[9.0, 9.0, 9.0]);
    /// let b = Vector::from_slice(&[1.0]);
    /// a.copy_from(&b);
    /// assert_eq!(a.as_slice(), &[1.0, 9.0, 9.0]);
    /// ```
    pub fn copy_from(&mut self, other: &Self) {
        let n = self.data.len().min(other.data.len());
        self.data[..n].copy_from_slice(&other.data[..n]);
    }

    /// Become an equal copy of `other`: resize to its length, then copy
    /// every element.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), AllocError> {
        self.resize(other.len())?;
        self.copy_from(other);
        Ok(())
    }
}

// ── Sub-range and FIFO shifts ───────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Extract `[offset, offset + len)` as a new, independently-owned
    /// vector, clipped to the available data. A fully out-of-range request
    /// yields a null vector rather than an error (fail-soft, intended for
    /// exploratory use).
    ///
    /// ```
    /// use sigmath::Vector;
    /// let v = Vector::from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    /// assert_eq!(v.subrange(4, 10).as_slice(), &[4.0, 5.0]);
    /// assert!(v.subrange(6, 1).is_empty());
    /// ```
    pub fn subrange(&self, offset: usize, len: usize) -> Self {
        if offset >= self.data.len() {
            return Self::new();
        }
        let end = self.data.len().min(offset.saturating_add(len));
        Self::from_slice(&self.data[offset..end])
    }

    /// FIFO shift toward the end: every element moves one position toward
    /// index 0, `value` enters at the back, and the evicted front element
    /// is returned. On an empty vector the value passes straight through.
    /// O(n) per call; the sliding-window primitive of the adaptive filter
    /// and resampler.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let mut v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v.push_back(9.0), 1.0);
    /// assert_eq!(v.as_slice(), &[2.0, 3.0, 9.0]);
    /// ```
    pub fn push_back(&mut self, value: T) -> T {
        match self.data.first().copied() {
            None => value,
            Some(evicted) => {
                self.data.rotate_left(1);
                if let Some(last) = self.data.last_mut() {
                    *last = value;
                }
                evicted
            }
        }
    }

    /// FIFO shift toward index 0's side: every element moves one position
    /// toward the end, `value` enters at the front, and the evicted back
    /// element is returned. On an empty vector the value passes straight
    /// through.
    ///
    /// ```
    /// use sigmath::Vector;
    /// let mut v = Vector::from_slice(&[2.0, 3.0, 9.0]);
    /// assert_eq!(v.push_front(9.0), 9.0);
    /// assert_eq!(v.as_slice(), &[9.0, 2.0, 3.0]);
    /// ```
    pub fn push_front(&mut self, value: T) -> T {
        match self.data.last().copied() {
            None => value,
            Some(evicted) => {
                self.data.rotate_right(1);
                self.data[0] = value;
                evicted
            }
        }
    }
}

// ── Numeric conversion ──────────────────────────────────────────────

impl<T: Scalar> Vector<T> {
    /// Convert every element to another numeric type with the target
    /// type's native truncation/rounding (see [`CastFrom`]).
    ///
    /// ```
    /// use sigmath::Vector;
    /// let pcm = Vector::from_slice(&[-32768_i16, 0, 32767]);
    /// let f: Vector<f64> = pcm.cast();
    /// assert_eq!(f.as_slice(), &[-32768.0, 0.0, 32767.0]);
    /// ```
    pub fn cast<U: Scalar + CastFrom<T>>(&self) -> Vector<U> {
        Vector {
            data: self.data.iter().map(|&x| U::cast_from(x)).collect(),
        }
    }

    /// Apply a function to every element, producing a new vector.
    pub fn map<U: Scalar>(&self, f: impl Fn(T) -> U) -> Vector<U> {
        Vector {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter_mut()
    }
}
