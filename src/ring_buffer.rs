//! Power-of-two slot storage addressed by unbounded logical indices.
//!
//! A [`RingBuffer`] never changes size. Growing or shrinking produces a *new*
//! buffer seeded with the live window `[top, bottom)` of the old one, and every
//! element keeps its logical index. The owner can therefore swap buffers without
//! touching its own cursors: only the physical slot `index & (capacity - 1)`
//! changes.

use core::fmt;

use crate::error::{DequeError, Result};

/// Fixed-capacity circular storage of `2^log_size` slots.
///
/// Each slot holds either an element or `None` (never written, or already
/// moved out). Indices are logical: `get(i)` and `put(i, ..)` resolve to slot
/// `i mod capacity` with a bitmask, so any `usize` is a valid argument.
///
/// ```
/// use ring_deque::RingBuffer;
///
/// let mut buf: RingBuffer<&str> = RingBuffer::with_log_size(2);
/// assert_eq!(buf.capacity(), 4);
///
/// buf.put(5, "five");
/// assert_eq!(buf.get(5), Some(&"five"));
/// assert_eq!(buf.get(1), Some(&"five")); // same physical slot
/// assert_eq!(buf.get(0), None);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    log_size: u32,
    slots: Box<[Option<T>]>,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with `2^log_size` slots.
    ///
    /// # Panics
    /// If the capacity overflows `usize` or the allocation fails. Use
    /// [`try_with_log_size`](RingBuffer::try_with_log_size) to handle that case.
    pub fn with_log_size(log_size: u32) -> Self {
        match Self::try_with_log_size(log_size) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible counterpart of [`with_log_size`](RingBuffer::with_log_size).
    pub fn try_with_log_size(log_size: u32) -> Result<Self> {
        let capacity = 1usize
            .checked_shl(log_size)
            .ok_or(DequeError::AllocationFailed { log_size })?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| DequeError::AllocationFailed { log_size })?;
        slots.resize_with(capacity, || None);

        Ok(Self {
            log_size,
            slots: slots.into_boxed_slice(),
        })
    }

    /// The size exponent `n` of this buffer's `2^n` capacity.
    #[inline(always)]
    pub fn log_size(&self) -> u32 {
        self.log_size
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maps a logical index to its physical slot.
    #[inline(always)]
    fn slot(&self, index: usize) -> usize {
        index & (self.slots.len() - 1)
    }

    /// Returns the element stored for logical `index`, or `None` if the slot is empty.
    ///
    /// The index is not checked against any live window; that is the caller's job.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots[self.slot(index)].as_ref()
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot(index);
        self.slots[slot].as_mut()
    }

    /// Stores `value` for logical `index`, returning whatever occupied the slot.
    #[inline(always)]
    pub fn put(&mut self, index: usize, value: T) -> Option<T> {
        let slot = self.slot(index);
        self.slots[slot].replace(value)
    }

    /// Moves the element out of logical `index`, leaving the slot empty.
    #[inline(always)]
    pub fn take(&mut self, index: usize) -> Option<T> {
        let slot = self.slot(index);
        self.slots[slot].take()
    }

    /// Builds a buffer of capacity `2^log_size` holding the live window `[top, bottom)`.
    ///
    /// Elements are moved out of `self` and written at the same logical indices
    /// in the new buffer. Anything outside the window stays behind and is dropped
    /// together with `self`. On error `self` is left untouched.
    ///
    /// # Panics
    /// If the window is larger than the new capacity.
    pub fn resized(&mut self, log_size: u32, bottom: usize, top: usize) -> Result<Self> {
        let len = bottom.wrapping_sub(top);
        let mut next = Self::try_with_log_size(log_size)?;
        assert!(
            len <= next.capacity(),
            "live window of {len} elements does not fit in capacity {}",
            next.capacity()
        );

        let mut index = top;
        while index != bottom {
            if let Some(value) = self.take(index) {
                next.put(index, value);
            }
            index = index.wrapping_add(1);
        }
        Ok(next)
    }

    /// Replacement buffer with twice the capacity.
    #[inline]
    pub fn grow(&mut self, bottom: usize, top: usize) -> Result<Self> {
        self.resized(self.log_size + 1, bottom, top)
    }

    /// Replacement buffer with half the capacity. A capacity-1 buffer is kept at size 1.
    #[inline]
    pub fn shrink(&mut self, bottom: usize, top: usize) -> Result<Self> {
        debug_assert!(self.log_size > 0, "cannot shrink below capacity 1");
        self.resized(self.log_size.saturating_sub(1), bottom, top)
    }

    /// A small buffer that reports the largest log size, so its next `grow` fails.
    #[cfg(test)]
    pub(crate) fn at_growth_limit(log_size: u32) -> Self {
        let mut buffer = Self::with_log_size(log_size);
        buffer.log_size = crate::config::MAX_LOG_SIZE;
        buffer
    }
}

impl<T> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        f.debug_struct("RingBuffer")
            .field("log_size", &self.log_size)
            .field("capacity", &self.capacity())
            .field("occupied", &occupied)
            .finish()
    }
}
