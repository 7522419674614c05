//! Growable double-ended queue over a replaceable [`RingBuffer`].
//!
//! # Cursors
//! Two unbounded cursors delimit the live window `[top, bottom)`:
//!
//! * `bottom` is the next index `push` writes to; `pop` takes from just below it.
//! * `top` is the next index `shift` takes from.
//!
//! Both cursors use wrapping arithmetic, so `len = bottom - top` stays correct
//! even after the cursors wrap around `usize`. Because resizing keeps logical
//! indices, the cursors are never adjusted when the buffer is replaced.
//!
//! # Growth and shrink
//! `push` doubles the buffer as soon as the window fills it. Shrinking never
//! happens on its own: call [`Deque::try_shrink`], or wrap the deque in a
//! [`PolicyDeque`](crate::PolicyDeque) that calls it for you.

use core::fmt;
use core::iter::FusedIterator;
use std::collections::VecDeque;

use crate::config::{DEFAULT_LOG_SIZE, DEFAULT_SHRINK_FACTOR, DequeConfig};
use crate::error::Result;
use crate::ring_buffer::RingBuffer;

// ─── AnyDeque ─────────────────────────────────────────────────────────────────

/// Object-safe view of a queue with a LIFO end (`push`/`pop`) and a FIFO end (`shift`).
///
/// Implemented by [`Deque`], [`PolicyDeque`](crate::PolicyDeque) and
/// `VecDeque<T>`, so callers can swap backends or check one against another.
pub trait AnyDeque<T> {
    /// Returns the number of elements in the deque.
    fn len(&self) -> usize;
    /// Returns `true` if the deque contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Appends an element at the bottom.
    fn push(&mut self, item: T);
    /// Removes the most recently pushed element, or `None` if empty.
    fn pop(&mut self) -> Option<T>;
    /// Removes the oldest element, or `None` if empty.
    fn shift(&mut self) -> Option<T>;
    /// Removes all elements.
    fn clear(&mut self);
    /// The element `shift` would return next.
    fn front(&self) -> Option<&T>;
    /// The element `pop` would return next.
    fn back(&self) -> Option<&T>;
}

impl<T> AnyDeque<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) {
        self.push_back(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_back()
    }
    fn shift(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}

// ─── Deque ────────────────────────────────────────────────────────────────────

/// A deque whose storage grows on demand and shrinks when asked to.
///
/// ```
/// use ring_deque::Deque;
///
/// let mut deque = Deque::new();
/// for i in 1..=9 {
///     deque.push(i);
/// }
/// assert_eq!(deque.capacity(), 16); // grew 8 -> 16 on the 9th push
///
/// assert_eq!(deque.shift(), Some(1)); // oldest
/// assert_eq!(deque.pop(), Some(9)); // newest
///
/// while deque.pop().is_some() {}
/// assert!(deque.try_shrink());
/// assert_eq!(deque.capacity(), 8);
/// ```
#[derive(Clone)]
pub struct Deque<T> {
    bottom: usize,
    top: usize,
    k: usize,
    /// Set after a shrink, cleared by any push/pop/shift. Makes back-to-back
    /// `try_shrink` calls resize at most once.
    settled: bool,
    buffer: RingBuffer<T>,
}

impl<T> AnyDeque<T> for Deque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push(&mut self, item: T) {
        self.push(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.pop()
    }
    fn shift(&mut self) -> Option<T> {
        self.shift()
    }
    fn clear(&mut self) {
        self.clear();
    }
    fn front(&self) -> Option<&T> {
        self.front()
    }
    fn back(&self) -> Option<&T> {
        self.back()
    }
}

impl<T> Deque<T> {
    /// Creates an empty deque with capacity 8 and `k = 3`.
    pub fn new() -> Self {
        Self::from_parts(
            DEFAULT_SHRINK_FACTOR,
            RingBuffer::with_log_size(DEFAULT_LOG_SIZE),
        )
    }

    /// Creates an empty deque with the default capacity and shrink factor `k`.
    ///
    /// Fails if `k < 2`.
    pub fn with_k(k: usize) -> Result<Self> {
        Self::with_config(DequeConfig::default().with_k(k))
    }

    /// Creates an empty deque from a validated configuration.
    pub fn with_config(config: DequeConfig) -> Result<Self> {
        config.validate()?;
        let buffer = RingBuffer::try_with_log_size(config.log_size)?;
        Ok(Self::from_parts(config.k, buffer))
    }

    fn from_parts(k: usize, buffer: RingBuffer<T>) -> Self {
        Self {
            bottom: 0,
            top: 0,
            k,
            settled: false,
            buffer,
        }
    }

    // --- Inspection ---

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bottom.wrapping_sub(self.top)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bottom == self.top
    }

    /// Slots in the current buffer, always a power of two.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline(always)]
    pub fn log_size(&self) -> u32 {
        self.buffer.log_size()
    }

    /// The shrink factor: the deque may shrink once `len < capacity / k`.
    #[inline(always)]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Logical index the next `push` writes to.
    #[inline(always)]
    pub fn bottom(&self) -> usize {
        self.bottom
    }

    /// Logical index the next `shift` reads from.
    #[inline(always)]
    pub fn top(&self) -> usize {
        self.top
    }

    // --- Access ---

    /// Returns the element `offset` places after the top (oldest) end.
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset < self.len() {
            self.buffer.get(self.top.wrapping_add(offset))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset < self.len() {
            self.buffer.get_mut(self.top.wrapping_add(offset))
        } else {
            None
        }
    }

    /// The oldest element, i.e. the one `shift` returns next.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// The newest element, i.e. the one `pop` returns next.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.buffer.get(self.bottom.wrapping_sub(1))
        }
    }

    /// Iterates from the oldest element to the newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: &self.buffer,
            front: self.top,
            back: self.bottom,
        }
    }

    // --- Mutation ---

    /// Appends `value` at the bottom end, doubling the buffer if it is full.
    ///
    /// # Panics
    /// If the doubled buffer cannot be allocated. See [`try_push`](Deque::try_push).
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.reserve_one() {
            panic!("{err}");
        }
        self.write_bottom(value);
    }

    /// Like [`push`](Deque::push), but hands `value` back if growing fails.
    ///
    /// On failure the deque is left exactly as it was.
    pub fn try_push(&mut self, value: T) -> core::result::Result<(), T> {
        match self.reserve_one() {
            Ok(()) => {
                self.write_bottom(value);
                Ok(())
            }
            Err(err) => {
                log::error!("deque push rejected: {err}");
                Err(value)
            }
        }
    }

    /// Grows the buffer if the live window already fills it.
    fn reserve_one(&mut self) -> Result<()> {
        let size = self.len();
        if size > self.capacity() - 1 {
            let grown = self.buffer.grow(self.bottom, self.top)?;
            log::debug!(
                "deque grew from {} to {} slots with {size} live elements",
                self.capacity(),
                grown.capacity()
            );
            self.buffer = grown;
        }
        Ok(())
    }

    #[inline(always)]
    fn write_bottom(&mut self, value: T) {
        self.buffer.put(self.bottom, value);
        self.bottom = self.bottom.wrapping_add(1);
        self.settled = false;
    }

    /// Removes and returns the oldest element (FIFO end).
    ///
    /// Never resizes the buffer.
    pub fn shift(&mut self) -> Option<T> {
        self.settled = false;
        if self.is_empty() {
            return None;
        }
        let value = self.buffer.take(self.top);
        self.top = self.top.wrapping_add(1);
        value
    }

    /// Removes and returns the newest element (LIFO end).
    ///
    /// Popping an empty deque returns `None` and collapses `bottom` onto `top`.
    /// Never resizes the buffer.
    pub fn pop(&mut self) -> Option<T> {
        self.settled = false;
        if self.is_empty() {
            self.bottom = self.top;
            return None;
        }
        self.bottom = self.bottom.wrapping_sub(1);
        self.buffer.take(self.bottom)
    }

    /// Halves the buffer if `len < capacity / k`, keeping every element in place.
    ///
    /// Returns `true` if the buffer was replaced. This is a no-op when the
    /// buffer is already at capacity 1, or when the previous call shrank and no
    /// push, pop or shift happened since.
    pub fn try_shrink(&mut self) -> bool {
        if self.settled || !self.shrink_due() {
            return false;
        }
        let shrunk = self.shrink_once();
        self.settled = shrunk;
        shrunk
    }

    /// Halves the buffer repeatedly until the shrink ratio no longer holds.
    ///
    /// Returns the number of halvings performed.
    pub fn shrink_to_fit(&mut self) -> usize {
        let mut halvings = 0;
        while self.shrink_due() && self.shrink_once() {
            halvings += 1;
        }
        if halvings > 0 {
            self.settled = true;
        }
        halvings
    }

    /// `len < capacity / k`, evaluated without rounding.
    #[inline]
    fn shrink_due(&self) -> bool {
        self.log_size() > 0 && self.len().saturating_mul(self.k) < self.capacity()
    }

    fn shrink_once(&mut self) -> bool {
        match self.buffer.shrink(self.bottom, self.top) {
            Ok(shrunk) => {
                log::debug!(
                    "deque shrank from {} to {} slots with {} live elements",
                    self.capacity(),
                    shrunk.capacity(),
                    self.len()
                );
                self.buffer = shrunk;
                true
            }
            Err(err) => {
                log::error!("deque shrink skipped: {err}");
                false
            }
        }
    }

    /// Drops every element. The buffer keeps its current capacity.
    pub fn clear(&mut self) {
        while self.shift().is_some() {}
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
impl<T: Eq> Eq for Deque<T> {}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ─── Iter ─────────────────────────────────────────────────────────────────────

/// Borrowing iterator over a [`Deque`], oldest element first.
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let item = self.buffer.get(self.front);
        self.front = self.front.wrapping_add(1);
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.wrapping_sub(self.front);
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back = self.back.wrapping_sub(1);
        self.buffer.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Push(u16),
        Pop,
        Shift,
        TryShrink,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => any::<u16>().prop_map(Op::Push),
            2 => Just(Op::Pop),
            2 => Just(Op::Shift),
            1 => Just(Op::TryShrink),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Every sequence behaves like `VecDeque` and keeps the buffer invariants.
        #[test]
        fn prop_matches_vecdeque(k in 2usize..6, ops in prop::collection::vec(op(), 0..400)) {
            let mut deque: Deque<u16> = Deque::with_k(k).unwrap();
            let mut model: VecDeque<u16> = VecDeque::new();
            let (mut pushes, mut pops, mut shifts) = (0usize, 0usize, 0usize);

            for op in ops {
                match op {
                    Op::Push(v) => {
                        let size = deque.len();
                        let capacity = deque.capacity();
                        AnyDeque::push(&mut deque, v);
                        AnyDeque::push(&mut model, v);
                        pushes += 1;
                        let expected = if size > capacity - 1 { capacity * 2 } else { capacity };
                        prop_assert_eq!(deque.capacity(), expected);
                    }
                    Op::Pop => {
                        let got = AnyDeque::pop(&mut deque);
                        prop_assert_eq!(got, AnyDeque::pop(&mut model));
                        pops += usize::from(got.is_some());
                    }
                    Op::Shift => {
                        let got = AnyDeque::shift(&mut deque);
                        prop_assert_eq!(got, AnyDeque::shift(&mut model));
                        shifts += usize::from(got.is_some());
                    }
                    Op::TryShrink => {
                        let capacity = deque.capacity();
                        if deque.try_shrink() {
                            prop_assert!(deque.len() * k < capacity);
                            prop_assert_eq!(deque.capacity(), capacity / 2);
                        }
                    }
                }

                prop_assert_eq!(deque.len(), pushes - pops - shifts);
                prop_assert!(deque.len() <= deque.capacity());
                prop_assert!(deque.capacity().is_power_of_two());
                prop_assert_eq!(AnyDeque::front(&deque), AnyDeque::front(&model));
                prop_assert_eq!(AnyDeque::back(&deque), AnyDeque::back(&model));
            }
            prop_assert!(deque.iter().eq(model.iter()));
        }
    }
}
