//! # Ring Deque
//!
//! A double-ended queue backed by a power-of-two circular buffer that grows on
//! demand and shrinks when told to.
//!
//! Elements enter at the *bottom* with `push`. They leave either from the bottom
//! again with `pop` (LIFO) or from the *top* with `shift` (FIFO).
//!
//! ## Key Features
//!
//! * **Stable logical indices:** every element keeps the index it was pushed at.
//!   Growing or shrinking swaps in a new [`RingBuffer`] and copies only the live
//!   window, so the deque's cursors never move.
//! * **Amortized O(1) push:** the buffer doubles as soon as it is full.
//! * **Controlled shrink:** [`Deque::try_shrink`] halves the buffer once fewer
//!   than `capacity / k` slots are in use. Nothing shrinks implicitly.
//! * **Shrink policies:** [`EagerDeque`] checks after every pop,
//!   [`DebouncedDeque`] checks once pops have paused for a configurable timeout.
//!
//! ## Configuration (`k`)
//!
//! * `k` must be **at least 2**. With `k = 1` a shrink could immediately undo
//!   the previous grow.
//! * Lower `k` shrinks more aggressively; the default is 3.
//!
//! ## Examples
//!
//! ### Deque
//!
//! ```rust
//! use ring_deque::Deque;
//!
//! let mut deque = Deque::with_k(3)?;
//! deque.extend(1..=9);
//! assert_eq!(deque.capacity(), 16);
//!
//! assert_eq!(deque.pop(), Some(9));
//! assert_eq!(deque.shift(), Some(1));
//! # Ok::<(), ring_deque::DequeError>(())
//! ```
//!
//! ### Debounced shrinking
//!
//! ```rust
//! use std::time::Duration;
//! use ring_deque::{DebouncedDeque, DequeConfig, ManualClock, PolicyDeque};
//!
//! let clock = ManualClock::new();
//! let config = DequeConfig::default().with_timeout(Duration::from_millis(100));
//! let mut deque: DebouncedDeque<u32, _> = PolicyDeque::debounced_with_clock(config, clock.clone())?;
//!
//! deque.extend(0..9);
//! while deque.pop().is_some() {}
//! assert_eq!(deque.capacity(), 16);
//!
//! clock.advance(Duration::from_millis(100));
//! assert!(deque.tick());
//! assert_eq!(deque.capacity(), 8);
//! # Ok::<(), ring_deque::DequeError>(())
//! ```
//!
//! ## Threading
//!
//! Nothing here is synchronized. Callers sharing a deque across threads must
//! serialize every mutating call themselves.

// --- Module Declarations ---

pub mod clock;
pub mod config;
pub mod deque;
pub mod error;
pub mod policy;
pub mod ring_buffer;

// --- Re-exports ---

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DequeConfig;
pub use deque::{AnyDeque, Deque, Iter};
pub use error::{DequeError, Result};
pub use policy::{Debounced, DebouncedDeque, Eager, EagerDeque, PolicyDeque, ShrinkPolicy};
pub use ring_buffer::RingBuffer;
