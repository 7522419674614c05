//! Error type shared by the deque, its ring buffer and its configuration.

use thiserror::Error;

use crate::config::{MAX_LOG_SIZE, MIN_SHRINK_FACTOR};

/// Errors produced while configuring or resizing a [`Deque`](crate::Deque).
///
/// Reading from an empty deque is *not* an error; `pop` and `shift` return `None`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DequeError {
    /// `k` below the minimum makes the shrink and grow thresholds collide.
    #[error("shrink factor k must be at least {min}, got {0}", min = MIN_SHRINK_FACTOR)]
    InvalidShrinkFactor(usize),

    /// The requested buffer would not be addressable with `usize`.
    #[error("log size {0} exceeds the maximum of {max}", max = MAX_LOG_SIZE)]
    InvalidLogSize(u32),

    #[error("failed to allocate a ring buffer of capacity 2^{log_size}")]
    AllocationFailed { log_size: u32 },
}

/// Shorthand used throughout the crate.
pub type Result<T, E = DequeError> = core::result::Result<T, E>;
