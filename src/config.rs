//! Construction parameters for [`Deque`](crate::Deque) and the shrink policies.

use core::time::Duration;

use crate::error::{DequeError, Result};

/// Default `k`: shrink once the live window uses less than a third of the buffer.
pub const DEFAULT_SHRINK_FACTOR: usize = 3;

/// Smallest accepted `k`. With `k = 1` a shrink would immediately undo a grow.
pub const MIN_SHRINK_FACTOR: usize = 2;

/// Default buffer size exponent (capacity 8).
pub const DEFAULT_LOG_SIZE: u32 = 3;

/// Largest size exponent whose capacity still fits in a `usize`.
pub const MAX_LOG_SIZE: u32 = usize::BITS - 1;

/// Default idle period before a debounced shrink check fires.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Tunables for a deque and its shrink policy.
///
/// ```
/// use std::time::Duration;
/// use ring_deque::DequeConfig;
///
/// let config = DequeConfig::default()
///     .with_k(4)
///     .with_log_size(5)
///     .with_timeout(Duration::from_millis(250));
/// assert!(config.validate().is_ok());
/// assert!(DequeConfig::default().with_k(1).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DequeConfig {
    /// Shrink factor: shrink when `len < capacity / k`.
    pub k: usize,
    /// Initial buffer capacity is `2^log_size`.
    pub log_size: u32,
    /// Debounce window, only read by the debounced policy.
    pub timeout: Duration,
}

impl Default for DequeConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_SHRINK_FACTOR,
            log_size: DEFAULT_LOG_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DequeConfig {
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_log_size(mut self, log_size: u32) -> Self {
        self.log_size = log_size;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Rejects settings that would make the deque oscillate or overflow.
    pub fn validate(&self) -> Result<()> {
        if self.k < MIN_SHRINK_FACTOR {
            return Err(DequeError::InvalidShrinkFactor(self.k));
        }
        if self.log_size > MAX_LOG_SIZE {
            return Err(DequeError::InvalidLogSize(self.log_size));
        }
        Ok(())
    }
}
