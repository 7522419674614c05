//! Automatic shrinking layered over [`Deque::pop`].
//!
//! A [`ShrinkPolicy`] decides *when* [`Deque::try_shrink`] runs. A
//! [`PolicyDeque`] owns a plain [`Deque`] plus a policy: its `pop` calls the
//! inner deque's `pop` and then hands the deque to the policy.
//!
//! * [`Eager`] checks after every pop. Cheap to reason about, but a workload
//!   that keeps crossing the `k` threshold will resize back and forth.
//! * [`Debounced`] restarts a timer on every pop and runs a single check once
//!   the deque has been idle for `timeout`. The timer is cooperative: nothing
//!   fires until the owner calls [`PolicyDeque::tick`].

use core::fmt;
use core::ops::Deref;
use std::time::{Duration, Instant};

use crate::clock::{Clock, SystemClock};
use crate::config::DequeConfig;
use crate::deque::{AnyDeque, Deque};
use crate::error::Result;

// ─── ShrinkPolicy ─────────────────────────────────────────────────────────────

/// Decides when a deque should check whether it can shrink.
pub trait ShrinkPolicy {
    /// Runs after every `pop`, whether or not it returned an element.
    fn after_pop<T>(&mut self, deque: &mut Deque<T>);

    /// Runs deferred work that has come due.
    ///
    /// Returns `true` if a shrink check ran (even if it left the buffer as is).
    fn tick<T>(&mut self, _deque: &mut Deque<T>) -> bool {
        false
    }
}

/// Shrink check after every pop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eager;

impl ShrinkPolicy for Eager {
    #[inline]
    fn after_pop<T>(&mut self, deque: &mut Deque<T>) {
        deque.try_shrink();
    }
}

/// Shrink check once pops have stopped for `timeout`.
///
/// Holds at most one pending deadline. Every pop, [`count_down`] or
/// [`set_timeout`] overwrites or clears it, so two checks are never scheduled
/// at once.
///
/// [`count_down`]: Debounced::count_down
/// [`set_timeout`]: Debounced::set_timeout
#[derive(Debug, Clone)]
pub struct Debounced<C = SystemClock> {
    timeout: Duration,
    deadline: Option<Instant>,
    clock: C,
}

impl Debounced<SystemClock> {
    pub fn new(timeout: Duration) -> Self {
        Self::with_clock(timeout, SystemClock)
    }
}

impl<C: Clock> Debounced<C> {
    pub fn with_clock(timeout: Duration, clock: C) -> Self {
        Self {
            timeout,
            deadline: None,
            clock,
        }
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Changes the idle period and cancels any pending check.
    ///
    /// The new value is used from the next pop or `count_down` on.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.cancel("timeout changed");
        self.timeout = timeout;
    }

    /// (Re)starts the timer, replacing any pending check.
    pub fn count_down(&mut self) {
        self.deadline = self.clock.now().checked_add(self.timeout);
        match self.deadline {
            Some(_) => log::trace!("shrink check scheduled in {:?}", self.timeout),
            None => log::trace!("shrink timeout {:?} is unreachable, not scheduling", self.timeout),
        }
    }

    /// Cancels the pending check without scheduling another one.
    pub fn stop(&mut self) {
        self.cancel("stopped");
    }

    /// `true` while a shrink check is scheduled.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending check fires, if one is scheduled.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn cancel(&mut self, reason: &str) {
        if self.deadline.take().is_some() {
            log::trace!("pending shrink check cancelled: {reason}");
        }
    }

    /// Clears and reports the deadline if it has passed.
    fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl<C: Clock> ShrinkPolicy for Debounced<C> {
    #[inline]
    fn after_pop<T>(&mut self, _deque: &mut Deque<T>) {
        self.count_down();
    }

    fn tick<T>(&mut self, deque: &mut Deque<T>) -> bool {
        if !self.take_due() {
            return false;
        }
        let capacity = deque.capacity();
        let shrunk = deque.try_shrink();
        log::trace!("debounced shrink check ran at capacity {capacity}, shrunk: {shrunk}");
        true
    }
}

// ─── PolicyDeque ──────────────────────────────────────────────────────────────

/// A [`Deque`] whose `pop` is followed by a [`ShrinkPolicy`] hook.
///
/// Dereferences to the inner deque for read-only access (`len`, `capacity`,
/// `iter`, ...). Mutation goes through the wrapper so the policy always sees
/// every pop.
///
/// ```
/// use ring_deque::EagerDeque;
///
/// let mut deque = EagerDeque::eager();
/// deque.extend(0..9);
/// assert_eq!(deque.capacity(), 16);
///
/// while deque.pop().is_some() {}
/// assert!(deque.capacity() < 16);
/// ```
pub struct PolicyDeque<T, P> {
    deque: Deque<T>,
    policy: P,
}

/// Shrinks after every pop.
pub type EagerDeque<T> = PolicyDeque<T, Eager>;

/// Shrinks once pops have paused for the configured timeout.
pub type DebouncedDeque<T, C = SystemClock> = PolicyDeque<T, Debounced<C>>;

impl<T, P: ShrinkPolicy> PolicyDeque<T, P> {
    pub fn from_parts(deque: Deque<T>, policy: P) -> Self {
        Self { deque, policy }
    }

    pub fn push(&mut self, value: T) {
        self.deque.push(value);
    }

    pub fn try_push(&mut self, value: T) -> core::result::Result<(), T> {
        self.deque.try_push(value)
    }

    pub fn shift(&mut self) -> Option<T> {
        self.deque.shift()
    }

    /// Pops from the inner deque, then lets the policy react.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.deque.pop();
        self.policy.after_pop(&mut self.deque);
        item
    }

    /// Runs a manual shrink check regardless of the policy.
    pub fn try_shrink(&mut self) -> bool {
        self.deque.try_shrink()
    }

    /// Lets the policy run any deferred shrink check that has come due.
    pub fn tick(&mut self) -> bool {
        self.policy.tick(&mut self.deque)
    }

    pub fn clear(&mut self) {
        self.deque.clear();
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    /// Drops the policy and returns the plain deque.
    pub fn into_inner(self) -> Deque<T> {
        self.deque
    }
}

impl<T> PolicyDeque<T, Eager> {
    pub fn eager() -> Self {
        Self::from_parts(Deque::new(), Eager)
    }

    pub fn eager_with_config(config: DequeConfig) -> Result<Self> {
        Ok(Self::from_parts(Deque::with_config(config)?, Eager))
    }
}

impl<T> PolicyDeque<T, Debounced<SystemClock>> {
    /// Debounced deque with the default `k`, capacity and 5 s timeout.
    pub fn debounced() -> Self {
        let config = DequeConfig::default();
        Self::from_parts(Deque::new(), Debounced::new(config.timeout))
    }

    pub fn debounced_with_config(config: DequeConfig) -> Result<Self> {
        Self::debounced_with_clock(config, SystemClock)
    }
}

impl<T, C: Clock> PolicyDeque<T, Debounced<C>> {
    pub fn debounced_with_clock(config: DequeConfig, clock: C) -> Result<Self> {
        let deque = Deque::with_config(config)?;
        Ok(Self::from_parts(
            deque,
            Debounced::with_clock(config.timeout, clock),
        ))
    }

    pub fn timeout(&self) -> Duration {
        self.policy.timeout()
    }

    /// See [`Debounced::set_timeout`].
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.policy.set_timeout(timeout);
    }

    /// Restarts the timer without popping. Keeps the deque from shrinking for
    /// another `timeout`.
    pub fn count_down(&mut self) {
        self.policy.count_down();
    }

    /// Cancels the pending check; nothing fires again until the next pop or `count_down`.
    pub fn stop(&mut self) {
        self.policy.stop();
    }

    pub fn is_pending(&self) -> bool {
        self.policy.is_pending()
    }
}

impl<T, P> Deref for PolicyDeque<T, P> {
    type Target = Deque<T>;

    fn deref(&self) -> &Deque<T> {
        &self.deque
    }
}

impl<T, P: ShrinkPolicy> AnyDeque<T> for PolicyDeque<T, P> {
    fn len(&self) -> usize {
        self.deque.len()
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
        self.deque.front()
    }
    fn back(&self) -> Option<&T> {
        self.deque.back()
    }
}

impl<T, P: ShrinkPolicy> Extend<T> for PolicyDeque<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.deque.extend(iter);
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PolicyDeque<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyDeque")
            .field("deque", &self.deque)
            .field("policy", &self.policy)
            .finish()
    }
}
