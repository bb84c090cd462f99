// src/timer.rs - Monotonic clock and the temporary-silence deadline
//
// Time is read through the `Clock` trait so the silence timer never blocks and
// tests can move time forward without sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time, expressed as the duration since the clock's origin
pub trait Clock {
    /// Current time since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall-independent clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Start a clock at the current instant
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock moved by hand. Clones share the same time.
///
/// ```rust
/// use n2k_alert::timer::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, by: Duration) {
        let millis = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Jump to an absolute time since the origin
    pub fn set(&self, at: Duration) {
        let millis = u64::try_from(at.as_millis()).unwrap_or(u64::MAX);
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// One-shot deadline: armed relative to "now", queried by polling.
///
/// There is no cancel operation; an unarmed timer never reports elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SilenceTimer {
    deadline: Option<Duration>,
}

impl SilenceTimer {
    /// Create an unarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to elapse `delay` after `now`
    pub fn arm(&mut self, now: Duration, delay: Duration) {
        self.deadline = Some(now.saturating_add(delay));
    }

    /// `true` once an armed deadline has been reached
    pub fn is_elapsed(&self, now: Duration) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// `true` while a deadline is set
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, `None` when unarmed
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    /// Drop the deadline after it has been consumed
    pub(crate) fn disarm(&mut self) {
        self.deadline = None;
    }
}
