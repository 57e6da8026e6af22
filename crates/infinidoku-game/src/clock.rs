//! Monotonic time sources for session bookkeeping.
//!
//! The session never schedules anything; it only compares millisecond
//! readings taken from a [`Clock`] (elapsed-time accumulation and the
//! speed-bonus window). Production code uses [`MonotonicClock`]; tests and
//! deterministic replays use [`ManualClock`].

use std::{cell::Cell, fmt, rc::Rc, time::Instant};

/// A monotonic millisecond clock.
///
/// Implementations must never go backwards between calls on the same value.
pub trait Clock: fmt::Debug {
    /// Returns the current reading in milliseconds.
    ///
    /// The origin is arbitrary; only differences between readings are
    /// meaningful.
    fn now_ms(&self) -> u64;
}

/// The real monotonic clock, measured from the moment of construction.
#[derive(Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose readings start at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A hand-driven clock for tests and deterministic replays.
///
/// Clones share the same reading, so a test can keep one handle while the
/// session owns another.
///
/// # Examples
///
/// ```
/// use infinidoku_game::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// clock.advance(1_500);
/// assert_eq!(handle.now_ms(), 1_500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the reading forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get().saturating_add(ms));
    }

    /// Sets the reading to an absolute value.
    ///
    /// # Panics
    ///
    /// Panics if `ms` is smaller than the current reading; the clock is
    /// monotonic.
    pub fn set(&self, ms: u64) {
        assert!(
            ms >= self.0.get(),
            "manual clock cannot go backwards ({} -> {ms})",
            self.0.get()
        );
        self.0.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}
