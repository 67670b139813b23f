//! Time source for the `*_now` conveniences
//!
//! The core operations take `now` explicitly; these types only supply it.

use chrono::Utc;

/// Source of the current unix time in seconds.
pub trait Clock: Send + Sync {
    /// Current unix time, in seconds
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> i64 {
        unix_now()
    }
}

/// Clock pinned to one instant, for tests and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> i64 {
        self.0
    }
}

/// Current unix time in seconds
#[inline]
#[must_use]
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}
