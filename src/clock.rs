//! Wall-clock source in epoch seconds, swappable for tests.

use chrono::Utc;

pub trait Clock: Send + Sync {
    /// Current time as epoch seconds.
    fn now(&self) -> i64;
}

/// System clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
