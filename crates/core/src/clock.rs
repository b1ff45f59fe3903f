//! Time sources for sessions.
//!
//! Sessions measure elapsed time against a monotonic [`Instant`] and stamp
//! finished games with local wall-clock time. Both come from a [`Clock`] so
//! tests and benchmarks can drive time by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};

pub trait Clock {
    /// Monotonic now.
    fn now(&self) -> Instant;

    /// Local wall-clock time, used for leaderboard timestamps.
    fn wall_time(&self) -> NaiveDateTime;
}

/// The process clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_time(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A manually advanced clock.
///
/// Clones share the same offset, so a test can keep one handle and advance
/// time while a session owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    wall_base: NaiveDateTime,
    offset_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(wall_base: NaiveDateTime) -> Self {
        Self {
            base: Instant::now(),
            wall_base,
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }

    fn wall_time(&self) -> NaiveDateTime {
        match chrono::Duration::from_std(self.elapsed()) {
            Ok(offset) => self.wall_base + offset,
            Err(_) => self.wall_base,
        }
    }
}
