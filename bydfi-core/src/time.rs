//! Time sources.
//!
//! All timestamps are `i64` milliseconds since the Unix epoch, UTC.
//!
//! Signing and ticker normalization read the current time through the
//! [`Clock`] trait so that tests can pin it with [`FixedClock`]:
//!
//! ```rust
//! use bydfi_core::time::{Clock, FixedClock};
//!
//! let clock = FixedClock::new(1_700_000_000_000);
//! assert_eq!(clock.now_ms(), 1_700_000_000_000);
//! clock.advance(250);
//! assert_eq!(clock.now_ms(), 1_700_000_000_250);
//! ```

use chrono::Utc;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// One day in milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Source of the current time in milliseconds.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now_ms(&self) -> i64 {
        milliseconds()
    }
}

/// A settable clock for deterministic tests.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at `now_ms`.
    pub fn new(now_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(now_ms),
        }
    }

    /// Moves the clock to `now_ms`.
    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Moves the clock forward by `delta_ms`.
    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Returns the current wall-clock time in milliseconds.
#[inline]
pub fn milliseconds() -> i64 {
    Utc::now().timestamp_millis()
}
