//! Time abstraction for expiry deadlines
//!
//! Deadlines are absolute timestamps in milliseconds since the UNIX epoch.
//! [`SystemClock`] reads the wall clock; [`MockClock`] lets tests move time
//! forward explicitly so expiry can be exercised without sleeping.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use lapse_common::clock::{Clock, MockClock};
//!
//! let clock = MockClock::starting_at(1_000);
//! assert_eq!(clock.millis_since_epoch(), 1_000);
//!
//! clock.advance(Duration::from_millis(250));
//! assert_eq!(clock.millis_since_epoch(), 1_250);
//! ```

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current time used to compute and check deadlines
pub trait Clock: Send + Sync {
    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Get milliseconds since UNIX epoch
    ///
    /// Times before the epoch read as `0`.
    fn millis_since_epoch(&self) -> i64 {
        let millis =
            self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        i64::try_from(millis).unwrap_or(i64::MAX)
    }
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient sharing
impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn system_time(&self) -> SystemTime {
        (**self).system_time()
    }

    fn millis_since_epoch(&self) -> i64 {
        (**self).millis_since_epoch()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same underlying time, so a test can hand one clone to an
/// [`ExpiringMap`](crate::expiring::ExpiringMap) and advance another.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    millis: Arc<AtomicI64>,
}

impl MockClock {
    /// Create a mock clock positioned at the UNIX epoch
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock clock positioned at `millis` since the UNIX epoch
    pub fn starting_at(millis: i64) -> Self {
        Self { millis: Arc::new(AtomicI64::new(millis)) }
    }

    /// Advance the mock clock by a duration
    pub fn advance(&self, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.advance_millis_signed(millis);
    }

    /// Advance the mock clock by milliseconds (convenience method)
    pub fn advance_millis(&self, millis: u64) {
        self.advance_millis_signed(i64::try_from(millis).unwrap_or(i64::MAX));
    }

    /// Move the mock clock to an absolute position
    pub fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Current position in milliseconds since the UNIX epoch
    pub fn millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }

    fn advance_millis_signed(&self, delta: i64) {
        // fetch_update never fails with a closure that always returns Some
        let _ = self.millis.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            Some(current.saturating_add(delta))
        });
    }
}

impl Clock for MockClock {
    fn system_time(&self) -> SystemTime {
        let millis = self.millis();
        if millis >= 0 {
            UNIX_EPOCH + Duration::from_millis(millis.unsigned_abs())
        } else {
            UNIX_EPOCH - Duration::from_millis(millis.unsigned_abs())
        }
    }

    fn millis_since_epoch(&self) -> i64 {
        self.millis()
    }
}
