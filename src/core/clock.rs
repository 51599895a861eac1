//! Time source for commits, file timestamps and listings.
//!
//! Commands never read the system time directly. They ask the [`Clock`] they
//! were handed, which lets tests drive the simulator with reproducible ids.
//!
//! # Public API
//! - [`Clock`]: Millisecond time source
//! - [`SystemClock`]: Wall-clock implementation backed by chrono
//! - [`SteppingClock`]: Deterministic clock advancing a fixed step per reading
//! - [`format_log_date`], [`format_listing_date`], [`format_dos_date`]: Renderings used by log, ls and dir

use chrono::{DateTime, Utc};
use std::cell::Cell;

pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that starts at a fixed instant and advances by `step` on every read
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<i64>,
    step: i64,
}

impl SteppingClock {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        // 2024-01-01T00:00:00Z, one second per reading
        Self::new(1_704_067_200_000, 1_000)
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

fn to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// `Mon Jan 1 00:00:00 2024 +0000`, as printed by `git log`
pub fn format_log_date(millis: i64) -> String {
    to_datetime(millis)
        .format("%a %b %-d %H:%M:%S %Y %z")
        .to_string()
}

/// `Jan  1 00:00`, as printed by `ls -l`
pub fn format_listing_date(millis: i64) -> String {
    to_datetime(millis).format("%b %e %H:%M").to_string()
}

/// `01/01/2024  12:00 AM`, as printed by `dir`
pub fn format_dos_date(millis: i64) -> String {
    to_datetime(millis).format("%m/%d/%Y  %I:%M %p").to_string()
}
