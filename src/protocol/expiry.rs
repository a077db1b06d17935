//! Expiration normalization
//!
//! The protocol sends expirations as a single u32 that is either a relative
//! offset in seconds or an absolute Unix timestamp, depending on its size.

use std::time::{SystemTime, UNIX_EPOCH};

/// Offsets below this many seconds are relative to "now"
pub const THIRTY_DAYS: u32 = 60 * 60 * 24 * 30;

/// Resolve a raw wire expiration into an absolute Unix time (0 = never)
///
/// `raw == THIRTY_DAYS` is already absolute.
pub fn normalize(raw: u32, now: u64) -> u64 {
    if raw != 0 && raw < THIRTY_DAYS {
        now.saturating_add(u64::from(raw))
    } else {
        u64::from(raw)
    }
}

/// Source of the current Unix time in seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// A clock stuck at one instant (tests, capture replay)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}
