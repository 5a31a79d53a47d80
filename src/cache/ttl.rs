//! TTL Module
//!
//! Time-to-live values accepted by the drivers, normalized to whole seconds.

use std::time::Duration;

use chrono::TimeDelta;

// == Ttl ==
/// A time-to-live in whole seconds.
///
/// Can be built from raw seconds, a [`std::time::Duration`] or a
/// [`chrono::TimeDelta`]. Zero or negative values yield entries that are
/// already expired when written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ttl(i64);

impl Ttl {
    /// Creates a TTL of `secs` seconds.
    pub const fn secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the TTL in seconds.
    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Self::from(duration.as_secs())
    }
}

impl From<TimeDelta> for Ttl {
    fn from(delta: TimeDelta) -> Self {
        Self(delta.num_seconds())
    }
}
