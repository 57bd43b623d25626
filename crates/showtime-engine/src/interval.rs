//! Instants, intervals and the overlap predicate.
//!
//! Overlap is strict: two intervals that merely touch (one ends exactly when the
//! other starts) do NOT overlap. A film starting the minute a meeting ends is free.

use std::fmt;

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::error::{EngineError, Result};

/// A point in time with minute resolution.
///
/// Busy intervals and sessions are both normalised into this one type, so
/// every comparison in the filter is between like representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Wrap a UTC datetime, truncating seconds and sub-second precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let dt = dt
            - Duration::seconds(i64::from(dt.second()))
            - Duration::nanoseconds(i64::from(dt.nanosecond()));
        Self(dt)
    }

    /// Wrap a UTC datetime, rounding any seconds up to the next whole minute.
    ///
    /// Used for the end of a busy interval so that it still covers the minute
    /// in which it finishes.
    pub fn from_utc_ceil(dt: DateTime<Utc>) -> Self {
        let floor = Self::from_utc(dt);
        if floor.0 == dt {
            floor
        } else {
            floor.plus_minutes(1)
        }
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// Shift forward by a whole number of minutes.
    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0 + Duration::minutes(i64::from(minutes)))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%MZ"))
    }
}

/// A half-open span of time `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Build an interval, rejecting empty or inverted spans.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` when `start >= end`.
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn end(&self) -> Instant {
        self.end
    }

    /// Length of the interval in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end.0 - self.start.0).num_minutes()
    }

    /// True iff the two intervals share at least one minute.
    ///
    /// Symmetric. Adjacent intervals (`self.end == other.start`) do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        overlaps(self, other)
    }
}

/// Does `busy` overlap `session`?
///
/// `busy.start < session.end && busy.end > session.start`. This excludes the
/// adjacent case where `busy.end == session.start` or `session.end == busy.start`.
pub fn overlaps(busy: &Interval, session: &Interval) -> bool {
    busy.start < session.end && busy.end > session.start
}
