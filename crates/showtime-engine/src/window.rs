//! The time range to request busy intervals for.
//!
//! Runs from "now" to the end of the last scraped date (the following local
//! midnight), so every listed session is covered and nothing earlier is fetched.

use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::interval::Instant;
use crate::normalize::local_midnight;
use crate::schedule::Schedule;

/// Provider query range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: Instant,
    pub end: Instant,
}

impl QueryWindow {
    /// Window covering `schedule` from `now` onward.
    ///
    /// Returns `Ok(None)` when the schedule is empty or its last date has
    /// already ended by `now`.
    pub fn for_schedule(schedule: &Schedule, now: DateTime<Utc>, tz: Tz) -> Result<Option<Self>> {
        let Some(next_day) = schedule.last_date().and_then(|d| d.succ_opt()) else {
            return Ok(None);
        };
        let start = Instant::from_utc(now);
        let end = local_midnight(next_day, tz)?;
        Ok((start < end).then_some(Self { start, end }))
    }

    /// `timeMin` parameter for the provider query.
    pub fn time_min(&self) -> String {
        self.start.as_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `timeMax` parameter for the provider query.
    pub fn time_max(&self) -> String {
        self.end.as_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
