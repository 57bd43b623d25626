//! Build a [`Schedule`] from scraped showings.
//!
//! A cinema listing gives a start time per session and a running time per film.
//! Running times are looked up once per title per run via [`DurationCache`].

use std::collections::HashMap;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::{EngineError, Result};
use crate::interval::Interval;
use crate::normalize::{local_instant, parse_clock_time, parse_compact_date, parse_running_time};
use crate::schedule::Schedule;

/// Film running times in minutes, keyed by title, scoped to one scrape run.
#[derive(Debug, Clone, Default)]
pub struct DurationCache {
    minutes: HashMap<String, u32>,
}

impl DurationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, title: &str) -> Option<u32> {
        self.minutes.get(title).copied()
    }

    pub fn insert(&mut self, title: impl Into<String>, minutes: u32) {
        self.minutes.insert(title.into(), minutes);
    }

    /// Return the cached running time, or run `lookup` and remember its result.
    ///
    /// A failed lookup is not cached.
    pub fn get_or_try_insert_with<F>(&mut self, title: &str, lookup: F) -> Result<u32>
    where
        F: FnOnce() -> Result<u32>,
    {
        if let Some(minutes) = self.get(title) {
            return Ok(minutes);
        }
        let minutes = lookup()?;
        self.insert(title, minutes);
        Ok(minutes)
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

/// One film's sessions on one day, as scraped.
#[derive(Debug, Clone, Deserialize)]
pub struct Showing {
    /// `DDMMYYYY`.
    pub date: String,
    pub title: String,
    /// `HH:MM` start times in listing order.
    pub starts: Vec<String>,
    /// `H:MM` running time; may be omitted when an earlier showing of the same
    /// title already supplied it.
    #[serde(default)]
    pub duration: Option<String>,
}

/// Accumulates showings into a schedule in the order they are added.
pub struct ScheduleBuilder<'a> {
    tz: Tz,
    durations: &'a mut DurationCache,
    schedule: Schedule,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(tz: Tz, durations: &'a mut DurationCache) -> Self {
        Self {
            tz,
            durations,
            schedule: Schedule::new(),
        }
    }

    /// Add every session of `showing`; each ends one running time after it starts.
    ///
    /// A showing with no start times adds nothing and needs no running time.
    ///
    /// # Errors
    /// `MalformedTimeValue` for a bad date, start time or running time,
    /// `UnknownDuration` when no running time is known for the title,
    /// `InvalidInterval` for a zero running time.
    pub fn add_showing(&mut self, showing: &Showing) -> Result<()> {
        let date = parse_compact_date(&showing.date)?;
        if showing.starts.is_empty() {
            return Ok(());
        }
        let title = showing.title.trim();
        let minutes = self.durations.get_or_try_insert_with(title, || {
            match showing.duration.as_deref() {
                Some(text) => parse_running_time(text),
                None => Err(EngineError::UnknownDuration(title.to_string())),
            }
        })?;

        let sessions = showing
            .starts
            .iter()
            .map(|text| {
                let start = local_instant(date, parse_clock_time(text)?, self.tz)?;
                Interval::new(start, start.plus_minutes(minutes))
            })
            .collect::<Result<Vec<_>>>()?;

        self.schedule.insert_sessions(date, title, sessions);
        Ok(())
    }

    pub fn build(self) -> Schedule {
        self.schedule
    }
}

/// Assemble a schedule from a list of showings with a fresh duration cache.
pub fn assemble_schedule(showings: &[Showing], tz: Tz) -> Result<Schedule> {
    let mut durations = DurationCache::new();
    let mut builder = ScheduleBuilder::new(tz, &mut durations);
    for showing in showings {
        builder.add_showing(showing)?;
    }
    Ok(builder.build())
}
