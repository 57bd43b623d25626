//! File-backed collectors.
//!
//! Stand-ins for the live scraper and calendar client: each reads the JSON such
//! a collaborator would have produced, from a path or from stdin (`-`).

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use showtime_engine::{
    busy_intervals, parse_events_json, BusySource, CollectError, Interval, Schedule, SessionSource,
};
use tracing::debug;

/// Sessions JSON in the `date → title → [[start, end]]` wire form.
pub struct SessionsFile {
    path: String,
    tz: Tz,
}

impl SessionsFile {
    pub fn new(path: String, tz: Tz) -> Self {
        Self { path, tz }
    }

    pub fn load(&self) -> Result<Schedule> {
        let json = read_input(&self.path)?;
        let schedule = Schedule::from_json(&json, self.tz)
            .with_context(|| format!("Invalid sessions in {}", self.path))?;
        debug!(path = %self.path, sessions = schedule.session_count(), "loaded sessions");
        Ok(schedule)
    }
}

impl SessionSource for SessionsFile {
    fn collect_sessions(&self) -> std::result::Result<Schedule, CollectError> {
        Ok(self.load()?)
    }
}

/// Calendar provider `events.list` response (or a bare array of its items).
pub struct EventsFile {
    path: String,
    tz: Tz,
}

impl EventsFile {
    pub fn new(path: String, tz: Tz) -> Self {
        Self { path, tz }
    }

    pub fn load(&self) -> Result<Vec<Interval>> {
        let json = read_input(&self.path)?;
        let events = parse_events_json(&json)
            .with_context(|| format!("Invalid calendar events in {}", self.path))?;
        let busy = busy_intervals(&events, self.tz)
            .with_context(|| format!("Unusable calendar event in {}", self.path))?;
        debug!(path = %self.path, events = events.len(), busy = busy.len(), "loaded busy intervals");
        Ok(busy)
    }
}

impl BusySource for EventsFile {
    fn collect_busy(&self) -> std::result::Result<Vec<Interval>, CollectError> {
        Ok(self.load()?)
    }
}

/// Read a whole input, from stdin when `path` is `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
    }
}
