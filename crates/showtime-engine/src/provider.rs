//! Reduce calendar-provider events to busy intervals.
//!
//! Understands the event shape of the Google Calendar v3 `events.list` response.
//! Either the full `{"items": [...]}` envelope or a bare array of events is accepted.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::interval::{Instant, Interval};
use crate::normalize::{local_midnight, parse_provider_date, parse_provider_datetime};

/// One calendar event as returned by the provider. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    /// `confirmed`, `tentative` or `cancelled`.
    #[serde(default)]
    pub status: Option<String>,
    /// `opaque` (default) or `transparent`; transparent events do not block time.
    #[serde(default)]
    pub transparency: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

/// Start or end of an event: `dateTime` for timed events, `date` for all-day ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<ProviderEvent>),
    Envelope { items: Vec<ProviderEvent> },
}

impl EventTime {
    /// All-day dates are taken as local midnight in `tz`.
    fn to_datetime(&self, tz: Tz) -> Result<DateTime<Utc>> {
        match (&self.date_time, &self.date) {
            (Some(date_time), _) => parse_provider_datetime(date_time),
            (None, Some(date)) => {
                local_midnight(parse_provider_date(date)?, tz).map(|midnight| midnight.as_utc())
            }
            (None, None) => Err(EngineError::malformed(
                "",
                "an event time with dateTime or date",
            )),
        }
    }
}

impl ProviderEvent {
    /// Cancelled and transparent events leave the calendar free.
    pub fn blocks_time(&self) -> bool {
        self.status.as_deref() != Some("cancelled")
            && self.transparency.as_deref() != Some("transparent")
    }

    /// The span this event occupies, widened to every minute it touches.
    ///
    /// # Errors
    /// `MalformedTimeValue` for unparseable times, `InvalidInterval` when the
    /// event does not end after it starts.
    pub fn to_interval(&self, tz: Tz) -> Result<Interval> {
        let start = self.start.to_datetime(tz)?;
        let end = self.end.to_datetime(tz)?;
        if start >= end {
            return Err(EngineError::InvalidInterval {
                start: Instant::from_utc(start),
                end: Instant::from_utc(end),
            });
        }
        Interval::new(Instant::from_utc(start), Instant::from_utc_ceil(end))
    }
}

/// Parse a provider events document (envelope or bare array).
pub fn parse_events_json(json: &str) -> Result<Vec<ProviderEvent>> {
    let doc: EventsDocument = serde_json::from_str(json)?;
    Ok(match doc {
        EventsDocument::List(events) => events,
        EventsDocument::Envelope { items } => items,
    })
}

/// Busy intervals for every event that blocks time.
pub fn busy_intervals(events: &[ProviderEvent], tz: Tz) -> Result<Vec<Interval>> {
    events
        .iter()
        .filter(|event| {
            let blocks = event.blocks_time();
            if !blocks {
                debug!(id = event.id.as_deref().unwrap_or("-"), "skipping non-blocking event");
            }
            blocks
        })
        .map(|event| event.to_interval(tz))
        .collect()
}
