//! Instant normalisation -- the one place where upstream time text is validated.
//!
//! Sessions arrive as wall-clock strings in the cinema's zone (`DD.MM.YYYY HH:MM`),
//! busy intervals as RFC 3339 provider timestamps. Both end up as [`Instant`]s.
//! Anything that does not parse is rejected with `MalformedTimeValue`; nothing is
//! silently mapped to epoch zero.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};
use crate::interval::Instant;

/// Wall-clock timestamp format used by the session wire form.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Calendar-day key format.
pub const DATE_KEY_FORMAT: &str = "%d.%m.%Y";

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a `DD.MM.YYYY HH:MM` wall-clock timestamp in zone `tz`.
///
/// Times repeated by a DST fall-back resolve to the earlier instant. Times that
/// do not exist (DST spring-forward gap) are rejected.
///
/// # Errors
/// Returns `EngineError::MalformedTimeValue` on any parse failure.
pub fn parse_local_timestamp(text: &str, tz: Tz) -> Result<Instant> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), LOCAL_TIMESTAMP_FORMAT)
        .map_err(|_| EngineError::malformed(text, "DD.MM.YYYY HH:MM"))?;
    localize(naive, tz).ok_or_else(|| {
        EngineError::malformed(text, "a wall-clock time that exists in the configured zone")
    })
}

/// Parse an RFC 3339 timestamp with offset, as calendar providers emit them.
///
/// # Errors
/// Returns `EngineError::MalformedTimeValue` when the text is not RFC 3339.
pub fn parse_provider_timestamp(text: &str) -> Result<Instant> {
    parse_provider_datetime(text).map(Instant::from_utc)
}

/// Parse an RFC 3339 timestamp at full precision.
pub fn parse_provider_datetime(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| EngineError::malformed(text, "an RFC 3339 timestamp"))
}

/// Parse an all-day `YYYY-MM-DD` provider date.
pub fn parse_provider_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::malformed(text, "YYYY-MM-DD"))
}

/// Parse a `DD.MM.YYYY` date key.
pub fn parse_date_key(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_KEY_FORMAT)
        .map_err(|_| EngineError::malformed(text, "DD.MM.YYYY"))
}

/// Parse a compact `DDMMYYYY` date, the form the cinema page carries in its
/// `data-date` attributes.
pub fn parse_compact_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let malformed = || EngineError::malformed(text, "DDMMYYYY");
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let day = trimmed[0..2].parse().map_err(|_| malformed())?;
    let month = trimmed[2..4].parse().map_err(|_| malformed())?;
    let year = trimmed[4..8].parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Parse an `HH:MM` session start time.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .map_err(|_| EngineError::malformed(text, "HH:MM"))
}

/// Parse a film running time such as `2:15` or `01:40` into minutes.
pub fn parse_running_time(text: &str) -> Result<u32> {
    let malformed = || EngineError::malformed(text, "H:MM running time");
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(malformed)?;
    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
    if minutes >= 60 {
        return Err(malformed());
    }
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(malformed)
}

/// The instant at which `date` begins in zone `tz`.
///
/// Where a DST change skips midnight (America/Santiago, Asia/Beirut, ...) the
/// day begins at the first wall-clock minute after the gap.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> Result<Instant> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..MINUTES_PER_DAY)
        .map(|minute| midnight + Duration::minutes(minute))
        .find_map(|naive| localize(naive, tz))
        .ok_or_else(|| {
            EngineError::malformed(
                &format_date_key(date),
                "a date that exists in the configured zone",
            )
        })
}

/// The instant at which wall-clock `time` on `date` occurs in zone `tz`.
pub fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<Instant> {
    let naive = date.and_time(time);
    localize(naive, tz).ok_or_else(|| {
        EngineError::malformed(
            &naive.format(LOCAL_TIMESTAMP_FORMAT).to_string(),
            "a wall-clock time that exists in the configured zone",
        )
    })
}

/// Render an instant as `DD.MM.YYYY HH:MM` in zone `tz`.
pub fn format_local_timestamp(instant: Instant, tz: Tz) -> String {
    instant
        .as_utc()
        .with_timezone(&tz)
        .format(LOCAL_TIMESTAMP_FORMAT)
        .to_string()
}

pub fn format_date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<Instant> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| Instant::from_utc(dt.with_timezone(&Utc)))
}
