//! The two-level session collection: date → film title → ordered sessions.
//!
//! Insertion order is preserved at both levels (`IndexMap`), so a schedule read
//! from JSON is written back with dates and titles in the order they arrived.

use chrono::NaiveDate;
use chrono_tz::Tz;
use indexmap::IndexMap;

use crate::error::Result;
use crate::interval::Interval;
use crate::normalize::{
    format_date_key, format_local_timestamp, parse_date_key, parse_local_timestamp,
};

/// Sessions of each film on one day, keyed by title.
pub type TitleMap = IndexMap<String, Vec<Interval>>;

/// Wire form of a schedule:
/// `{"DD.MM.YYYY": {"Title": [["DD.MM.YYYY HH:MM", "DD.MM.YYYY HH:MM"]]}}`.
pub type RawSchedule = IndexMap<String, IndexMap<String, Vec<(String, String)>>>;

/// Film sessions grouped by calendar date, then by title.
///
/// Never holds an empty session list or a date with no titles: empty wire-form
/// entries are dropped on the way in.
///
/// Note that `PartialEq` on the underlying maps ignores ordering; compare
/// iteration order explicitly when order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: IndexMap<NaiveDate, TitleMap>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append sessions under `(date, title)`, creating either level as needed.
    ///
    /// Inserting no sessions leaves the schedule untouched.
    pub fn insert_sessions<I>(&mut self, date: NaiveDate, title: impl Into<String>, sessions: I)
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut sessions = sessions.into_iter().peekable();
        if sessions.peek().is_none() {
            return;
        }
        self.days
            .entry(date)
            .or_default()
            .entry(title.into())
            .or_default()
            .extend(sessions);
    }

    /// Attach a whole title map under `date`, replacing any previous entry.
    pub(crate) fn insert_day(&mut self, date: NaiveDate, titles: TitleMap) {
        self.days.insert(date, titles);
    }

    pub fn days(&self) -> impl Iterator<Item = (&NaiveDate, &TitleMap)> {
        self.days.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.days.keys()
    }

    pub fn titles(&self, date: NaiveDate) -> Option<&TitleMap> {
        self.days.get(&date)
    }

    pub fn sessions(&self, date: NaiveDate, title: &str) -> Option<&[Interval]> {
        self.days
            .get(&date)
            .and_then(|titles| titles.get(title))
            .map(Vec::as_slice)
    }

    /// Latest calendar date present in the schedule.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().max().copied()
    }

    /// Total number of sessions across all dates and titles.
    pub fn session_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|titles| titles.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Normalise a wire-form schedule whose timestamps are wall-clock times in `tz`.
    ///
    /// # Errors
    /// `MalformedTimeValue` for an unparseable date key or timestamp,
    /// `InvalidInterval` for a session that does not end after it starts.
    pub fn from_raw(raw: &RawSchedule, tz: Tz) -> Result<Self> {
        let mut schedule = Self::new();
        for (date_key, films) in raw {
            let date = parse_date_key(date_key)?;
            for (title, pairs) in films {
                let sessions = pairs
                    .iter()
                    .map(|(start, end)| {
                        Interval::new(
                            parse_local_timestamp(start, tz)?,
                            parse_local_timestamp(end, tz)?,
                        )
                    })
                    .collect::<Result<Vec<_>>>()?;
                schedule.insert_sessions(date, title.as_str(), sessions);
            }
        }
        Ok(schedule)
    }

    /// Render back to the wire form with timestamps in `tz`.
    pub fn to_raw(&self, tz: Tz) -> RawSchedule {
        self.days
            .iter()
            .map(|(date, titles)| {
                let films = titles
                    .iter()
                    .map(|(title, sessions)| {
                        let pairs = sessions
                            .iter()
                            .map(|s| {
                                (
                                    format_local_timestamp(s.start(), tz),
                                    format_local_timestamp(s.end(), tz),
                                )
                            })
                            .collect();
                        (title.clone(), pairs)
                    })
                    .collect();
                (format_date_key(*date), films)
            })
            .collect()
    }

    /// Parse a wire-form JSON document.
    pub fn from_json(json: &str, tz: Tz) -> Result<Self> {
        let raw: RawSchedule = serde_json::from_str(json)?;
        Self::from_raw(&raw, tz)
    }

    /// Serialise to pretty-printed wire-form JSON.
    pub fn to_json_pretty(&self, tz: Tz) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_raw(tz))?)
    }
}
