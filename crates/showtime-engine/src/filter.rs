//! Drop film sessions that clash with busy intervals.
//!
//! A session survives iff no busy interval overlaps it (see
//! [`overlaps`](crate::interval::overlaps)). Dates and titles keep their input
//! order; a title left with no sessions is omitted, and so is a date left with
//! no titles.

use tracing::debug;

use crate::interval::{overlaps, Interval};
use crate::schedule::{Schedule, TitleMap};

/// Is `session` clear of every busy interval?
///
/// Stops at the first conflict. Cost is O(busy.len()).
pub fn is_free(session: &Interval, busy: &[Interval]) -> bool {
    !busy.iter().any(|b| overlaps(b, session))
}

/// Keep only the sessions that do not conflict with any busy interval.
///
/// The result has the same date → title → sessions shape as the input, never
/// contains an empty session list, and never contains a date with no titles.
/// An empty `busy` slice keeps every session.
pub fn filter_sessions(sessions: &Schedule, busy: &[Interval]) -> Schedule {
    let mut filtered = Schedule::new();

    for (date, titles) in sessions.days() {
        let kept: TitleMap = titles
            .iter()
            .filter_map(|(title, slots)| {
                let free: Vec<Interval> = slots
                    .iter()
                    .filter(|s| is_free(s, busy))
                    .copied()
                    .collect();
                (!free.is_empty()).then(|| (title.clone(), free))
            })
            .collect();

        if !kept.is_empty() {
            filtered.insert_day(*date, kept);
        }
    }

    let total = sessions.session_count();
    let kept = filtered.session_count();
    debug!(
        total,
        kept,
        dropped = total - kept,
        busy = busy.len(),
        "filtered sessions against busy intervals"
    );

    filtered
}
