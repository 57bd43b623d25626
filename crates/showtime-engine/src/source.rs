//! Collector interfaces and the collect → filter pipeline.
//!
//! The two collectors are independent, so they run concurrently on scoped
//! threads. Filtering starts only once both have returned complete collections;
//! if either fails, nothing is filtered.

use std::thread;

use tracing::{info, warn};

use crate::error::{CollectError, EngineError, Result};
use crate::filter::filter_sessions;
use crate::interval::Interval;
use crate::schedule::Schedule;

/// Produces the cinema schedule (one implementation per site, chosen once).
pub trait SessionSource {
    fn collect_sessions(&self) -> std::result::Result<Schedule, CollectError>;
}

/// Produces the user's busy intervals.
pub trait BusySource {
    fn collect_busy(&self) -> std::result::Result<Vec<Interval>, CollectError>;
}

/// Collect sessions and busy intervals, then return the sessions that are free.
///
/// # Errors
/// `EngineError::Collection` naming the collector that failed. When both fail,
/// the session collector's error is reported.
pub fn find_free_sessions<S, B>(sessions: &S, busy: &B) -> Result<Schedule>
where
    S: SessionSource + Sync + ?Sized,
    B: BusySource + Sync + ?Sized,
{
    let (sessions, busy) = thread::scope(|scope| {
        let busy_handle = scope.spawn(|| busy.collect_busy());
        let sessions = sessions.collect_sessions();
        let busy = busy_handle
            .join()
            .unwrap_or_else(|_| Err("busy collector panicked".into()));
        (sessions, busy)
    });

    let sessions = sessions.map_err(|source| collection_failed("session", source))?;
    let busy = busy.map_err(|source| collection_failed("busy-interval", source))?;

    info!(
        sessions = sessions.session_count(),
        busy = busy.len(),
        "collected schedule and busy intervals"
    );
    Ok(filter_sessions(&sessions, &busy))
}

fn collection_failed(collector: &'static str, source: CollectError) -> EngineError {
    warn!(collector, error = %source, "collector failed; skipping filter");
    EngineError::Collection { collector, source }
}

impl<F> SessionSource for F
where
    F: Fn() -> std::result::Result<Schedule, CollectError>,
{
    fn collect_sessions(&self) -> std::result::Result<Schedule, CollectError> {
        self()
    }
}

/// A fixed, already-materialised busy list.
impl BusySource for [Interval] {
    fn collect_busy(&self) -> std::result::Result<Vec<Interval>, CollectError> {
        Ok(self.to_vec())
    }
}

impl BusySource for Vec<Interval> {
    fn collect_busy(&self) -> std::result::Result<Vec<Interval>, CollectError> {
        Ok(self.clone())
    }
}
