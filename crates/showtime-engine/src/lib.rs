//! # showtime-engine
//!
//! Find the cinema sessions that fit around a calendar.
//!
//! Given a scraped schedule (date → film title → sessions) and a list of busy
//! intervals from a calendar provider, the engine keeps exactly the sessions
//! that overlap no busy interval. Overlap is strict: a session starting the
//! minute a meeting ends is free.
//!
//! ## Modules
//!
//! - [`interval`] — `Instant`, `Interval` and the overlap predicate
//! - [`normalize`] — upstream time text → `Instant`, and back for output
//! - [`schedule`] — the ordered date → title → sessions collection and its JSON form
//! - [`filter`] — drop sessions that conflict with busy intervals
//! - [`provider`] — calendar-provider events → busy intervals
//! - [`window`] — the provider query range for a schedule
//! - [`assemble`] — scraped showings + running times → schedule
//! - [`source`] — collector traits and the collect → filter pipeline
//! - [`error`] — Error types

pub mod assemble;
pub mod error;
pub mod filter;
pub mod interval;
pub mod normalize;
pub mod provider;
pub mod schedule;
pub mod source;
pub mod window;

pub use assemble::{assemble_schedule, DurationCache, ScheduleBuilder, Showing};
pub use error::{CollectError, EngineError};
pub use filter::{filter_sessions, is_free};
pub use interval::{overlaps, Instant, Interval};
pub use provider::{busy_intervals, parse_events_json, ProviderEvent};
pub use schedule::{RawSchedule, Schedule};
pub use source::{find_free_sessions, BusySource, SessionSource};
pub use window::QueryWindow;
