//! Property-based tests for the session filter using proptest.
//!
//! These check algebraic properties that must hold for *any* schedule and busy
//! list, not just the hand-picked cases in `filter_tests.rs`.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use showtime_engine::{filter_sessions, overlaps, Instant, Interval, Schedule};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// An interval starting within a 4-day span (minute offset) lasting 15-240 minutes.
fn arb_interval() -> impl Strategy<Value = Interval> {
    (0i64..4 * 24 * 60, 15i64..=240).prop_map(|(offset, len)| {
        let base = Utc.with_ymd_and_hms(2024, 10, 17, 0, 0, 0).unwrap();
        let start = Instant::from_utc(base + Duration::minutes(offset));
        let end = Instant::from_utc(base + Duration::minutes(offset + len));
        Interval::new(start, end).unwrap()
    })
}

fn arb_busy() -> impl Strategy<Value = Vec<Interval>> {
    prop::collection::vec(arb_interval(), 0..12)
}

/// Up to 4 dates × 3 titles × 6 sessions.
fn arb_schedule() -> impl Strategy<Value = Schedule> {
    prop::collection::vec(
        (0u32..4, 0usize..3, prop::collection::vec(arb_interval(), 0..6)),
        0..10,
    )
    .prop_map(|entries| {
        let titles = ["Gladiator", "Joker", "Dune"];
        let mut schedule = Schedule::new();
        for (day, title, sessions) in entries {
            let date = NaiveDate::from_ymd_opt(2024, 10, 17 + day).unwrap();
            schedule.insert_sessions(date, titles[title], sessions);
        }
        schedule
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Flatten a schedule into (date, title, session) triples in iteration order.
fn flatten(schedule: &Schedule) -> Vec<(NaiveDate, String, Interval)> {
    schedule
        .days()
        .flat_map(|(date, titles)| {
            titles.iter().flat_map(move |(title, sessions)| {
                sessions.iter().map(move |s| (*date, title.clone(), *s))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn filtering_is_idempotent(schedule in arb_schedule(), busy in arb_busy()) {
        let once = filter_sessions(&schedule, &busy);
        let twice = filter_sessions(&once, &busy);
        prop_assert_eq!(flatten(&once), flatten(&twice));
    }

    #[test]
    fn adding_busy_never_increases_survivors(
        schedule in arb_schedule(),
        busy in arb_busy(),
        extra in arb_interval(),
    ) {
        let before = filter_sessions(&schedule, &busy).session_count();
        let mut more = busy.clone();
        more.push(extra);
        let after = filter_sessions(&schedule, &more).session_count();
        prop_assert!(after <= before);
    }

    #[test]
    fn survivors_conflict_with_nothing(schedule in arb_schedule(), busy in arb_busy()) {
        for (_, _, session) in flatten(&filter_sessions(&schedule, &busy)) {
            prop_assert!(busy.iter().all(|b| !overlaps(b, &session)));
        }
    }

    #[test]
    fn dropped_sessions_conflict_with_something(schedule in arb_schedule(), busy in arb_busy()) {
        let kept = flatten(&filter_sessions(&schedule, &busy));
        for entry in flatten(&schedule) {
            if !kept.contains(&entry) {
                prop_assert!(busy.iter().any(|b| overlaps(b, &entry.2)));
            }
        }
    }

    #[test]
    fn result_is_an_ordered_subsequence_of_input(schedule in arb_schedule(), busy in arb_busy()) {
        let all = flatten(&schedule);
        let kept = flatten(&filter_sessions(&schedule, &busy));
        let mut remaining = all.iter();
        for entry in &kept {
            prop_assert!(remaining.any(|e| e == entry), "out of order or invented: {:?}", entry);
        }
    }

    #[test]
    fn result_has_no_empty_levels(schedule in arb_schedule(), busy in arb_busy()) {
        let filtered = filter_sessions(&schedule, &busy);
        for (_, titles) in filtered.days() {
            prop_assert!(!titles.is_empty());
            for sessions in titles.values() {
                prop_assert!(!sessions.is_empty());
            }
        }
    }

    #[test]
    fn empty_busy_keeps_every_session(schedule in arb_schedule()) {
        let filtered = filter_sessions(&schedule, &[]);
        prop_assert_eq!(flatten(&filtered), flatten(&schedule));
    }
}
