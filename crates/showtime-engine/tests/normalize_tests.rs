//! Tests for the time-text normalisation boundary.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::Santiago;
use chrono_tz::Europe::Kyiv;
use chrono_tz::UTC;
use showtime_engine::error::EngineError;
use showtime_engine::normalize::{
    format_date_key, format_local_timestamp, local_midnight, parse_clock_time,
    parse_compact_date, parse_date_key, parse_local_timestamp, parse_provider_date,
    parse_provider_timestamp, parse_running_time,
};
use showtime_engine::Instant;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Instant {
    Instant::from_utc(Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
}

fn assert_malformed<T: std::fmt::Debug>(result: Result<T, EngineError>) {
    assert!(
        matches!(result, Err(EngineError::MalformedTimeValue { .. })),
        "expected MalformedTimeValue, got {result:?}"
    );
}

// ── Local wall-clock timestamps ─────────────────────────────────────────────

#[test]
fn local_timestamp_in_kyiv_summer_time() {
    // October 17th 2024 is still EEST (UTC+3).
    let instant = parse_local_timestamp("17.10.2024 13:30", Kyiv).unwrap();
    assert_eq!(instant, utc(2024, 10, 17, 10, 30));
}

#[test]
fn local_timestamp_in_kyiv_winter_time() {
    // November 13th 2024 is EET (UTC+2).
    let instant = parse_local_timestamp("13.11.2024 10:00", Kyiv).unwrap();
    assert_eq!(instant, utc(2024, 11, 13, 8, 0));
}

#[test]
fn local_timestamp_tolerates_surrounding_whitespace() {
    let instant = parse_local_timestamp("  17.10.2024 13:30\n", UTC).unwrap();
    assert_eq!(instant, utc(2024, 10, 17, 13, 30));
}

#[test]
fn local_timestamp_rejects_other_formats() {
    assert_malformed(parse_local_timestamp("2024-10-17T13:30:00+03:00", Kyiv));
    assert_malformed(parse_local_timestamp("13:30", Kyiv));
    assert_malformed(parse_local_timestamp("", Kyiv));
    assert_malformed(parse_local_timestamp("32.10.2024 13:30", Kyiv));
    assert_malformed(parse_local_timestamp("17.10.2024 25:00", Kyiv));
}

#[test]
fn local_timestamp_in_dst_gap_is_rejected() {
    // Clocks in Kyiv jumped from 03:00 to 04:00 on 31 March 2024.
    assert_malformed(parse_local_timestamp("31.03.2024 03:30", Kyiv));
}

#[test]
fn local_timestamp_in_dst_fold_takes_earlier_instant() {
    // 03:30 happened twice on 27 October 2024; the first was still UTC+3.
    let instant = parse_local_timestamp("27.10.2024 03:30", Kyiv).unwrap();
    assert_eq!(instant, utc(2024, 10, 27, 0, 30));
}

#[test]
fn malformed_error_carries_value_and_expectation() {
    let err = parse_local_timestamp("soon", Kyiv).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("soon"), "got: {msg}");
    assert!(msg.contains("DD.MM.YYYY HH:MM"), "got: {msg}");
}

// ── Provider timestamps ─────────────────────────────────────────────────────

#[test]
fn provider_timestamp_with_offset() {
    let instant = parse_provider_timestamp("2024-10-18T09:00:00+03:00").unwrap();
    assert_eq!(instant, utc(2024, 10, 18, 6, 0));
}

#[test]
fn provider_timestamp_zulu_with_fraction_truncates_to_minute() {
    let instant = parse_provider_timestamp("2024-10-18T09:00:59.999Z").unwrap();
    assert_eq!(instant, utc(2024, 10, 18, 9, 0));
}

#[test]
fn provider_timestamp_without_offset_is_rejected() {
    assert_malformed(parse_provider_timestamp("2024-10-18T09:00:00"));
    assert_malformed(parse_provider_timestamp("18.10.2024 09:00"));
    assert_malformed(parse_provider_timestamp("NaN"));
}

#[test]
fn local_and_provider_forms_agree_on_the_same_moment() {
    let session = parse_local_timestamp("18.10.2024 09:00", Kyiv).unwrap();
    let busy = parse_provider_timestamp("2024-10-18T09:00:00+03:00").unwrap();
    assert_eq!(session, busy);
}

// ── Dates, clock times, running times ───────────────────────────────────────

#[test]
fn date_keys() {
    let d = NaiveDate::from_ymd_opt(2024, 10, 17).unwrap();
    assert_eq!(parse_date_key("17.10.2024").unwrap(), d);
    assert_eq!(format_date_key(d), "17.10.2024");
    assert_malformed(parse_date_key("2024-10-17"));
}

#[test]
fn compact_dates() {
    let d = NaiveDate::from_ymd_opt(2024, 10, 17).unwrap();
    assert_eq!(parse_compact_date("17102024").unwrap(), d);
    assert_malformed(parse_compact_date("1710202"));
    assert_malformed(parse_compact_date("17.10.24"));
    assert_malformed(parse_compact_date("31022024"));
}

#[test]
fn provider_dates() {
    let d = NaiveDate::from_ymd_opt(2024, 10, 17).unwrap();
    assert_eq!(parse_provider_date("2024-10-17").unwrap(), d);
    assert_malformed(parse_provider_date("17.10.2024"));
}

#[test]
fn clock_times() {
    assert_eq!(
        parse_clock_time("09:05").unwrap(),
        NaiveTime::from_hms_opt(9, 5, 0).unwrap()
    );
    assert_malformed(parse_clock_time("9h05"));
    assert_malformed(parse_clock_time("24:00"));
}

#[test]
fn running_times() {
    assert_eq!(parse_running_time("2:35").unwrap(), 155);
    assert_eq!(parse_running_time("01:40").unwrap(), 100);
    assert_eq!(parse_running_time("0:00").unwrap(), 0);
    assert_malformed(parse_running_time(""));
    assert_malformed(parse_running_time("155"));
    assert_malformed(parse_running_time("2:75"));
    assert_malformed(parse_running_time("two:ten"));
}

// ── Output direction ────────────────────────────────────────────────────────

#[test]
fn format_local_timestamp_renders_in_zone() {
    assert_eq!(
        format_local_timestamp(utc(2024, 10, 17, 10, 30), Kyiv),
        "17.10.2024 13:30"
    );
}

#[test]
fn local_midnight_in_kyiv() {
    let d = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
    assert_eq!(local_midnight(d, Kyiv).unwrap(), utc(2024, 10, 18, 21, 0));
}

#[test]
fn local_midnight_skipped_by_dst_starts_after_the_gap() {
    // Santiago moved from 00:00 -04 straight to 01:00 -03 on 8 September 2024.
    let d = NaiveDate::from_ymd_opt(2024, 9, 8).unwrap();
    assert_eq!(local_midnight(d, Santiago).unwrap(), utc(2024, 9, 8, 4, 0));

    let day_before = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
    assert_eq!(local_midnight(day_before, Santiago).unwrap(), utc(2024, 9, 7, 4, 0));
}
