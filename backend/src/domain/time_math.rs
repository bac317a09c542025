//! Wall-clock arithmetic shared by the wake-window calculator, the midnight
//! splitter and the record builders.
//!
//! Activity records carry dates and clock times as strings entered by a
//! caregiver. Everything in here parses them once into chrono values and does
//! all comparisons on those, so `"9:05"` and `"09:05"` order the same way.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use shared::DurationFormat;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Last representable minute of a day, used as the end of pre-midnight fragments
pub const LAST_MINUTE_OF_DAY: &str = "23:59";

/// First minute of a day, used as the start of post-midnight fragments
pub const FIRST_MINUTE_OF_DAY: &str = "00:00";

/// Whole minutes between two instants, after the next-day rollover rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    pub minutes: i64,
    /// True when the end had to be moved to the following day
    pub rolled_over: bool,
}

/// Parse a `H:MM` or `HH:MM` clock time. Empty or malformed input yields `None`.
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").ok()
}

/// Parse an optional clock time field, treating blank strings as absent
pub fn parse_optional_time(value: Option<&str>) -> Option<NaiveTime> {
    value.and_then(parse_clock_time)
}

/// Parse an ISO `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Render a clock time zero-padded as `HH:MM`
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Combine a calendar date and a clock time into a single comparable instant
pub fn to_instant(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Minutes from `start` to `end`. If `end` is not strictly after `start` it is
/// moved one calendar day forward before differencing.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> Elapsed {
    if end > start {
        Elapsed {
            minutes: (end - start).num_minutes(),
            rolled_over: false,
        }
    } else {
        let end = end + Duration::days(1);
        Elapsed {
            minutes: (end - start).num_minutes(),
            rolled_over: true,
        }
    }
}

/// Length of a single session given only its clock times. An end earlier
/// than the start belongs to the next day; identical times are zero minutes.
pub fn session_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    if start == end {
        return 0;
    }
    let day = NaiveDate::default();
    minutes_between(to_instant(day, start), to_instant(day, end)).minutes
}

/// Compact elapsed time: `"2시간 30분"`, `"3시간"`, `"45분"`.
/// The hour part is dropped when zero, the minute part when zero.
pub fn format_elapsed(minutes: i64, format: &DurationFormat) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours == 0 {
        format!("{}{}", rest, format.minute_unit)
    } else if rest == 0 {
        format!("{}{}", hours, format.hour_unit)
    } else {
        format!("{}{} {}{}", hours, format.hour_unit, rest, format.minute_unit)
    }
}

/// Sleep duration as stored on a record when it is logged, always with both parts
pub fn format_session_duration(minutes: i64, format: &DurationFormat) -> String {
    format!(
        "{}{} {}{}",
        minutes / 60,
        format.hour_unit,
        minutes % 60,
        format.minute_unit
    )
}

/// Meal duration as stored on a record, in minutes only
pub fn format_minutes_only(minutes: i64, format: &DurationFormat) -> String {
    format!("{}{}", minutes, format.minute_unit)
}
