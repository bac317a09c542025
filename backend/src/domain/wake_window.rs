//! Wake-window calculation.
//!
//! A wake window is the time between the end of one sleep session and the
//! onset of the next. Sleep records are put into a strict chronological order
//! by `(date, onset, id)`, then folded over with the previous session's end
//! instant as the accumulator. Input order never matters and nothing is kept
//! between calls.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use shared::{ActivityRecord, ActivityWithWakeTime, DurationFormat};
use tracing::debug;

use super::time_math::{
    format_elapsed, minutes_between, parse_date, parse_optional_time, to_instant, MINUTES_PER_DAY,
};

/// Outcome of measuring the gap between two sleep sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeWindow {
    Minutes(i64),
    /// The next session does not start after the previous one ended
    CalculationError,
    /// More than a full day between sessions
    OverADay,
}

impl WakeWindow {
    /// Measure from the end of one session to the onset of the next
    pub fn between(previous_end: NaiveDateTime, onset: NaiveDateTime) -> Self {
        let elapsed = minutes_between(previous_end, onset);

        if elapsed.minutes <= 0 || (elapsed.rolled_over && elapsed.minutes >= MINUTES_PER_DAY) {
            WakeWindow::CalculationError
        } else if elapsed.minutes > MINUTES_PER_DAY {
            WakeWindow::OverADay
        } else {
            WakeWindow::Minutes(elapsed.minutes)
        }
    }

    pub fn render(&self, format: &DurationFormat) -> String {
        match self {
            WakeWindow::Minutes(minutes) => format_elapsed(*minutes, format),
            WakeWindow::CalculationError => format.calculation_error.clone(),
            WakeWindow::OverADay => format.over_a_day.clone(),
        }
    }
}

/// Effective sleep onset: fall-asleep time, else lay-down time, else start time.
/// The first field that is present wins, even if it does not parse.
pub fn effective_onset(record: &ActivityRecord) -> Option<NaiveTime> {
    [
        record.fall_asleep_time.as_deref(),
        record.lay_down_time.as_deref(),
        Some(record.start_time.as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|value| !value.trim().is_empty())
    .and_then(|value| parse_optional_time(Some(value)))
}

/// Instant the session ended. A session whose end time is not after its first
/// clock time (lay-down, else onset) ends on the following calendar day.
pub fn session_end(record: &ActivityRecord, date: NaiveDate) -> Option<NaiveDateTime> {
    let end = parse_optional_time(record.end_time.as_deref())?;
    let start = parse_optional_time(record.lay_down_time.as_deref()).or_else(|| effective_onset(record));

    let end_instant = to_instant(date, end);
    match start {
        Some(start) if end <= start => Some(end_instant + Duration::days(1)),
        _ => Some(end_instant),
    }
}

/// A sleep record with its ordering key resolved
struct SleepSession {
    index: usize,
    date: NaiveDate,
    onset: NaiveTime,
}

impl SleepSession {
    fn from_record(index: usize, record: &ActivityRecord) -> Option<Self> {
        let date = parse_date(&record.date);
        let onset = effective_onset(record);

        match (date, onset) {
            (Some(date), Some(onset)) => Some(Self { index, date, onset }),
            _ => {
                debug!(
                    "Skipping sleep record {} in wake-window ordering: unreadable date or onset",
                    record.id
                );
                None
            }
        }
    }

    fn onset_instant(&self) -> NaiveDateTime {
        to_instant(self.date, self.onset)
    }
}

/// Computes wake windows with a configurable duration format
#[derive(Debug, Clone, Default)]
pub struct WakeWindowService {
    format: DurationFormat,
}

impl WakeWindowService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: DurationFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &DurationFormat {
        &self.format
    }

    /// Reproduce every record, annotating sleep records with the wake window
    /// that preceded them when it can be determined.
    pub fn compute_wake_windows(&self, records: &[ActivityRecord]) -> Vec<ActivityWithWakeTime> {
        let mut sessions: Vec<SleepSession> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.activity_type.is_sleep())
            .filter_map(|(index, record)| SleepSession::from_record(index, record))
            .collect();

        sessions.sort_by(|a, b| {
            (a.date, a.onset, &records[a.index].id).cmp(&(b.date, b.onset, &records[b.index].id))
        });

        let (_, wake_times) = sessions.iter().fold(
            (None, vec![None; records.len()]),
            |(previous_end, mut wake_times): (Option<NaiveDateTime>, Vec<Option<String>>), session| {
                if let Some(previous_end) = previous_end {
                    let window = WakeWindow::between(previous_end, session.onset_instant());
                    wake_times[session.index] = Some(window.render(&self.format));
                }
                let record = &records[session.index];
                (session_end(record, session.date), wake_times)
            },
        );

        records
            .iter()
            .cloned()
            .zip(wake_times)
            .map(|(activity, previous_wake_time)| ActivityWithWakeTime {
                activity,
                previous_wake_time,
            })
            .collect()
    }
}

/// Wake windows rendered with the default duration format
pub fn compute_wake_windows(records: &[ActivityRecord]) -> Vec<ActivityWithWakeTime> {
    WakeWindowService::new().compute_wake_windows(records)
}
