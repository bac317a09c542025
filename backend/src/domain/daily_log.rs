//! Daily log domain logic.
//!
//! Builds the single-day list view: every activity logged for the selected
//! date, annotated with wake windows computed over the whole history, in
//! start-time order, together with the day's sleep and meal totals.

use chrono::NaiveDate;
use shared::{ActivityRecord, ActivityType, DailyLogEntry, DailyLogResponse, DaySummary, DurationFormat};
use tracing::info;

use super::time_math::{
    format_date, format_elapsed, minute_of_day, parse_clock_time, parse_date, parse_optional_time,
    session_minutes,
};
use super::wake_window::{effective_onset, WakeWindowService};

/// Sleep length of a single record, from effective onset to end time
pub fn sleep_minutes(record: &ActivityRecord) -> Option<i64> {
    let onset = effective_onset(record)?;
    let end = parse_optional_time(record.end_time.as_deref())?;
    Some(session_minutes(onset, end))
}

/// Minutes between lay-down and sleep onset
pub fn fall_asleep_latency(record: &ActivityRecord) -> Option<i64> {
    let lay_down = parse_optional_time(record.lay_down_time.as_deref())?;
    let fall_asleep = parse_optional_time(record.fall_asleep_time.as_deref())?;
    Some(session_minutes(lay_down, fall_asleep))
}

/// Assemble a day summary from a sleep total and per-type counts
pub fn build_summary(date: &str, total_sleep_minutes: i64, sleep_count: usize, meal_count: usize) -> DaySummary {
    let total = u32::try_from(total_sleep_minutes.max(0)).unwrap_or(u32::MAX);
    DaySummary {
        date: date.to_string(),
        total_sleep_minutes: total,
        total_sleep_hours: total / 60,
        remaining_sleep_minutes: total % 60,
        sleep_count,
        meal_count,
    }
}

/// Daily log service that handles the single-day activity list
#[derive(Debug, Clone, Default)]
pub struct DailyLogService {
    wake_window_service: WakeWindowService,
}

impl DailyLogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: DurationFormat) -> Self {
        Self {
            wake_window_service: WakeWindowService::with_format(format),
        }
    }

    /// Generate the log for one date out of the full activity history
    pub fn daily_log(&self, records: &[ActivityRecord], date: NaiveDate) -> DailyLogResponse {
        let date_string = format_date(date);
        info!("Building daily log for {} from {} activities", date_string, records.len());

        let format = self.wake_window_service.format();
        let mut entries: Vec<DailyLogEntry> = self
            .wake_window_service
            .compute_wake_windows(records)
            .into_iter()
            .filter(|annotated| parse_date(&annotated.activity.date) == Some(date))
            .map(|annotated| {
                let fall_asleep_latency = if annotated.activity.activity_type.is_sleep() {
                    fall_asleep_latency(&annotated.activity).map(|m| format_elapsed(m, format))
                } else {
                    None
                };
                DailyLogEntry {
                    activity: annotated,
                    fall_asleep_latency,
                }
            })
            .collect();

        // Unreadable start times sink to the bottom
        entries.sort_by(|a, b| {
            let key = |entry: &DailyLogEntry| {
                parse_clock_time(&entry.activity.activity.start_time)
                    .map(minute_of_day)
                    .unwrap_or(i64::MAX)
            };
            key(a)
                .cmp(&key(b))
                .then_with(|| a.activity.activity.id.cmp(&b.activity.activity.id))
        });

        let day_records: Vec<&ActivityRecord> = entries.iter().map(|e| &e.activity.activity).collect();
        let summary = self.summarize_day(&date_string, &day_records);

        DailyLogResponse {
            date: date_string,
            previous_date: format_date(Self::previous_day(date)),
            next_date: format_date(Self::next_day(date)),
            entries,
            summary,
        }
    }

    /// Sleep total and activity counts for records already restricted to one day
    pub fn summarize_day(&self, date: &str, records: &[&ActivityRecord]) -> DaySummary {
        let sleep_records: Vec<&&ActivityRecord> = records
            .iter()
            .filter(|r| r.activity_type.is_sleep())
            .collect();
        let total_sleep: i64 = sleep_records.iter().filter_map(|r| sleep_minutes(r)).sum();
        let meal_count = records
            .iter()
            .filter(|r| r.activity_type == ActivityType::Meal)
            .count();

        build_summary(date, total_sleep, sleep_records.len(), meal_count)
    }

    pub fn previous_day(date: NaiveDate) -> NaiveDate {
        date.pred_opt().unwrap_or(date)
    }

    pub fn next_day(date: NaiveDate) -> NaiveDate {
        date.succ_opt().unwrap_or(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::{create_test_activity, create_test_meal, create_test_sleep};
    use shared::MealType;

    fn day(value: &str) -> NaiveDate {
        parse_date(value).unwrap()
    }

    fn history() -> Vec<ActivityRecord> {
        vec![
            create_test_sleep("night0", ActivityType::NightSleep, "2024-01-01", "20:30", "21:00", "06:30"),
            create_test_sleep("nap2", ActivityType::NapSleep, "2024-01-02", "13:00", "13:20", "14:30"),
            create_test_meal("meal1", "2024-01-02", "07:00", MealType::Formula),
            create_test_sleep("nap1", ActivityType::NapSleep, "2024-01-02", "08:45", "09:00", "10:00"),
            create_test_activity("bath", ActivityType::Other, "2024-01-02", "18:30"),
            create_test_sleep("night1", ActivityType::NightSleep, "2024-01-02", "19:30", "19:50", "06:10"),
        ]
    }

    #[test]
    fn test_daily_log_filters_and_sorts_by_start_time() {
        let service = DailyLogService::new();
        let log = service.daily_log(&history(), day("2024-01-02"));

        let ids: Vec<&str> = log.entries.iter().map(|e| e.activity.activity.id.as_str()).collect();
        assert_eq!(ids, vec!["meal1", "nap1", "nap2", "bath", "night1"]);
        assert_eq!(log.date, "2024-01-02");
        assert_eq!(log.previous_date, "2024-01-01");
        assert_eq!(log.next_date, "2024-01-03");
    }

    #[test]
    fn test_daily_log_uses_wake_windows_from_previous_day() {
        let service = DailyLogService::new();
        let log = service.daily_log(&history(), day("2024-01-02"));

        let nap1 = log.entries.iter().find(|e| e.activity.activity.id == "nap1").unwrap();
        assert_eq!(nap1.activity.previous_wake_time.as_deref(), Some("2시간 30분"));
    }

    #[test]
    fn test_daily_log_fall_asleep_latency() {
        let service = DailyLogService::new();
        let log = service.daily_log(&history(), day("2024-01-02"));

        let nap2 = log.entries.iter().find(|e| e.activity.activity.id == "nap2").unwrap();
        assert_eq!(nap2.fall_asleep_latency.as_deref(), Some("20분"));

        let meal = log.entries.iter().find(|e| e.activity.activity.id == "meal1").unwrap();
        assert_eq!(meal.fall_asleep_latency, None);
    }

    #[test]
    fn test_daily_summary_totals() {
        let service = DailyLogService::new();
        let log = service.daily_log(&history(), day("2024-01-02"));

        // nap1 60 + nap2 70 + night1 10h20m
        assert_eq!(log.summary.total_sleep_minutes, 60 + 70 + 620);
        assert_eq!(log.summary.total_sleep_hours, 12);
        assert_eq!(log.summary.remaining_sleep_minutes, 30);
        assert_eq!(log.summary.sleep_count, 3);
        assert_eq!(log.summary.meal_count, 1);
    }

    #[test]
    fn test_empty_day() {
        let service = DailyLogService::new();
        let log = service.daily_log(&history(), day("2024-02-01"));

        assert!(log.entries.is_empty());
        assert_eq!(log.summary.total_sleep_minutes, 0);
        assert_eq!(log.summary.sleep_count, 0);
    }

    #[test]
    fn test_latency_across_midnight() {
        let record = create_test_sleep("late", ActivityType::NightSleep, "2024-01-01", "23:40", "00:10", "06:00");

        assert_eq!(fall_asleep_latency(&record), Some(30));
        assert_eq!(sleep_minutes(&record), Some(350));
    }

    #[test]
    fn test_identical_times_count_as_zero() {
        let record = create_test_sleep("blip", ActivityType::NapSleep, "2024-01-01", "13:00", "13:00", "13:00");

        assert_eq!(sleep_minutes(&record), Some(0));
        assert_eq!(fall_asleep_latency(&record), Some(0));

        let service = DailyLogService::new();
        let summary = service.summarize_day("2024-01-01", &[&record]);
        assert_eq!(summary.total_sleep_minutes, 0);
        assert_eq!(summary.sleep_count, 1);
    }

    #[test]
    fn test_sleep_minutes_requires_end_time() {
        let mut record = create_test_sleep("nap", ActivityType::NapSleep, "2024-01-01", "13:00", "13:05", "14:00");
        record.end_time = None;

        assert_eq!(sleep_minutes(&record), None);
    }

    #[test]
    fn test_day_navigation() {
        assert_eq!(DailyLogService::previous_day(day("2024-03-01")), day("2024-02-29"));
        assert_eq!(DailyLogService::next_day(day("2023-12-31")), day("2024-01-01"));
    }
}
