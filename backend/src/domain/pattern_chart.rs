//! Multi-day pattern chart logic.
//!
//! This module contains the business logic behind the timeline chart: which
//! dates are visible, how the window is navigated, and how each visible day's
//! activities are prepared for a single calendar column. Pixel layout and
//! colors stay in the UI.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Deserialize;
use shared::{
    ActivityFragment, ActivityRecord, ActivityType, FragmentPart, PatternChartConfig, PatternDay,
    PatternWindowResponse, QuickRange,
};
use tracing::info;

use super::daily_log::build_summary;
use super::midnight_split::split_cross_midnight;
use super::time_math::{
    format_date, minute_of_day, parse_clock_time, parse_date, parse_optional_time, session_minutes,
    MINUTES_PER_DAY,
};

/// Direction for moving the chart window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftDirection {
    Previous,
    Next,
}

/// Short Korean weekday label for a chart column header
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "일",
        Weekday::Mon => "월",
        Weekday::Tue => "화",
        Weekday::Wed => "수",
        Weekday::Thu => "목",
        Weekday::Fri => "금",
        Weekday::Sat => "토",
    }
}

/// Sleep minutes a fragment contributes to its own day. A pre-midnight
/// fragment runs to the end of the day, not to its 23:59 label.
fn fragment_sleep_minutes(fragment: &ActivityFragment) -> i64 {
    let Some(start) = parse_clock_time(&fragment.activity.start_time) else {
        return 0;
    };

    match fragment.fragment_id.part {
        FragmentPart::BeforeMidnight => MINUTES_PER_DAY - minute_of_day(start),
        FragmentPart::AfterMidnight | FragmentPart::Whole => {
            parse_optional_time(fragment.activity.end_time.as_deref())
                .map(|end| session_minutes(start, end))
                .unwrap_or(0)
        }
    }
}

/// Pattern chart service that prepares the multi-day timeline
#[derive(Debug, Clone, Default)]
pub struct PatternChartService {
    config: PatternChartConfig,
}

impl PatternChartService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PatternChartConfig) -> Self {
        Self { config }
    }

    pub fn window_days(&self) -> u32 {
        self.config.window_days.max(1)
    }

    /// Consecutive dates starting at `start`
    pub fn window_dates(&self, start: NaiveDate) -> Vec<NaiveDate> {
        start.iter_days().take(self.window_days() as usize).collect()
    }

    /// Start date for one of the quick selections, relative to `today`
    pub fn quick_start_date(&self, range: QuickRange, today: NaiveDate) -> NaiveDate {
        let this_sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
        match range {
            QuickRange::Recent => today - Duration::days(i64::from(self.window_days()) - 1),
            QuickRange::ThisWeek => this_sunday,
            QuickRange::LastWeek => this_sunday - Duration::days(7),
        }
    }

    /// Move the window one day in either direction
    pub fn shift_start_date(&self, start: NaiveDate, direction: ShiftDirection) -> NaiveDate {
        match direction {
            ShiftDirection::Previous => start.pred_opt().unwrap_or(start),
            ShiftDirection::Next => start.succ_opt().unwrap_or(start),
        }
    }

    /// Build every chart column for the window beginning at `start`
    pub fn build_window(&self, records: &[ActivityRecord], start: NaiveDate) -> PatternWindowResponse {
        let dates = self.window_dates(start);
        let visible: BTreeSet<NaiveDate> = dates.iter().copied().collect();

        info!(
            "Building pattern chart for {} days from {}",
            dates.len(),
            format_date(start)
        );

        let fragments = split_cross_midnight(records, &visible);

        let days = dates
            .iter()
            .map(|date| {
                let mut day_fragments: Vec<ActivityFragment> = fragments
                    .iter()
                    .filter(|f| parse_date(&f.activity.date) == Some(*date))
                    .cloned()
                    .collect();
                day_fragments.sort_by(|a, b| {
                    let key = |f: &ActivityFragment| {
                        parse_clock_time(&f.activity.start_time)
                            .map(minute_of_day)
                            .unwrap_or(i64::MAX)
                    };
                    key(a).cmp(&key(b)).then_with(|| a.fragment_id.cmp(&b.fragment_id))
                });

                let sleep: Vec<&ActivityFragment> = day_fragments
                    .iter()
                    .filter(|f| f.activity.activity_type.is_sleep())
                    .collect();
                let total_sleep: i64 = sleep.iter().map(|f| fragment_sleep_minutes(f)).sum();
                let meal_count = day_fragments
                    .iter()
                    .filter(|f| f.activity.activity_type == ActivityType::Meal)
                    .count();

                let date_string = format_date(*date);
                PatternDay {
                    summary: build_summary(&date_string, total_sleep, sleep.len(), meal_count),
                    date: date_string,
                    weekday: weekday_label(*date).to_string(),
                    fragments: day_fragments,
                }
            })
            .collect();

        PatternWindowResponse {
            start_date: format_date(start),
            end_date: format_date(dates.last().copied().unwrap_or(start)),
            days,
        }
    }
}
