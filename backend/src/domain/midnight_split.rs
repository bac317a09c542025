//! Splits night sleep that crosses midnight into per-day fragments for the
//! multi-day pattern chart.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared::{ActivityFragment, ActivityRecord, ActivityType, FragmentId, FragmentPart};
use tracing::debug;

use super::time_math::{
    format_date, parse_date, parse_optional_time, FIRST_MINUTE_OF_DAY, LAST_MINUTE_OF_DAY,
};

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn fragment(record: ActivityRecord, part: FragmentPart) -> ActivityFragment {
    ActivityFragment {
        fragment_id: FragmentId {
            activity_id: record.id.clone(),
            part,
        },
        activity: record,
    }
}

/// Prepare records for calendar-column rendering over `visible_dates`.
///
/// Only records dated inside the window are emitted. A night sleep whose
/// lay-down time is later than its end time is replaced by a fragment ending
/// at 23:59 on its own date and, when the following date is visible, a
/// fragment starting at 00:00 on that date. Other night sleeps are re-emitted
/// with their start aligned to the fall-asleep time. Everything else passes
/// through unchanged.
pub fn split_cross_midnight(
    records: &[ActivityRecord],
    visible_dates: &BTreeSet<NaiveDate>,
) -> Vec<ActivityFragment> {
    let mut fragments = Vec::with_capacity(records.len());

    for record in records {
        let Some(date) = parse_date(&record.date).filter(|d| visible_dates.contains(d)) else {
            continue;
        };

        if record.activity_type != ActivityType::NightSleep {
            fragments.push(fragment(record.clone(), FragmentPart::Whole));
            continue;
        }

        let (Some(lay_down), Some(end)) = (
            non_blank(record.lay_down_time.as_deref()),
            non_blank(record.end_time.as_deref()),
        ) else {
            fragments.push(fragment(record.clone(), FragmentPart::Whole));
            continue;
        };

        let (Some(lay_down_at), Some(end_at)) = (
            parse_optional_time(Some(lay_down)),
            parse_optional_time(Some(end)),
        ) else {
            debug!("Night sleep {} has unreadable times, rendering as-is", record.id);
            fragments.push(fragment(record.clone(), FragmentPart::Whole));
            continue;
        };

        let fall_asleep = non_blank(record.fall_asleep_time.as_deref());

        if lay_down_at > end_at {
            fragments.push(fragment(
                ActivityRecord {
                    start_time: fall_asleep.unwrap_or(lay_down).to_string(),
                    end_time: Some(LAST_MINUTE_OF_DAY.to_string()),
                    ..record.clone()
                },
                FragmentPart::BeforeMidnight,
            ));

            if let Some(next_day) = date.succ_opt().filter(|d| visible_dates.contains(d)) {
                fragments.push(fragment(
                    ActivityRecord {
                        date: format_date(next_day),
                        start_time: FIRST_MINUTE_OF_DAY.to_string(),
                        end_time: Some(end.to_string()),
                        ..record.clone()
                    },
                    FragmentPart::AfterMidnight,
                ));
            }
        } else {
            fragments.push(fragment(
                ActivityRecord {
                    start_time: fall_asleep.unwrap_or(record.start_time.as_str()).to_string(),
                    ..record.clone()
                },
                FragmentPart::Whole,
            ));
        }
    }

    fragments
}
