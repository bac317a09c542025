use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logged sleep, meal or other activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Activity ID in format: "activity::<uuid>"
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Calendar date the activity belongs to (YYYY-MM-DD). For night sleep this
    /// is the date the infant was laid down, not the date of waking.
    pub date: String,
    /// Nominal start as a wall-clock time (HH:MM)
    pub start_time: String,
    pub end_time: Option<String>,
    /// Human-readable elapsed time, derived once when the record is logged
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: String,
    // Sleep-only fields
    pub lay_down_time: Option<String>,
    pub fall_asleep_time: Option<String>,
    // Meal-only fields
    pub meal_type: Option<MealType>,
    pub amount: Option<String>,
    pub milk_amount: Option<String>,
    pub portion_size: Option<PortionSize>,
}

/// Kind of logged activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    NightSleep,
    NapSleep,
    Meal,
    /// Anything else, including activity types this build does not know about
    #[serde(other)]
    Other,
}

impl ActivityType {
    pub fn is_sleep(&self) -> bool {
        matches!(self, ActivityType::NightSleep | ActivityType::NapSleep)
    }

    /// Display label used by the caregiver-facing views
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::NightSleep => "밤잠",
            ActivityType::NapSleep => "낮잠",
            ActivityType::Meal => "식사",
            ActivityType::Other => "기타",
        }
    }
}

/// What was fed during a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breastmilk,
    Formula,
    Puree,
    ToddlerFood,
    /// Any meal kind this build does not know about; logged without meal-specific defaults
    #[serde(other)]
    Other,
}

impl MealType {
    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breastmilk => "모유",
            MealType::Formula => "분유",
            MealType::Puree => "이유식",
            MealType::ToddlerFood => "유아식",
            MealType::Other => "기타",
        }
    }

    /// Amount in mL pre-filled by the entry form for this meal type
    pub fn default_amount(&self) -> Option<u32> {
        match self {
            MealType::Breastmilk | MealType::Formula => Some(120),
            MealType::Puree => Some(100),
            MealType::ToddlerFood | MealType::Other => None,
        }
    }
}

/// How much of a toddler-food portion was eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortionSize {
    Full,
    Half,
    Third,
    Other,
}

impl PortionSize {
    pub fn label(&self) -> &'static str {
        match self {
            PortionSize::Full => "전량",
            PortionSize::Half => "1/2",
            PortionSize::Third => "1/3",
            PortionSize::Other => "기타",
        }
    }
}

/// Activity annotated with the wake window that preceded it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityWithWakeTime {
    #[serde(flatten)]
    pub activity: ActivityRecord,
    /// Elapsed time since the previous sleep session ended, e.g. "2시간 30분"
    pub previous_wake_time: Option<String>,
}

/// Which part of a sleep session a chart fragment covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FragmentPart {
    /// The session fits within its own day
    Whole,
    /// From sleep onset to the end of the start day
    BeforeMidnight,
    /// From the start of the following day to waking
    AfterMidnight,
}

/// Identifier of a chart fragment, unique even when two fragments share a source activity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentId {
    pub activity_id: String,
    pub part: FragmentPart,
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.part {
            FragmentPart::Whole => "whole",
            FragmentPart::BeforeMidnight => "before_midnight",
            FragmentPart::AfterMidnight => "after_midnight",
        };
        write!(f, "{}#{}", self.activity_id, suffix)
    }
}

/// A single-day slice of an activity, ready for calendar-column rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFragment {
    pub fragment_id: FragmentId,
    pub activity: ActivityRecord,
}

/// Per-day totals shown above the daily log and each chart column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub date: String,
    pub total_sleep_minutes: u32,
    pub total_sleep_hours: u32,
    pub remaining_sleep_minutes: u32,
    pub sleep_count: usize,
    pub meal_count: usize,
}

/// One row of the daily log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogEntry {
    #[serde(flatten)]
    pub activity: ActivityWithWakeTime,
    /// Time between lay-down and sleep onset, sleep records only
    pub fall_asleep_latency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogResponse {
    pub date: String,
    pub previous_date: String,
    pub next_date: String,
    pub entries: Vec<DailyLogEntry>,
    pub summary: DaySummary,
}

/// One column of the multi-day pattern chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDay {
    pub date: String,
    pub weekday: String,
    pub fragments: Vec<ActivityFragment>,
    pub summary: DaySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternWindowResponse {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<PatternDay>,
}

/// Shortcut selections for the pattern chart start date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickRange {
    /// The last few days ending today
    Recent,
    /// Starting from this week's Sunday
    ThisWeek,
    /// Starting from last week's Sunday
    LastWeek,
}

/// Request for logging a new activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub lay_down_time: Option<String>,
    pub fall_asleep_time: Option<String>,
    pub meal_type: Option<MealType>,
    /// Amount in mL without unit, e.g. "120"
    pub amount: Option<String>,
    /// Milk taken alongside toddler food, in mL without unit
    pub milk_amount: Option<String>,
    pub portion_size: Option<PortionSize>,
}

/// Request for editing an existing activity; every field replaces the stored one
pub type UpdateActivityRequest = CreateActivityRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub activity: ActivityRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityListResponse {
    pub activities: Vec<ActivityWithWakeTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteActivityResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// Log line forwarded by a frontend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

/// Unit words and sentinel strings used when rendering elapsed time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationFormat {
    pub hour_unit: String,
    pub minute_unit: String,
    /// Shown when the end of an interval does not come after its start
    pub calculation_error: String,
    /// Shown when a wake window is implausibly long
    pub over_a_day: String,
}

impl Default for DurationFormat {
    fn default() -> Self {
        Self {
            hour_unit: "시간".to_string(),
            minute_unit: "분".to_string(),
            calculation_error: "시간 계산 오류".to_string(),
            over_a_day: "24시간 초과".to_string(),
        }
    }
}

/// Configuration for the multi-day pattern chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternChartConfig {
    pub window_days: u32,
}

impl Default for PatternChartConfig {
    fn default() -> Self {
        Self { window_days: 5 }
    }
}

impl ActivityRecord {
    /// Generate an activity ID from a unique token
    pub fn generate_id(token: &str) -> String {
        format!("activity::{}", token)
    }

    /// Parse an activity ID to extract its unique token
    pub fn parse_id(id: &str) -> Result<&str, ActivityIdError> {
        match id.split_once("::") {
            Some(("activity", token)) if !token.is_empty() => Ok(token),
            Some(("activity", _)) => Err(ActivityIdError::EmptyToken),
            _ => Err(ActivityIdError::InvalidFormat),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityIdError {
    InvalidFormat,
    EmptyToken,
}

impl fmt::Display for ActivityIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityIdError::InvalidFormat => write!(f, "Invalid activity ID format"),
            ActivityIdError::EmptyToken => write!(f, "Activity ID has no unique token"),
        }
    }
}

impl std::error::Error for ActivityIdError {}
