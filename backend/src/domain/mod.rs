//! # Domain Module
//!
//! Contains the business logic for the sleep and feeding log.
//!
//! Everything here works on plain activity records and operates independently
//! of the HTTP layer and of how records are stored.
//!
//! ## Module Organization
//!
//! - **time_math**: Clock-time parsing, elapsed-minute arithmetic across midnight, duration text
//! - **wake_window**: Awake time between consecutive sleep sessions
//! - **midnight_split**: Per-day fragments of night sleep that crosses midnight
//! - **daily_log**: Single-day list view with sleep totals
//! - **pattern_chart**: Multi-day timeline window and its navigation
//! - **activity_service**: Validation, field derivation and storage of logged activities
//!
//! ## Business Rules
//!
//! - A sleep starts when the baby falls asleep; lay-down time is kept for latency
//! - Any clock time at or before its start is read as belonging to the next day
//! - Wake windows are measured from the end of the previous sleep, whatever day it was logged on
//! - Calculations never fail: unusable records are skipped or shown with a sentinel

pub mod activity_service;
pub mod daily_log;
pub mod errors;
pub mod midnight_split;
pub mod pattern_chart;
pub mod time_math;
pub mod wake_window;

#[cfg(test)]
pub(crate) mod test_utils;

pub use activity_service::ActivityService;
pub use daily_log::DailyLogService;
pub use errors::ActivityError;
pub use midnight_split::split_cross_midnight;
pub use pattern_chart::{PatternChartService, ShiftDirection};
pub use wake_window::{compute_wake_windows, WakeWindow, WakeWindowService};
