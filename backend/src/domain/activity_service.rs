//! Activity lifecycle: validating entries, deriving stored fields, and
//! handing records to storage.

use chrono::NaiveTime;
use shared::{
    ActivityListResponse, ActivityRecord, ActivityResponse, ActivityType, CreateActivityRequest,
    DeleteActivityResponse, DurationFormat, MealType, PortionSize, UpdateActivityRequest,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::errors::ActivityError;
use super::time_math::{
    format_clock_time, format_date, format_minutes_only, format_session_duration, parse_clock_time, parse_date,
    session_minutes,
};
use super::wake_window::WakeWindowService;
use crate::storage::{ActivityStorage, InMemoryActivityStore};

/// Milk volume recorded alongside toddler food when none is entered
pub const DEFAULT_TODDLER_MILK_ML: u32 = 180;

const ML_SUFFIX: &str = "mL";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn required_time(field: &'static str, value: Option<&str>) -> Result<NaiveTime, ActivityError> {
    let raw = non_blank(value).ok_or(ActivityError::MissingField(field))?;
    parse_clock_time(raw).ok_or_else(|| ActivityError::InvalidTime {
        field,
        value: raw.to_string(),
    })
}

fn optional_time(field: &'static str, value: Option<&str>) -> Result<Option<NaiveTime>, ActivityError> {
    match non_blank(value) {
        Some(_) => required_time(field, value).map(Some),
        None => Ok(None),
    }
}

/// Volume with a single `mL` suffix, falling back to `default_ml` when blank.
/// `None` when there is neither a value nor a default.
fn volume_with_unit(value: Option<&str>, default_ml: Option<u32>) -> Option<String> {
    let number = non_blank(value)
        .map(|v| {
            v.strip_suffix(ML_SUFFIX)
                .or_else(|| v.strip_suffix("ml"))
                .unwrap_or(v)
                .trim()
                .to_string()
        })
        .filter(|v| !v.is_empty())
        .or_else(|| default_ml.map(|ml| ml.to_string()))?;
    Some(format!("{}{}", number, ML_SUFFIX))
}

/// Service for logging and editing activities
#[derive(Clone)]
pub struct ActivityService<S = InMemoryActivityStore> {
    storage: S,
    wake_window_service: WakeWindowService,
}

impl<S: ActivityStorage> ActivityService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            wake_window_service: WakeWindowService::default(),
        }
    }

    pub fn with_format(storage: S, format: DurationFormat) -> Self {
        Self {
            storage,
            wake_window_service: WakeWindowService::with_format(format),
        }
    }

    fn format(&self) -> &DurationFormat {
        self.wake_window_service.format()
    }

    /// Validate a new entry and store it under a fresh id
    pub fn create_activity(&self, request: CreateActivityRequest) -> Result<ActivityResponse, ActivityError> {
        info!("Creating {} activity on {}", request.activity_type.label(), request.date);

        let id = ActivityRecord::generate_id(&Uuid::new_v4().to_string());
        let activity = self.build_record(id, request).map_err(|e| {
            warn!("Rejected new activity: {}", e);
            e
        })?;

        self.storage.store_activity(&activity).map_err(|e| {
            error!("Failed to store activity {}: {}", activity.id, e);
            ActivityError::Storage(e)
        })?;

        info!("Created activity {}", activity.id);
        Ok(ActivityResponse {
            activity,
            success_message: "Activity logged successfully".to_string(),
        })
    }

    /// Replace every field of an existing activity and re-derive
    pub fn update_activity(
        &self,
        activity_id: &str,
        request: UpdateActivityRequest,
    ) -> Result<ActivityResponse, ActivityError> {
        info!("Updating activity {}", activity_id);

        if self.storage.get_activity(activity_id)?.is_none() {
            warn!("Activity not found: {}", activity_id);
            return Err(ActivityError::NotFound(activity_id.to_string()));
        }

        let activity = self.build_record(activity_id.to_string(), request).map_err(|e| {
            warn!("Rejected update for {}: {}", activity_id, e);
            e
        })?;

        if !self.storage.update_activity(&activity)? {
            return Err(ActivityError::NotFound(activity_id.to_string()));
        }

        info!("Updated activity {}", activity.id);
        Ok(ActivityResponse {
            activity,
            success_message: "Activity updated successfully".to_string(),
        })
    }

    pub fn delete_activity(&self, activity_id: &str) -> Result<DeleteActivityResponse, ActivityError> {
        info!("Deleting activity {}", activity_id);

        if !self.storage.delete_activity(activity_id)? {
            warn!("Activity not found: {}", activity_id);
            return Err(ActivityError::NotFound(activity_id.to_string()));
        }

        Ok(DeleteActivityResponse {
            deleted_id: activity_id.to_string(),
            success_message: "Activity deleted successfully".to_string(),
        })
    }

    pub fn get_activity(&self, activity_id: &str) -> Result<ActivityRecord, ActivityError> {
        self.storage
            .get_activity(activity_id)?
            .ok_or_else(|| ActivityError::NotFound(activity_id.to_string()))
    }

    /// Every stored record, in insertion order
    pub fn list_activities(&self) -> Result<Vec<ActivityRecord>, ActivityError> {
        let activities = self.storage.list_activities()?;
        info!("Found {} activities", activities.len());
        Ok(activities)
    }

    /// Every stored record annotated with its preceding wake window
    pub fn list_with_wake_times(&self) -> Result<ActivityListResponse, ActivityError> {
        let activities = self.list_activities()?;
        Ok(ActivityListResponse {
            activities: self.wake_window_service.compute_wake_windows(&activities),
        })
    }

    /// Turn a request into a stored record, validating input and filling in
    /// the fields derived from it
    pub fn build_record(&self, id: String, request: CreateActivityRequest) -> Result<ActivityRecord, ActivityError> {
        let date = parse_date(&request.date).ok_or_else(|| ActivityError::InvalidDate(request.date.clone()))?;

        let mut record = ActivityRecord {
            id,
            activity_type: request.activity_type,
            date: format_date(date),
            start_time: String::new(),
            end_time: None,
            duration: None,
            notes: request.notes.trim().to_string(),
            lay_down_time: None,
            fall_asleep_time: None,
            meal_type: None,
            amount: None,
            milk_amount: None,
            portion_size: None,
        };

        if request.activity_type.is_sleep() {
            let lay_down = required_time("layDownTime", request.lay_down_time.as_deref())?;
            let fall_asleep = required_time("fallAsleepTime", request.fall_asleep_time.as_deref())?;
            let end = required_time("endTime", request.end_time.as_deref())?;

            record.start_time = format_clock_time(fall_asleep);
            record.lay_down_time = Some(format_clock_time(lay_down));
            record.fall_asleep_time = Some(format_clock_time(fall_asleep));
            record.end_time = Some(format_clock_time(end));
            record.duration = Some(format_session_duration(session_minutes(fall_asleep, end), self.format()));
            return Ok(record);
        }

        let start = required_time("startTime", request.start_time.as_deref())?;
        record.start_time = format_clock_time(start);

        if request.activity_type != ActivityType::Meal {
            let end = optional_time("endTime", request.end_time.as_deref())?;
            record.end_time = end.map(format_clock_time);
            return Ok(record);
        }

        let meal_type = request.meal_type.ok_or(ActivityError::MissingField("mealType"))?;
        let end = if meal_type == MealType::Breastmilk {
            Some(required_time("endTime", request.end_time.as_deref())?)
        } else {
            optional_time("endTime", request.end_time.as_deref())?
        };

        record.meal_type = Some(meal_type);
        record.end_time = end.map(format_clock_time);
        record.duration = end.map(|end| format_minutes_only(session_minutes(start, end), self.format()));

        if meal_type == MealType::ToddlerFood {
            let portion = request.portion_size.unwrap_or(PortionSize::Full);
            record.portion_size = Some(portion);
            record.milk_amount = volume_with_unit(request.milk_amount.as_deref(), Some(DEFAULT_TODDLER_MILK_ML));
            record.amount = Some(portion.label().to_string());
        } else {
            record.amount = volume_with_unit(request.amount.as_deref(), meal_type.default_amount());
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> ActivityService {
        ActivityService::new(InMemoryActivityStore::new())
    }

    fn request(activity_type: ActivityType, date: &str) -> CreateActivityRequest {
        CreateActivityRequest {
            activity_type,
            date: date.to_string(),
            start_time: None,
            end_time: None,
            notes: String::new(),
            lay_down_time: None,
            fall_asleep_time: None,
            meal_type: None,
            amount: None,
            milk_amount: None,
            portion_size: None,
        }
    }

    fn sleep_request(activity_type: ActivityType, lay: &str, fall: &str, end: &str) -> CreateActivityRequest {
        CreateActivityRequest {
            lay_down_time: Some(lay.to_string()),
            fall_asleep_time: Some(fall.to_string()),
            end_time: Some(end.to_string()),
            ..request(activity_type, "2024-01-01")
        }
    }

    fn meal_request(meal_type: MealType, start: &str) -> CreateActivityRequest {
        CreateActivityRequest {
            start_time: Some(start.to_string()),
            meal_type: Some(meal_type),
            ..request(ActivityType::Meal, "2024-01-01")
        }
    }

    #[test]
    fn test_create_sleep_derives_start_and_duration() {
        let service = create_test_service();
        let response = service
            .create_activity(sleep_request(ActivityType::NightSleep, "20:40", "21:00", "06:30"))
            .unwrap();

        let activity = response.activity;
        assert!(ActivityRecord::parse_id(&activity.id).is_ok());
        assert_eq!(activity.start_time, "21:00");
        assert_eq!(activity.lay_down_time.as_deref(), Some("20:40"));
        assert_eq!(activity.duration.as_deref(), Some("9시간 30분"));

        let stored = service.get_activity(&activity.id).unwrap();
        assert_eq!(stored.start_time, "21:00");
    }

    #[test]
    fn test_sleep_duration_keeps_zero_parts() {
        let service = create_test_service();
        let activity = service
            .create_activity(sleep_request(ActivityType::NapSleep, "12:50", "13:00", "15:00"))
            .unwrap()
            .activity;

        assert_eq!(activity.duration.as_deref(), Some("2시간 0분"));
    }

    #[test]
    fn test_sleep_requires_all_times() {
        let service = create_test_service();
        let mut incomplete = sleep_request(ActivityType::NapSleep, "12:50", "13:00", "15:00");
        incomplete.fall_asleep_time = Some("  ".to_string());

        let err = service.create_activity(incomplete).unwrap_err();
        assert!(matches!(err, ActivityError::MissingField("fallAsleepTime")));
        assert!(service.list_activities().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_time_and_date_rejected() {
        let service = create_test_service();

        let err = service
            .create_activity(sleep_request(ActivityType::NapSleep, "12:50", "25:00", "15:00"))
            .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidTime { field: "fallAsleepTime", .. }));
        assert!(err.is_validation());

        let err = service
            .create_activity(CreateActivityRequest {
                start_time: Some("10:00".to_string()),
                ..request(ActivityType::Other, "01/02/2024")
            })
            .unwrap_err();
        assert!(matches!(err, ActivityError::InvalidDate(_)));
    }

    #[test]
    fn test_meal_amount_defaults_and_suffix() {
        let service = create_test_service();

        let formula = service.create_activity(meal_request(MealType::Formula, "07:00")).unwrap().activity;
        assert_eq!(formula.amount.as_deref(), Some("120mL"));
        assert_eq!(formula.duration, None);

        let puree = service.create_activity(meal_request(MealType::Puree, "11:00")).unwrap().activity;
        assert_eq!(puree.amount.as_deref(), Some("100mL"));

        let mut explicit = meal_request(MealType::Formula, "15:00");
        explicit.amount = Some("150mL".to_string());
        let explicit = service.create_activity(explicit).unwrap().activity;
        assert_eq!(explicit.amount.as_deref(), Some("150mL"));
    }

    #[test]
    fn test_breastmilk_requires_end_and_gets_minutes_duration() {
        let service = create_test_service();

        let err = service.create_activity(meal_request(MealType::Breastmilk, "07:00")).unwrap_err();
        assert!(matches!(err, ActivityError::MissingField("endTime")));

        let mut feed = meal_request(MealType::Breastmilk, "07:00");
        feed.end_time = Some("07:25".to_string());
        let feed = service.create_activity(feed).unwrap().activity;
        assert_eq!(feed.duration.as_deref(), Some("25분"));
    }

    #[test]
    fn test_identical_start_and_end_is_zero_duration() {
        let service = create_test_service();

        let mut feed = meal_request(MealType::Breastmilk, "07:00");
        feed.end_time = Some("07:00".to_string());
        let feed = service.create_activity(feed).unwrap().activity;
        assert_eq!(feed.duration.as_deref(), Some("0분"));

        let nap = service
            .create_activity(sleep_request(ActivityType::NapSleep, "13:00", "13:00", "13:00"))
            .unwrap()
            .activity;
        assert_eq!(nap.duration.as_deref(), Some("0시간 0분"));
    }

    #[test]
    fn test_unknown_meal_type_gets_no_meal_defaults() {
        let service = create_test_service();

        let snack = service.create_activity(meal_request(MealType::Other, "15:00")).unwrap().activity;
        assert_eq!(snack.meal_type, Some(MealType::Other));
        assert_eq!(snack.amount, None);
        assert_eq!(snack.portion_size, None);
        assert_eq!(snack.milk_amount, None);

        let mut measured = meal_request(MealType::Other, "16:00");
        measured.amount = Some("60".to_string());
        let measured = service.create_activity(measured).unwrap().activity;
        assert_eq!(measured.amount.as_deref(), Some("60mL"));
    }

    #[test]
    fn test_meal_requires_meal_type() {
        let service = create_test_service();
        let mut meal = meal_request(MealType::Formula, "07:00");
        meal.meal_type = None;

        let err = service.create_activity(meal).unwrap_err();
        assert!(matches!(err, ActivityError::MissingField("mealType")));
    }

    #[test]
    fn test_toddler_food_stores_portion_and_milk() {
        let service = create_test_service();

        let mut lunch = meal_request(MealType::ToddlerFood, "12:00");
        lunch.portion_size = Some(PortionSize::Half);
        lunch.milk_amount = Some("200".to_string());
        let lunch = service.create_activity(lunch).unwrap().activity;

        assert_eq!(lunch.portion_size, Some(PortionSize::Half));
        assert_eq!(lunch.amount.as_deref(), Some("1/2"));
        assert_eq!(lunch.milk_amount.as_deref(), Some("200mL"));

        let dinner = service.create_activity(meal_request(MealType::ToddlerFood, "18:00")).unwrap().activity;
        assert_eq!(dinner.portion_size, Some(PortionSize::Full));
        assert_eq!(dinner.milk_amount.as_deref(), Some("180mL"));
    }

    #[test]
    fn test_fields_of_other_types_are_cleared() {
        let service = create_test_service();
        let mut nap = sleep_request(ActivityType::NapSleep, "12:50", "13:00", "14:00");
        nap.meal_type = Some(MealType::Formula);
        nap.amount = Some("90".to_string());
        nap.start_time = Some("09:00".to_string());

        let nap = service.create_activity(nap).unwrap().activity;
        assert_eq!(nap.meal_type, None);
        assert_eq!(nap.amount, None);
        assert_eq!(nap.start_time, "13:00");
    }

    #[test]
    fn test_update_rederives_fields() {
        let service = create_test_service();
        let created = service
            .create_activity(sleep_request(ActivityType::NapSleep, "12:50", "13:00", "14:00"))
            .unwrap()
            .activity;

        let updated = service
            .update_activity(&created.id, sleep_request(ActivityType::NapSleep, "12:50", "13:10", "14:40"))
            .unwrap()
            .activity;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.start_time, "13:10");
        assert_eq!(updated.duration.as_deref(), Some("1시간 30분"));
        assert_eq!(service.list_activities().unwrap().len(), 1);
    }

    #[test]
    fn test_update_and_delete_missing_activity() {
        let service = create_test_service();

        let err = service
            .update_activity("activity::nope", meal_request(MealType::Formula, "07:00"))
            .unwrap_err();
        assert!(matches!(err, ActivityError::NotFound(_)));

        let err = service.delete_activity("activity::nope").unwrap_err();
        assert!(matches!(err, ActivityError::NotFound(_)));
    }

    #[test]
    fn test_delete_activity() {
        let service = create_test_service();
        let created = service.create_activity(meal_request(MealType::Formula, "07:00")).unwrap().activity;

        let response = service.delete_activity(&created.id).unwrap();
        assert_eq!(response.deleted_id, created.id);
        assert!(matches!(service.get_activity(&created.id), Err(ActivityError::NotFound(_))));
    }

    #[test]
    fn test_list_with_wake_times() {
        let service = create_test_service();
        let mut night = sleep_request(ActivityType::NightSleep, "20:30", "21:00", "06:30");
        night.date = "2024-01-01".to_string();
        service.create_activity(night).unwrap();

        let mut nap = sleep_request(ActivityType::NapSleep, "08:50", "09:00", "10:00");
        nap.date = "2024-01-02".to_string();
        service.create_activity(nap).unwrap();

        let listed = service.list_with_wake_times().unwrap().activities;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].previous_wake_time, None);
        assert_eq!(listed[1].previous_wake_time.as_deref(), Some("2시간 30분"));
    }
}
