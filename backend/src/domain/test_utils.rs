//! Record builders shared by the domain unit tests.

use shared::{ActivityRecord, ActivityType, MealType};

pub fn create_test_activity(id: &str, activity_type: ActivityType, date: &str, start_time: &str) -> ActivityRecord {
    ActivityRecord {
        id: id.to_string(),
        activity_type,
        date: date.to_string(),
        start_time: start_time.to_string(),
        end_time: None,
        duration: None,
        notes: String::new(),
        lay_down_time: None,
        fall_asleep_time: None,
        meal_type: None,
        amount: None,
        milk_amount: None,
        portion_size: None,
    }
}

/// Sleep record logged the way the entry form does: start equals sleep onset
pub fn create_test_sleep(
    id: &str,
    activity_type: ActivityType,
    date: &str,
    lay_down_time: &str,
    fall_asleep_time: &str,
    end_time: &str,
) -> ActivityRecord {
    ActivityRecord {
        end_time: Some(end_time.to_string()),
        lay_down_time: Some(lay_down_time.to_string()),
        fall_asleep_time: Some(fall_asleep_time.to_string()),
        ..create_test_activity(id, activity_type, date, fall_asleep_time)
    }
}

pub fn create_test_meal(id: &str, date: &str, start_time: &str, meal_type: MealType) -> ActivityRecord {
    ActivityRecord {
        meal_type: Some(meal_type),
        amount: Some("120mL".to_string()),
        ..create_test_activity(id, ActivityType::Meal, date, start_time)
    }
}
