//! # Storage Traits
//!
//! Storage abstraction used by the domain layer, so the activity service can
//! be backed by anything that can hold activity records.

use anyhow::Result;
use shared::ActivityRecord;

/// Interface for activity record storage
///
/// All operations are synchronous; implementations guard their own state.
pub trait ActivityStorage: Send + Sync {
    /// Store a new activity. Fails if the id is already taken.
    fn store_activity(&self, activity: &ActivityRecord) -> Result<()>;

    /// Retrieve a specific activity by ID
    fn get_activity(&self, activity_id: &str) -> Result<Option<ActivityRecord>>;

    /// List every stored activity in insertion order
    fn list_activities(&self) -> Result<Vec<ActivityRecord>>;

    /// Replace an existing activity
    /// Returns true if the activity was found and replaced, false otherwise
    fn update_activity(&self, activity: &ActivityRecord) -> Result<bool>;

    /// Delete a single activity
    /// Returns true if the activity was found and deleted, false otherwise
    fn delete_activity(&self, activity_id: &str) -> Result<bool>;
}
