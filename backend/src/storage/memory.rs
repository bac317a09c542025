use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, bail, Result};
use shared::ActivityRecord;
use tracing::debug;

use super::traits::ActivityStorage;

/// Process-local activity store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityStore {
    records: Arc<Mutex<Vec<ActivityRecord>>>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_records(records: Vec<ActivityRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ActivityRecord>>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("Activity store lock poisoned"))
    }
}

impl ActivityStorage for InMemoryActivityStore {
    fn store_activity(&self, activity: &ActivityRecord) -> Result<()> {
        let mut records = self.lock()?;
        if records.iter().any(|r| r.id == activity.id) {
            bail!("Activity already exists: {}", activity.id);
        }
        records.push(activity.clone());
        debug!("Stored activity {} ({} total)", activity.id, records.len());
        Ok(())
    }

    fn get_activity(&self, activity_id: &str) -> Result<Option<ActivityRecord>> {
        let records = self.lock()?;
        Ok(records.iter().find(|r| r.id == activity_id).cloned())
    }

    fn list_activities(&self) -> Result<Vec<ActivityRecord>> {
        Ok(self.lock()?.clone())
    }

    fn update_activity(&self, activity: &ActivityRecord) -> Result<bool> {
        let mut records = self.lock()?;
        match records.iter_mut().find(|r| r.id == activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_activity(&self, activity_id: &str) -> Result<bool> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|r| r.id != activity_id);
        Ok(records.len() < before)
    }
}
