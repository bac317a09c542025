/// Errors raised while logging, editing or deleting activities
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity not found: {0}")]
    NotFound(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{value}' for {field}, expected HH:MM")]
    InvalidTime { field: &'static str, value: String },
    #[error("{0} is required for this activity")]
    MissingField(&'static str),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ActivityError {
    /// True when the caller sent something we cannot accept, as opposed to a lookup or storage failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ActivityError::InvalidDate(_) | ActivityError::InvalidTime { .. } | ActivityError::MissingField(_)
        )
    }
}
