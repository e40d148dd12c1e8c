use chrono::{DateTime, Utc};
use serde::Serialize;

/// One entry of a chromatogram's edit history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditInformation {
    /// When the edit happened (millisecond precision on disk)
    pub date: DateTime<Utc>,
    /// What was done
    pub description: String,
}

impl EditInformation {
    /// New entry
    pub fn new(date: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }

    /// Entry stamped with the current time, truncated to milliseconds
    pub fn now(description: impl Into<String>) -> Self {
        let now = Utc::now();
        let date = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Self::new(date, description)
    }
}
