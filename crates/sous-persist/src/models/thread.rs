use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted conversation identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub status: ThreadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadStatus {
    Active,
}

impl Thread {
    /// Allocate a fresh active thread. `updated_at` starts equal to
    /// `created_at` and only moves forward afterwards.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            status: ThreadStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Thread {
    fn default() -> Self {
        Self::new()
    }
}
