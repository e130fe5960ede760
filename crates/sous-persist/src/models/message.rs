use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted turn in a thread.
///
/// `seq` is a per-thread counter assigned at append time; it breaks ties
/// between messages written within the same instant, so `(created_at, seq)`
/// is a total order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub content: String,
    pub seq: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}
