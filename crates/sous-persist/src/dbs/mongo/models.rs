use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{MessageRole, StoredMessage, Thread, ThreadStatus};

/// MongoDB-specific thread document.
///
/// Carries `next_seq`, the per-thread append counter, which the
/// database-agnostic model does not expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThread {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: ThreadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub next_seq: i64,
}

/// MongoDB-specific message document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: String,
    pub thread_id: String,
    pub role: MessageRole,
    pub content: String,
    pub seq: i64,
    pub created_at: DateTime<Utc>,
}

impl MongoMessage {
    pub fn new(thread_id: &str, role: MessageRole, content: &str, seq: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.to_string(),
            role,
            content: content.to_string(),
            seq,
            created_at: Utc::now(),
        }
    }
}

// Conversions between database-agnostic and MongoDB-specific models

impl From<Thread> for MongoThread {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            status: thread.status,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
            next_seq: 0,
        }
    }
}

impl From<MongoThread> for Thread {
    fn from(thread: MongoThread) -> Self {
        Self {
            id: thread.id,
            status: thread.status,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        }
    }
}

impl From<MongoMessage> for StoredMessage {
    fn from(msg: MongoMessage) -> Self {
        Self {
            id: msg.id,
            thread_id: msg.thread_id,
            role: msg.role,
            content: msg.content,
            seq: msg.seq,
            created_at: msg.created_at,
        }
    }
}
