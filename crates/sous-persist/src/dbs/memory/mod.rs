use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{PersistError, Result};
use crate::models::{MessageRole, StoredMessage, Thread};
use crate::store::{MessageLog, ThreadStore};

/// In-memory store used by tests and mongodb-feature-off builds.
///
/// Same contract as the MongoDB store: append-only messages ordered by
/// `(created_at, seq)`, threads touched forward only.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    threads: HashMap<String, Thread>,
    messages: HashMap<String, Vec<StoredMessage>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThreadStore for MemoryStore {
    async fn create_thread(&self) -> Result<Thread> {
        let thread = Thread::new();

        let mut inner = self.inner.write().await;
        inner.threads.insert(thread.id.clone(), thread.clone());

        Ok(thread)
    }

    async fn touch_thread(&self, thread_id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;

        if let Some(thread) = inner.threads.get_mut(thread_id) {
            // updated_at never moves backward, even across clock adjustments
            thread.updated_at = thread.updated_at.max(Utc::now());
        }

        Ok(())
    }

    async fn thread_exists(&self, thread_id: &str) -> Result<bool> {
        let inner = self.inner.read().await;
        Ok(inner.threads.contains_key(thread_id))
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        let inner = self.inner.read().await;
        Ok(inner.threads.get(thread_id).cloned())
    }
}

#[async_trait]
impl MessageLog for MemoryStore {
    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage> {
        let mut inner = self.inner.write().await;

        if !inner.threads.contains_key(thread_id) {
            return Err(PersistError::ThreadNotFound(thread_id.to_string()));
        }

        let log = inner.messages.entry(thread_id.to_string()).or_default();
        let message = StoredMessage {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.to_string(),
            role,
            content: content.to_string(),
            seq: log.len() as i64,
            created_at: Utc::now(),
        };
        log.push(message.clone());

        Ok(message)
    }

    async fn load_history(&self, thread_id: &str) -> Result<Vec<StoredMessage>> {
        let inner = self.inner.read().await;
        Ok(inner.messages.get(thread_id).cloned().unwrap_or_default())
    }
}
