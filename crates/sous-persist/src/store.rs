use async_trait::async_trait;

use crate::error::Result;
use crate::models::{MessageRole, StoredMessage, Thread};

/// Creates and validates conversation threads
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Allocate a new thread with status `active` and
    /// `created_at = updated_at = now`
    async fn create_thread(&self) -> Result<Thread>;

    /// Move `updated_at` forward, never backward. Touching a thread that
    /// does not exist is a silent no-op.
    async fn touch_thread(&self, thread_id: &str) -> Result<()>;

    async fn thread_exists(&self, thread_id: &str) -> Result<bool>;

    async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>>;
}

/// Append-only, per-thread ordered log of chat turns
#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Append one turn. Fails with `ThreadNotFound` for an unknown thread.
    /// Appends for one thread sort after all earlier appends, even within
    /// the same millisecond.
    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage>;

    /// All messages for the thread in ascending `(created_at, seq)` order.
    /// A thread with no history yields an empty vec, not an error.
    async fn load_history(&self, thread_id: &str) -> Result<Vec<StoredMessage>>;
}

/// Convenience trait for stores that provide both halves
pub trait ConversationStore: ThreadStore + MessageLog {}

impl<T: ThreadStore + MessageLog> ConversationStore for T {}
