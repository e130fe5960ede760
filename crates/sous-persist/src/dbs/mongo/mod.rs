pub mod models;
pub mod repositories;

use async_trait::async_trait;
use mongodb::Client;

use crate::error::{PersistError, Result};
use crate::models::{MessageRole, StoredMessage, Thread};
use crate::store::{MessageLog, ThreadStore};

use models::MongoMessage;
use repositories::{MongoMessageRepository, MongoThreadRepository};

/// MongoDB-backed conversation store
pub struct MongoStore {
    thread_repo: MongoThreadRepository,
    message_repo: MongoMessageRepository,
}

impl MongoStore {
    /// Connect to MongoDB and create the store
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let thread_repo = MongoThreadRepository::new(&client, database);
        let message_repo = MongoMessageRepository::new(&client, database);

        tracing::debug!("connected to MongoDB database '{}'", database);

        Ok(Self {
            thread_repo,
            message_repo,
        })
    }
}

#[async_trait]
impl ThreadStore for MongoStore {
    async fn create_thread(&self) -> Result<Thread> {
        self.thread_repo.create_thread().await
    }

    async fn touch_thread(&self, thread_id: &str) -> Result<()> {
        self.thread_repo.touch_thread(thread_id).await
    }

    async fn thread_exists(&self, thread_id: &str) -> Result<bool> {
        self.thread_repo.thread_exists(thread_id).await
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        self.thread_repo.get_thread(thread_id).await
    }
}

#[async_trait]
impl MessageLog for MongoStore {
    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<StoredMessage> {
        // The per-thread counter lives on the thread document; allocating it
        // with $inc also doubles as the existence check.
        let seq = self
            .thread_repo
            .allocate_seq(thread_id)
            .await?
            .ok_or_else(|| PersistError::ThreadNotFound(thread_id.to_string()))?;

        let message = MongoMessage::new(thread_id, role, content, seq);
        self.message_repo.save_message(&message).await?;

        Ok(message.into())
    }

    async fn load_history(&self, thread_id: &str) -> Result<Vec<StoredMessage>> {
        let messages = self.message_repo.get_messages(thread_id).await?;
        Ok(messages.into_iter().map(StoredMessage::from).collect())
    }
}
