use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoMessage;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoMessageRepository {
    collection: Collection<MongoMessage>,
}

impl MongoMessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("messages");
        Self { collection }
    }

    /// Save a single message
    pub async fn save_message(&self, message: &MongoMessage) -> Result<()> {
        self.collection.insert_one(message).await?;
        Ok(())
    }

    /// Get all messages for a thread in append order
    pub async fn get_messages(&self, thread_id: &str) -> Result<Vec<MongoMessage>> {
        let filter = doc! { "thread_id": thread_id };
        let messages = self
            .collection
            .find(filter)
            .sort(doc! { "created_at": 1, "seq": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages)
    }
}
