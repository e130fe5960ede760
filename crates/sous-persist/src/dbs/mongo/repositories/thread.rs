use chrono::Utc;
use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::MongoThread;
use crate::error::Result;
use crate::models::Thread;

#[derive(Clone)]
pub struct MongoThreadRepository {
    collection: Collection<MongoThread>,
}

impl MongoThreadRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("threads");
        Self { collection }
    }

    /// Create a new thread
    pub async fn create_thread(&self) -> Result<Thread> {
        let thread = Thread::new();

        let doc = MongoThread::from(thread.clone());
        self.collection.insert_one(&doc).await?;

        Ok(thread)
    }

    pub async fn thread_exists(&self, thread_id: &str) -> Result<bool> {
        let filter = doc! { "_id": thread_id };
        Ok(self.collection.find_one(filter).await?.is_some())
    }

    /// Get thread by ID
    pub async fn get_thread(&self, thread_id: &str) -> Result<Option<Thread>> {
        let filter = doc! { "_id": thread_id };
        Ok(self.collection.find_one(filter).await?.map(Thread::from))
    }

    /// Touch thread (update updated_at). Matching zero documents is fine.
    pub async fn touch_thread(&self, thread_id: &str) -> Result<()> {
        let filter = doc! { "_id": thread_id };
        let update = doc! { "$set": { "updated_at": bson::to_bson(&Utc::now())? } };
        self.collection.update_one(filter, update).await?;
        Ok(())
    }

    /// Claim the next append sequence number for the thread.
    ///
    /// Returns `None` when the thread does not exist. The returned value is
    /// the pre-increment counter, so concurrent appends get distinct,
    /// increasing numbers.
    pub async fn allocate_seq(&self, thread_id: &str) -> Result<Option<i64>> {
        let filter = doc! { "_id": thread_id };
        let update = doc! { "$inc": { "next_seq": 1 } };

        let thread = self
            .collection
            .find_one_and_update(filter, update)
            .await?;

        Ok(thread.map(|t| t.next_seq))
    }
}
