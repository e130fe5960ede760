pub mod dbs;
pub mod error;
pub mod models;
pub mod store;

pub use dbs::memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoStore;
pub use error::{PersistError, Result};
pub use models::{MessageRole, StoredMessage, Thread, ThreadStatus};
pub use store::{ConversationStore, MessageLog, ThreadStore};
