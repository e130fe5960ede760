mod message;
mod thread;

pub use message::{MessageRole, StoredMessage};
pub use thread::{Thread, ThreadStatus};
