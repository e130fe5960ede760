//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use sous::prelude::*;
//! ```

pub use sous_agent::{
    Agent, AgentBuilder, AgentConfig, AgentOutcome, AskError, AskErrorKind, AskOutcome,
    ConversationService, LlmSettings, LoopError, RunLog, DEFAULT_SYSTEM_PROMPT,
};
pub use sous_kg::{
    render_rows, GraphStore, HttpGraphStore, KgError, QueryTool, Row, Scalar, ToolHandler,
    ToolRegistry, NO_RESULTS,
};
pub use sous_llm::{
    ChatClient, ChatOptions, ChatRequest, ChatResponse, Message, OpenAIClient, Tool, ToolCall,
    ToolChoice,
};
pub use sous_persist::{
    ConversationStore, MemoryStore, MessageLog, MessageRole, PersistError, StoredMessage, Thread,
    ThreadStatus, ThreadStore,
};

#[cfg(feature = "mongodb")]
pub use sous_persist::MongoStore;
