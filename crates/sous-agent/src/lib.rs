pub mod agent;
pub mod builder;
pub mod node;
pub mod nodes;
pub mod router;
pub mod service;
pub mod templates;
pub mod types;

pub use agent::{Agent, AgentOutcome, LoopError};
pub use builder::AgentBuilder;
pub use node::{Node, NodeKind};
pub use router::{NextStep, Router, SimpleRouter};
pub use service::{AskError, AskErrorKind, AskOutcome, ConversationService};
pub use templates::DEFAULT_SYSTEM_PROMPT;
pub use types::{AgentConfig, AgentState, LlmSettings, RunLog, DEFAULT_MAX_MODEL_CALLS};
