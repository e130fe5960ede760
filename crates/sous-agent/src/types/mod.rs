mod config;
mod log;
mod state;

pub use config::{AgentConfig, LlmSettings, DEFAULT_MAX_MODEL_CALLS};
pub use log::RunLog;
pub use state::AgentState;
