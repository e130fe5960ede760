use anyhow::Result;
use async_trait::async_trait;

use crate::types::AgentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Llm,
    Tool,
}

/// One step of the loop: reads and mutates the run state
#[async_trait]
pub trait Node: Send + Sync {
    async fn execute(&self, state: &mut AgentState) -> Result<()>;

    fn kind(&self) -> NodeKind;
}
