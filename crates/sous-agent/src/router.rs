use crate::node::NodeKind;
use crate::types::AgentState;

/// Decides which node to execute next based on current state
pub trait Router: Send + Sync {
    fn next(&self, state: &AgentState, current: NodeKind) -> NextStep;
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    Llm,
    Tool,
    End,
}

/// React-style routing:
/// LLM -> Tool (if tool calls pending) -> LLM -> ... -> END
pub struct SimpleRouter;

impl Router for SimpleRouter {
    fn next(&self, state: &AgentState, current: NodeKind) -> NextStep {
        match current {
            NodeKind::Llm => {
                if state.has_pending_tool_calls() {
                    NextStep::Tool
                } else {
                    NextStep::End
                }
            }
            // Always hand tool results back to the model
            NodeKind::Tool => NextStep::Llm,
        }
    }
}
