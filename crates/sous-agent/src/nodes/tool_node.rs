use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use sous_kg::ToolRegistry;

use crate::node::{Node, NodeKind};
use crate::types::AgentState;

pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Node for ToolNode {
    async fn execute(&self, state: &mut AgentState) -> Result<()> {
        let tool_calls = state.pending_tool_calls();

        if tool_calls.is_empty() {
            return Ok(());
        }

        for tool_call in tool_calls {
            state
                .run_log
                .push(format!("executing tool '{}'", tool_call.function.name));

            match self
                .registry
                .execute(&tool_call.function.name, &tool_call.function.arguments)
                .await
            {
                Ok(result) => {
                    state.add_tool_result(tool_call.id, result);
                }
                Err(e) => {
                    // Tool failed (resilient): feed the failure back as
                    // result text so the model can retry or give up
                    let error_msg = format!("Tool execution failed: {:#}", e);
                    state.run_log.push(error_msg.clone());
                    state.add_tool_result(tool_call.id, error_msg);
                }
            }
        }

        Ok(())
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Tool
    }
}
