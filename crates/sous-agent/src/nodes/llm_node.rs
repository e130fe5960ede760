use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use sous_kg::ToolRegistry;
use sous_llm::{ChatClient, ChatOptions, ChatRequest, Message, ToolChoice};

use crate::node::{Node, NodeKind};
use crate::types::AgentState;

pub struct LlmNode {
    client: Arc<dyn ChatClient>,
    registry: Arc<ToolRegistry>,
}

impl LlmNode {
    pub fn new(client: Arc<dyn ChatClient>, registry: Arc<ToolRegistry>) -> Self {
        Self { client, registry }
    }

    fn build_request(&self, state: &AgentState) -> ChatRequest {
        let mut options = ChatOptions::new()
            .tools(self.registry.declarations())
            .tool_choice(ToolChoice::auto());

        if let Some(temp) = state.llm.temperature {
            options = options.temperature(temp);
        }
        if let Some(max_tokens) = state.llm.max_tokens {
            options = options.max_tokens(max_tokens);
        }

        ChatRequest::new(state.llm.model.clone(), state.messages.clone()).with_options(options)
    }
}

#[async_trait]
impl Node for LlmNode {
    async fn execute(&self, state: &mut AgentState) -> Result<()> {
        let request = self.build_request(state);

        let response = self
            .client
            .chat(request)
            .await
            .context("model call failed")?;

        state.model_calls += 1;

        let tool_calls = response
            .tool_calls
            .filter(|calls| !calls.is_empty());

        if let Some(calls) = &tool_calls {
            for call in calls {
                state.run_log.push(format!(
                    "model requested tool '{}' with arguments {}",
                    call.function.name, call.function.arguments
                ));
            }
        }

        state.add_message(Message::AI {
            content: response.content,
            tool_calls,
        });

        Ok(())
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Llm
    }
}
