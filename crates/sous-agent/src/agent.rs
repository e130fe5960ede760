use std::fmt;
use std::sync::Arc;

use sous_kg::ToolRegistry;
use sous_llm::{ChatClient, Message};

use crate::node::{Node, NodeKind};
use crate::nodes::{LlmNode, ToolNode};
use crate::router::{NextStep, Router, SimpleRouter};
use crate::types::{AgentConfig, AgentState, LlmSettings};

/// Result of one completed loop run
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Final answer text. May be empty when the run was cut off at the
    /// ceiling before the model produced any text.
    pub answer: String,
    /// Trace of every step taken, oldest first
    pub log: Vec<String>,
}

/// A loop run that failed before producing final text.
///
/// Carries the run log accumulated up to the failure so callers can
/// diagnose without guessing.
#[derive(Debug)]
pub struct LoopError {
    pub log: Vec<String>,
    pub source: anyhow::Error,
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent loop failed: {:#}", self.source)
    }
}

impl std::error::Error for LoopError {}

/// The orchestration core: drives a bounded back-and-forth between the
/// model and the tool registry until the model emits final text or the
/// model-call ceiling forces termination.
///
/// Strictly sequential: each model call depends on the previous tool
/// results, and nothing in here retries on its own.
pub struct Agent {
    client: Arc<dyn ChatClient>,
    registry: Arc<ToolRegistry>,
    config: AgentConfig,
    llm: LlmSettings,
}

impl Agent {
    pub fn new(
        client: Arc<dyn ChatClient>,
        registry: Arc<ToolRegistry>,
        config: AgentConfig,
        llm: LlmSettings,
    ) -> Self {
        Self {
            client,
            registry,
            config,
            llm,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> crate::builder::AgentBuilder {
        crate::builder::AgentBuilder::new()
    }

    /// Run the loop over a prepared message sequence (system prompt, prior
    /// history oldest-first, new question last).
    pub async fn run(&self, messages: Vec<Message>) -> Result<AgentOutcome, LoopError> {
        let mut state = AgentState::new(messages, self.llm.clone());
        tracing::debug!("starting loop run {}", state.run_id);

        let llm_node = LlmNode::new(Arc::clone(&self.client), Arc::clone(&self.registry));
        let tool_node = ToolNode::new(Arc::clone(&self.registry));
        let router = SimpleRouter;

        let mut current = NodeKind::Llm;

        loop {
            // Guardrail: every model call is a paid external call, so the
            // ceiling ends the run with whatever text exists
            if current == NodeKind::Llm && state.model_calls >= self.config.max_model_calls {
                let line = format!(
                    "model call ceiling ({}) reached, stopping with best-effort answer",
                    self.config.max_model_calls
                );
                tracing::warn!("{}", line);
                state.run_log.push(line);
                break;
            }

            let step = match current {
                NodeKind::Llm => llm_node.execute(&mut state).await,
                NodeKind::Tool => tool_node.execute(&mut state).await,
            };

            if let Err(e) = step {
                state.run_log.push(format!("run aborted: {:#}", e));
                return Err(LoopError {
                    log: state.run_log.into_entries(),
                    source: e,
                });
            }

            match router.next(&state, current) {
                NextStep::End => break,
                NextStep::Llm => current = NodeKind::Llm,
                NextStep::Tool => current = NodeKind::Tool,
            }
        }

        let answer = state.last_assistant_text().unwrap_or_default().to_string();

        Ok(AgentOutcome {
            answer,
            log: state.run_log.into_entries(),
        })
    }
}
