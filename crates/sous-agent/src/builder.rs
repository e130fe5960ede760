use std::sync::Arc;

use anyhow::{anyhow, Result};

use sous_kg::ToolRegistry;
use sous_llm::ChatClient;

use crate::agent::Agent;
use crate::types::{AgentConfig, LlmSettings};

/// Builder for constructing an Agent with optional components
pub struct AgentBuilder {
    client: Option<Arc<dyn ChatClient>>,
    registry: Option<Arc<ToolRegistry>>,
    config: AgentConfig,
    llm: LlmSettings,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            registry: None,
            config: AgentConfig::default(),
            llm: LlmSettings::default(),
        }
    }

    /// Set the chat model client
    pub fn chat_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the tool registry
    pub fn registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the loop configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the model settings
    pub fn llm(mut self, llm: LlmSettings) -> Self {
        self.llm = llm;
        self
    }

    /// Build the Agent
    pub fn build(self) -> Result<Agent> {
        let client = self
            .client
            .ok_or_else(|| anyhow!("chat client is required"))?;
        let registry = self
            .registry
            .ok_or_else(|| anyhow!("tool registry is required"))?;

        Ok(Agent::new(client, registry, self.config, self.llm))
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
