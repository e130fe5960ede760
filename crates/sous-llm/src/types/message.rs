use serde::{Deserialize, Serialize};

use super::tool::ToolCall;

/// Chat message types (high-level, provider-agnostic)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// System prompt (instructions)
    System { content: String },

    /// User/Human message
    #[serde(rename = "user")]
    Human { content: String },

    /// Assistant/AI message
    #[serde(rename = "assistant")]
    AI {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },

    /// Tool result message
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    /// Create system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// Create human message
    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    /// Create AI message with text
    pub fn ai(content: impl Into<String>) -> Self {
        Self::AI {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create AI message with tool calls
    pub fn ai_with_tools(tool_calls: Vec<ToolCall>) -> Self {
        Self::AI {
            content: None,
            tool_calls: Some(tool_calls),
        }
    }

    /// Create tool result message
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } => "user",
            Self::AI { .. } => "assistant",
            Self::Tool { .. } => "tool",
        }
    }
}
