use sous_llm::{Message, ToolCall};

use super::config::LlmSettings;
use super::log::RunLog;

/// In-memory state of one loop run.
///
/// The message sequence grows as the run progresses (assistant turns, tool
/// results); only the final user/assistant pair ever reaches the message
/// log, the rest lives and dies with this struct.
#[derive(Debug, Clone)]
pub struct AgentState {
    pub run_id: String,
    pub messages: Vec<Message>,
    pub llm: LlmSettings,
    pub run_log: RunLog,
    pub model_calls: usize,
}

impl AgentState {
    pub fn new(messages: Vec<Message>, llm: LlmSettings) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            messages,
            llm,
            run_log: RunLog::new(),
            model_calls: 0,
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn has_pending_tool_calls(&self) -> bool {
        match self.last_message() {
            Some(Message::AI { tool_calls, .. }) => tool_calls
                .as_ref()
                .map(|calls| !calls.is_empty())
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn pending_tool_calls(&self) -> Vec<ToolCall> {
        match self.last_message() {
            Some(Message::AI {
                tool_calls: Some(calls),
                ..
            }) => calls.clone(),
            _ => Vec::new(),
        }
    }

    pub fn add_tool_result(&mut self, tool_call_id: String, result: String) {
        self.messages.push(Message::tool_result(tool_call_id, result));
    }

    /// Most recent assistant text, used as the best-effort answer when the
    /// run is cut off at the ceiling
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|msg| match msg {
            Message::AI {
                content: Some(content),
                ..
            } => Some(content.as_str()),
            _ => None,
        })
    }
}
