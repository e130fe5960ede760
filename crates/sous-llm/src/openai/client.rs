// OpenAI-specific client implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};
use crate::types::{Message, ToolCall};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAIClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Invalid API key format")?,
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: OPENAI_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (proxies, compatible endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build chat completion request payload
    fn build_chat_request(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: &ChatOptions,
    ) -> Result<Value> {
        let openai_messages: Vec<Value> = messages
            .into_iter()
            .map(convert_message)
            .collect::<Result<Vec<_>>>()?;

        let mut request = serde_json::json!({
            "model": model,
            "messages": openai_messages,
        });

        let obj = request.as_object_mut().unwrap();

        if let Some(temp) = options.temperature {
            obj.insert("temperature".to_string(), serde_json::json!(temp));
        }
        if let Some(max_tokens) = options.max_tokens {
            obj.insert("max_tokens".to_string(), serde_json::json!(max_tokens));
        }
        if let Some(tools) = &options.tools {
            obj.insert("tools".to_string(), serde_json::to_value(tools)?);
        }
        if let Some(tool_choice) = &options.tool_choice {
            obj.insert("tool_choice".to_string(), serde_json::to_value(tool_choice)?);
        }

        Ok(request)
    }
}

/// Convert our Message type to OpenAI format
fn convert_message(message: Message) -> Result<Value> {
    match message {
        Message::System { content } => Ok(serde_json::json!({
            "role": "system",
            "content": content,
        })),
        Message::Human { content } => Ok(serde_json::json!({
            "role": "user",
            "content": content,
        })),
        Message::AI {
            content,
            tool_calls,
        } => {
            let mut obj = serde_json::json!({
                "role": "assistant",
            });

            let map = obj.as_object_mut().unwrap();

            if let Some(content) = content {
                map.insert("content".to_string(), serde_json::json!(content));
            }

            if let Some(tool_calls) = tool_calls {
                map.insert("tool_calls".to_string(), serde_json::to_value(tool_calls)?);
            }

            Ok(obj)
        }
        Message::Tool {
            tool_call_id,
            content,
        } => Ok(serde_json::json!({
            "role": "tool",
            "tool_call_id": tool_call_id,
            "content": content,
        })),
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        tracing::debug!("chat completion request, model={}", request.model);

        let payload =
            self.build_chat_request(&request.model, request.messages, &request.options)?;

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, error_text);
        }

        let raw: OpenAIChatResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        // Convert to provider-agnostic response
        let choice = raw.choices.into_iter().next();
        Ok(ChatResponse {
            content: choice.as_ref().and_then(|c| c.message.content.clone()),
            tool_calls: choice.as_ref().and_then(|c| c.message.tool_calls.clone()),
            usage: raw.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.and_then(|c| c.finish_reason),
        })
    }
}

// ============================================================================
// OPENAI-SPECIFIC RESPONSE TYPES (for Chat Completions)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionCall, Message};

    #[test]
    fn converts_tool_result_message() {
        let msg = Message::tool_result("call_1", "3 rows");
        let value = convert_message(msg).unwrap();

        assert_eq!(value["role"], "tool");
        assert_eq!(value["tool_call_id"], "call_1");
        assert_eq!(value["content"], "3 rows");
    }

    #[test]
    fn assistant_message_keeps_tool_calls() {
        let msg = Message::ai_with_tools(vec![ToolCall {
            id: "call_1".to_string(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: "execute_query".to_string(),
                arguments: "{\"query\":\"MATCH recipes\"}".to_string(),
            },
        }]);
        let value = convert_message(msg).unwrap();

        assert_eq!(value["role"], "assistant");
        assert!(value.get("content").is_none());
        assert_eq!(value["tool_calls"][0]["function"]["name"], "execute_query");
    }

    #[test]
    fn parses_chat_response_body() {
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{
                "message": {"content": "Here you go", "tool_calls": null},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });

        let raw: OpenAIChatResponse = serde_json::from_value(body).unwrap();
        assert_eq!(raw.choices[0].message.content.as_deref(), Some("Here you go"));
        assert_eq!(raw.usage.as_ref().unwrap().total_tokens, 15);
    }
}
