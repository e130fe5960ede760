#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use sous_kg::{GraphStore, KgError, Row, Scalar};
use sous_llm::{ChatClient, ChatRequest, ChatResponse, FunctionCall, ToolCall};
use sous_persist::{
    MemoryStore, MessageLog, MessageRole, PersistError, StoredMessage, Thread, ThreadStore,
};

// ---------------------------------------------------------------------------
// Chat client doubles
// ---------------------------------------------------------------------------

pub fn text_response(text: &str) -> ChatResponse {
    ChatResponse {
        content: Some(text.to_string()),
        tool_calls: None,
        usage: None,
        finish_reason: Some("stop".to_string()),
    }
}

pub fn tool_call_response(id: &str, name: &str, arguments: &str) -> ChatResponse {
    ChatResponse {
        content: None,
        tool_calls: Some(vec![ToolCall {
            id: id.to_string(),
            tool_type: "function".to_string(),
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }]),
        usage: None,
        finish_reason: Some("tool_calls".to_string()),
    }
}

/// Plays back a fixed script of completions and records every request
pub struct ScriptedChatClient {
    responses: Mutex<VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChatClient {
    pub fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Message counts of each recorded request, in call order
    pub fn request_message_counts(&self) -> Vec<usize> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages.len())
            .collect()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("scripted client ran out of responses"))
    }
}

/// Requests the same tool call on every turn, never emits final text
pub struct LoopingChatClient {
    calls: AtomicUsize,
}

impl LoopingChatClient {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatClient for LoopingChatClient {
    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(tool_call_response(
            &format!("call_{}", n),
            "execute_query",
            r#"{"query": "more recipes"}"#,
        ))
    }
}

/// Fails every call, as an unreachable model endpoint would
pub struct FailingChatClient;

#[async_trait]
impl ChatClient for FailingChatClient {
    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
        Err(anyhow!("connection refused"))
    }
}

// ---------------------------------------------------------------------------
// Graph store doubles
// ---------------------------------------------------------------------------

pub struct StaticStore {
    rows: Vec<Row>,
}

impl StaticStore {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl GraphStore for StaticStore {
    async fn execute(&self, _query: &str) -> Result<Vec<Row>, KgError> {
        Ok(self.rows.clone())
    }
}

pub struct FailingGraphStore;

#[async_trait]
impl GraphStore for FailingGraphStore {
    async fn execute(&self, _query: &str) -> Result<Vec<Row>, KgError> {
        Err(KgError::Query("unknown label 'Recipie'".to_string()))
    }
}

pub fn recipe_row(name: &str, season: &str) -> Row {
    let mut row = BTreeMap::new();
    row.insert("name".to_string(), Scalar::Text(name.to_string()));
    row.insert("season".to_string(), Scalar::Text(season.to_string()));
    row
}

pub fn seasonal_rows() -> Vec<Row> {
    vec![
        recipe_row("Butternut Squash Soup", "autumn"),
        recipe_row("Asparagus Risotto", "spring"),
        recipe_row("Peach Galette", "summer"),
    ]
}

// ---------------------------------------------------------------------------
// Persistence doubles
// ---------------------------------------------------------------------------

/// Delegates to a MemoryStore but starts failing appends after a limit,
/// for exercising the partial-persist path
pub struct FlakyStore {
    inner: MemoryStore,
    appends: AtomicUsize,
    fail_from: usize,
}

impl FlakyStore {
    pub fn failing_from(fail_from: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            appends: AtomicUsize::new(0),
            fail_from,
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl ThreadStore for FlakyStore {
    async fn create_thread(&self) -> sous_persist::Result<Thread> {
        self.inner.create_thread().await
    }

    async fn touch_thread(&self, thread_id: &str) -> sous_persist::Result<()> {
        self.inner.touch_thread(thread_id).await
    }

    async fn thread_exists(&self, thread_id: &str) -> sous_persist::Result<bool> {
        self.inner.thread_exists(thread_id).await
    }

    async fn get_thread(&self, thread_id: &str) -> sous_persist::Result<Option<Thread>> {
        self.inner.get_thread(thread_id).await
    }
}

#[async_trait]
impl MessageLog for FlakyStore {
    async fn append_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> sous_persist::Result<StoredMessage> {
        let n = self.appends.fetch_add(1, Ordering::SeqCst);
        if n >= self.fail_from {
            return Err(PersistError::Connection("store went away".to_string()));
        }
        self.inner.append_message(thread_id, role, content).await
    }

    async fn load_history(&self, thread_id: &str) -> sous_persist::Result<Vec<StoredMessage>> {
        self.inner.load_history(thread_id).await
    }
}
