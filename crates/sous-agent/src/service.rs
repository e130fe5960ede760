use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use sous_llm::Message;
use sous_persist::{ConversationStore, MessageLog, MessageRole, PersistError, ThreadStore};

use crate::agent::Agent;
use crate::templates::DEFAULT_SYSTEM_PROMPT;

/// Result of one completed exchange
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub thread_id: String,
    pub response: String,
    pub logs: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AskErrorKind {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Storage failure: {0}")]
    Storage(#[source] PersistError),

    #[error("Model call failed: {0}")]
    Model(String),

    #[error("user turn persisted but assistant turn failed for thread {thread_id}: {source}")]
    PartialPersist {
        thread_id: String,
        #[source]
        source: PersistError,
    },
}

/// A failed `ask`, with the run log accumulated up to the failure
#[derive(Debug)]
pub struct AskError {
    pub kind: AskErrorKind,
    pub logs: Vec<String>,
}

impl AskError {
    fn new(kind: AskErrorKind, logs: Vec<String>) -> Self {
        Self { kind, logs }
    }

    fn from_persist(e: PersistError, logs: Vec<String>) -> Self {
        let kind = match e {
            PersistError::ThreadNotFound(id) => AskErrorKind::ThreadNotFound(id),
            other => AskErrorKind::Storage(other),
        };
        Self::new(kind, logs)
    }
}

impl fmt::Display for AskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for AskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Top-level entry point: resolves the thread, reconstructs context from
/// the stores, runs the loop, and persists the completed exchange.
///
/// Stateless at the process level: every call rebuilds its full context
/// (system prompt + persisted history + new question), so a thread can be
/// resumed across independent invocations. Concurrent calls for the same
/// thread are not coordinated here; callers needing single-writer-per-
/// thread semantics must serialize externally.
pub struct ConversationService {
    store: Arc<dyn ConversationStore>,
    agent: Arc<Agent>,
    system_prompt: String,
}

impl ConversationService {
    pub fn new(store: Arc<dyn ConversationStore>, agent: Arc<Agent>) -> Self {
        Self {
            store,
            agent,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Answer one question on a thread, creating the thread when none is
    /// given. On success exactly one user and one assistant message have
    /// been appended; on failure nothing new is persisted, except the
    /// distinctly-reported partial-persist case.
    pub async fn ask(
        &self,
        question: &str,
        thread_id: Option<String>,
    ) -> Result<AskOutcome, AskError> {
        let thread_id = match thread_id {
            Some(id) => id,
            None => {
                let thread = self
                    .store
                    .create_thread()
                    .await
                    .map_err(|e| AskError::from_persist(e, Vec::new()))?;
                tracing::debug!("created thread {}", thread.id);
                thread.id
            }
        };

        // A caller-supplied id is used as-is; existence is validated once,
        // at the append boundary below
        let history = self
            .store
            .load_history(&thread_id)
            .await
            .map_err(|e| AskError::from_persist(e, Vec::new()))?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(self.system_prompt.clone()));
        for msg in history {
            messages.push(match msg.role {
                MessageRole::User => Message::human(msg.content),
                MessageRole::Assistant => Message::ai(msg.content),
            });
        }
        messages.push(Message::human(question));

        let outcome = self.agent.run(messages).await.map_err(|e| {
            AskError::new(AskErrorKind::Model(format!("{:#}", e.source)), e.log)
        })?;

        self.store
            .append_message(&thread_id, MessageRole::User, question)
            .await
            .map_err(|e| AskError::from_persist(e, outcome.log.clone()))?;

        if let Err(e) = self
            .store
            .append_message(&thread_id, MessageRole::Assistant, &outcome.answer)
            .await
        {
            return Err(AskError::new(
                AskErrorKind::PartialPersist {
                    thread_id,
                    source: e,
                },
                outcome.log,
            ));
        }

        // The exchange is durable at this point; a failed timestamp bump is
        // not worth failing the whole ask over
        if let Err(e) = self.store.touch_thread(&thread_id).await {
            tracing::warn!("failed to touch thread {}: {}", thread_id, e);
        }

        Ok(AskOutcome {
            thread_id,
            response: outcome.answer,
            logs: outcome.log,
        })
    }
}
