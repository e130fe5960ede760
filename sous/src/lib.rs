//! # Sous
//!
//! Backend for asking natural-language questions about a graph-structured
//! knowledge base (recipes, preferences, meal plans). A chat model decides,
//! turn by turn, whether to run structured queries against the graph store
//! through the `execute_query` tool; the loop feeds results back until the
//! model emits a final answer or the model-call ceiling forces one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sous::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Model client
//!     let chat_client = Arc::new(OpenAIClient::new(
//!         std::env::var("OPENAI_API_KEY")?
//!     )?);
//!
//!     // Graph store + the single query tool
//!     let graph_store = Arc::new(HttpGraphStore::new("http://localhost:7474/query")?);
//!     let registry = Arc::new(ToolRegistry::for_store(graph_store));
//!
//!     // The bounded loop
//!     let agent = Agent::builder()
//!         .chat_client(chat_client)
//!         .registry(registry)
//!         .config(AgentConfig::default())
//!         .llm(LlmSettings::new("gpt-4o"))
//!         .build()?;
//!
//!     // Thread persistence + the service
//!     let store = Arc::new(MemoryStore::new());
//!     let service = ConversationService::new(store, Arc::new(agent));
//!
//!     let outcome = service.ask("What seasonal recipes do you have?", None).await?;
//!     println!("[{}] {}", outcome.thread_id, outcome.response);
//!
//!     Ok(())
//! }
//! ```

pub use sous_agent as agent;
pub use sous_kg as kg;
pub use sous_llm as llm;
pub use sous_persist as persist;

pub mod prelude;
