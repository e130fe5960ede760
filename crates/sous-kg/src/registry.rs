use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use sous_llm::Tool;

use crate::error::KgError;
use crate::row::render_rows;
use crate::store::GraphStore;

pub const QUERY_TOOL_NAME: &str = "execute_query";
const QUERY_TOOL_DESCRIPTION: &str =
    "Execute a query against the knowledge graph and return the results.";

/// A callable tool: declaration for the model, execution for the loop
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn declaration(&self) -> Tool;

    /// Execute with the raw JSON arguments string the model produced
    async fn call(&self, arguments: &str) -> Result<String>;
}

/// The one registered tool: runs an opaque query and renders the rows
pub struct QueryTool {
    store: Arc<dyn GraphStore>,
}

#[derive(Debug, Deserialize)]
struct QueryArguments {
    query: String,
}

impl QueryTool {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ToolHandler for QueryTool {
    fn declaration(&self) -> Tool {
        Tool::new(
            QUERY_TOOL_NAME,
            QUERY_TOOL_DESCRIPTION,
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The query to run against the knowledge graph"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn call(&self, arguments: &str) -> Result<String> {
        let args: QueryArguments =
            serde_json::from_str(arguments).map_err(KgError::Arguments)?;

        let rows = self.store.execute(&args.query).await?;
        Ok(render_rows(&rows))
    }
}

/// The set of tools the model may invoke during one loop run.
///
/// An explicit configuration object passed into the loop at call time, not a
/// process-wide singleton; multiple registries can coexist.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry with the query tool over the given store
    pub fn for_store(store: Arc<dyn GraphStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(QueryTool::new(store)));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) {
        self.tools.push(tool);
    }

    /// Tool declarations in registration order, in model wire format
    pub fn declarations(&self) -> Vec<Tool> {
        self.tools.iter().map(|tool| tool.declaration()).collect()
    }

    /// Dispatch one invocation by name.
    ///
    /// A name the registry does not know resolves to an empty result string
    /// instead of an error, so a model mistake cannot fail the loop.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String> {
        match self
            .tools
            .iter()
            .find(|tool| tool.declaration().function.name == name)
        {
            Some(tool) => tool.call(arguments).await,
            None => {
                tracing::warn!("unknown tool '{}' requested, returning empty result", name);
                Ok(String::new())
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Row, Scalar};
    use std::collections::BTreeMap;

    struct StaticStore {
        rows: Vec<Row>,
    }

    #[async_trait]
    impl GraphStore for StaticStore {
        async fn execute(&self, _query: &str) -> Result<Vec<Row>, KgError> {
            Ok(self.rows.clone())
        }
    }

    struct FailingStore;

    #[async_trait]
    impl GraphStore for FailingStore {
        async fn execute(&self, _query: &str) -> Result<Vec<Row>, KgError> {
            Err(KgError::Query("syntax error near 'MATCH'".to_string()))
        }
    }

    fn registry_with_rows(rows: Vec<Row>) -> ToolRegistry {
        ToolRegistry::for_store(Arc::new(StaticStore { rows }))
    }

    #[tokio::test]
    async fn declares_single_query_tool() {
        let registry = registry_with_rows(vec![]);
        let declarations = registry.declarations();

        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].function.name, "execute_query");
        assert_eq!(
            declarations[0].function.description.as_deref(),
            Some("Execute a query against the knowledge graph and return the results.")
        );
    }

    #[tokio::test]
    async fn executes_query_tool_and_renders_rows() {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), Scalar::Text("Bibimbap".to_string()));
        let registry = registry_with_rows(vec![row]);

        let result = registry
            .execute("execute_query", r#"{"query": "all recipes"}"#)
            .await
            .unwrap();

        assert_eq!(result, "name: Bibimbap");
    }

    #[tokio::test]
    async fn empty_result_set_uses_sentinel() {
        let registry = registry_with_rows(vec![]);

        let result = registry
            .execute("execute_query", r#"{"query": "no such thing"}"#)
            .await
            .unwrap();

        assert_eq!(result, "Query returned no results.");
    }

    #[tokio::test]
    async fn unknown_tool_resolves_to_empty_result() {
        let registry = registry_with_rows(vec![]);

        let result = registry.execute("fetch_weather", "{}").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_error() {
        let registry = ToolRegistry::for_store(Arc::new(FailingStore));

        let err = registry
            .execute("execute_query", r#"{"query": "MATCH"}"#)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("syntax error"));
    }

    #[tokio::test]
    async fn malformed_arguments_surface_as_error() {
        let registry = registry_with_rows(vec![]);

        let err = registry
            .execute("execute_query", "not json")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Malformed tool arguments"));
    }
}
