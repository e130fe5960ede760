use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::KgError;
use crate::row::Row;

/// Executes one opaque query against the external graph store.
///
/// Trust boundary: the query text is forwarded exactly as received. It is
/// chosen by the model, constrained only by the system prompt, and this
/// component performs no validation or sanitization. Access control is the
/// store account's job, not this client's.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Vec<Row>, KgError>;
}

/// HTTP client for the graph store's query endpoint.
///
/// Speaks a minimal wire format: `POST { "query": "<text>" }`, answered
/// with `{ "rows": [ { "<column>": <scalar>, ... }, ... ] }`. Failures come
/// back as a non-2xx status whose body is the store's error message.
pub struct HttpGraphStore {
    http_client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    rows: Vec<Row>,
}

impl HttpGraphStore {
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, KgError> {
        let endpoint = Url::parse(endpoint.as_ref())?;

        Ok(Self {
            http_client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl GraphStore for HttpGraphStore {
    async fn execute(&self, query: &str) -> Result<Vec<Row>, KgError> {
        tracing::debug!(target: "sous_kg", "executing graph query");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(KgError::Query(format!("({}) {}", status, error_text)));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| KgError::Query(format!("malformed store response: {}", e)))?;

        Ok(body.rows)
    }
}
