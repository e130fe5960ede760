use thiserror::Error;

#[derive(Error, Debug)]
pub enum KgError {
    #[error("Invalid graph store endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Graph store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Malformed tool arguments: {0}")]
    Arguments(#[from] serde_json::Error),
}
