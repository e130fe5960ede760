use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use sous_agent::{AskError, AskErrorKind};
use sous_persist::PersistError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("{message}")]
    AskFailed {
        message: String,
        logs: Vec<String>,
    },

    #[error("Storage failure: {0}")]
    Storage(#[from] PersistError),
}

impl From<AskError> for ApiError {
    fn from(e: AskError) -> Self {
        match e.kind {
            AskErrorKind::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
            kind => ApiError::AskFailed {
                message: kind.to_string(),
                logs: e.logs,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::ThreadNotFound(id) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": format!("Thread not found: {}", id) }),
            ),
            ApiError::AskFailed { message, logs } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                // The run log up to the failure, so callers can diagnose
                serde_json::json!({ "error": message, "logs": logs }),
            ),
            ApiError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": e.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
