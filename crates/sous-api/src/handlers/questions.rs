use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuestionRequest {
    pub question: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuestionResponse {
    pub logs: Vec<String>,
    pub response: String,
    pub thread_id: String,
}

/// Answer one question, resuming the given thread or starting a new one
pub async fn post_question(
    State(state): State<AppState>,
    Json(req): Json<PostQuestionRequest>,
) -> ApiResult<Json<PostQuestionResponse>> {
    if req.question.trim().is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".to_string()));
    }

    let outcome = state
        .service
        .ask(&req.question, req.thread_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(PostQuestionResponse {
        logs: outcome.logs,
        response: outcome.response,
        thread_id: outcome.thread_id,
    }))
}
