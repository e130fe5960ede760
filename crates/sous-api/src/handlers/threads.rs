use axum::extract::{Path, State};
use axum::Json;

use sous_persist::{MessageLog, StoredMessage, Thread, ThreadStore};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Create an empty thread ahead of the first question
pub async fn create_thread(State(state): State<AppState>) -> ApiResult<Json<Thread>> {
    let thread = state.store.create_thread().await?;
    Ok(Json(thread))
}

/// List a thread's persisted messages in ascending order
pub async fn list_messages(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<Vec<StoredMessage>>> {
    if !state.store.thread_exists(&thread_id).await? {
        return Err(ApiError::ThreadNotFound(thread_id));
    }

    let messages = state.store.load_history(&thread_id).await?;
    Ok(Json(messages))
}
