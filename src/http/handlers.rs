//! Route handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;

use crate::http::context::RequestContext;
use crate::http::error::{ApiError, EMPTY_TEXT, INVALID_BODY};
use crate::http::server::AppState;
use crate::store::Task;

/// Body of `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub text: String,
}

/// `GET /tasks`
pub async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.list().await)
}

/// `POST /tasks`: validate, enrich, then store.
///
/// Nothing is stored unless enrichment succeeds.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let request: CreateTaskRequest =
        serde_json::from_slice(&body).map_err(|_| ApiError::Validation(INVALID_BODY))?;
    if request.text.is_empty() {
        return Err(ApiError::Validation(EMPTY_TEXT));
    }

    let enrichment = state.enrichment.enrich(&ctx, &request.text).await?;
    let task = state.store.append(request.text, enrichment).await;

    tracing::info!(
        task_id = task.id,
        priority = task.priority,
        "Task created"
    );
    Ok(Json(task))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}

/// Any method on `/tasks` other than GET and POST, HEAD included.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

/// Unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
