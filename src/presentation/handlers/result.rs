use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct OcrResultResponse {
    pub status: String,
    pub text: Option<String>,
    pub error: Option<String>,
}

/// Polling endpoint. Always 200: unknown and expired ids are reported inside
/// the body as a failed status, never as a transport error.
#[tracing::instrument(skip(state))]
pub async fn result_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let view = state.status_service.poll(&job_id).await;

    (
        StatusCode::OK,
        Json(OcrResultResponse {
            status: view.status.as_str().to_string(),
            text: view.text,
            error: view.error,
        }),
    )
}
