use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;

use crate::application::services::SubmitError;
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;
use crate::presentation::validation::validate_upload;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct SubmitResponse {
    pub job_id: String,
    pub message: String,
}

#[tracing::instrument(skip(state, multipart, request_id))]
pub async fn submit_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Submit request with no file");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file uploaded".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read multipart");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response();
        }
    };

    let filename = field.file_name().unwrap_or_default().to_string();

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    if let Err(e) = validate_upload(&filename, data.len(), state.settings.limits.max_file_size_mb)
    {
        tracing::warn!(filename = %filename, error = %e, "Upload rejected");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response();
    }

    match state
        .submission_service
        .submit(&data, &filename, &request_id.0)
        .await
    {
        Ok(job_id) => (
            StatusCode::ACCEPTED,
            Json(SubmitResponse {
                job_id: job_id.to_string(),
                message: "Job submitted successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e @ SubmitError::QueueUnavailable(_)) => {
            tracing::error!(error = %e, "Submission failed: queue unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "Job queue unavailable, try again later".to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ SubmitError::Staging(_)) => {
            tracing::error!(error = %e, "Submission failed: staging error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to stage upload: {}", e),
                }),
            )
                .into_response()
        }
    }
}
