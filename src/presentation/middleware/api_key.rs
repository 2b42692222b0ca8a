use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

/// Gate on a configured API key list. Evaluated before the rate limiter and
/// the submitter; a no-op when auth is disabled in settings.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.settings.auth.enabled {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(state.settings.auth.header.as_str())
        .and_then(|v| v.to_str().ok());

    match provided {
        Some(key) if state.settings.auth.api_keys.iter().any(|k| k == key) => {
            next.run(request).await
        }
        _ => {
            tracing::warn!("Request rejected: missing or invalid API key");
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or missing API key".to_string(),
                }),
            )
                .into_response()
        }
    }
}
