use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub redis: String,
    pub version: String,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let redis = match state.job_repository.ping().await {
        Ok(()) => "connected",
        Err(_) => "unreachable",
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            redis: redis.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
