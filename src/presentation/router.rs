use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{health_handler, result_handler, submit_handler};
use crate::presentation::middleware::{api_key_middleware, rate_limit_middleware};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Leave headroom over the validation cap so oversized uploads reach the
    // validator and get a proper 400 instead of a bare 413.
    let body_limit = state.settings.limits.max_file_size_bytes() * 2 + 1024 * 1024;

    // Collaborator gates, innermost first: auth runs before the rate limiter,
    // both strictly before the submitter.
    let ocr_routes = Router::new()
        .route("/ocr/submit", post(submit_handler))
        .route("/ocr/result/{job_id}", get(result_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ));

    Router::new()
        .route("/api/v1/health", get(health_handler))
        .nest("/api/v1", ocr_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
