use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

/// Fixed-window counter per caller key. Windows reset lazily on the first
/// request after expiry.
#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, (Instant, u32)>>>,
}

impl RateLimiter {
    pub fn allow(&self, key: &str, max_requests: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let entry = windows.entry(key.to_string()).or_insert((now, 0));

        if now.duration_since(entry.0) >= window {
            *entry = (now, 0);
        }

        if entry.1 >= max_requests {
            return false;
        }
        entry.1 += 1;
        true
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let limits = &state.settings.rate_limit;
    if !limits.enabled {
        return next.run(request).await;
    }

    let caller = request
        .headers()
        .get(state.settings.auth.header.as_str())
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous")
        .to_string();

    let allowed = state.rate_limiter.allow(
        &caller,
        limits.max_requests,
        Duration::from_secs(limits.window_secs),
    );

    if !allowed {
        tracing::warn!(caller = %caller, "Request rejected: rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded".to_string(),
            }),
        )
            .into_response();
    }

    next.run(request).await
}
