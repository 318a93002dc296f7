//! Logging middleware
//!
//! Records every HTTP request with its method, path, status and latency.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

/// Requests slower than this are logged at WARN
pub const SLOW_REQUEST_MS: u128 = 1000;

/// Log one request after the inner service answered
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start_time = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start_time.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(method = %method, path = %path, status = status, duration_ms = duration_ms, "Request failed");
    } else {
        info!(method = %method, path = %path, status = status, duration_ms = duration_ms, "Request handled");
    }

    if duration_ms > SLOW_REQUEST_MS {
        warn!(method = %method, path = %path, duration_ms = duration_ms, "Slow request detected");
    }

    response
}
