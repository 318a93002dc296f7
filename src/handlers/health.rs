//! Liveness endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use super::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// 200 when the database answers (or none is attached), 503 otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let Some(database) = &state.database else {
        return (StatusCode::OK, Json(HealthResponse { status: "ok" }));
    };

    match database.health_check().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse { status: "unavailable" }))
        }
    }
}
