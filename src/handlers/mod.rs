//! Handlers module
//!
//! HTTP routes exposed to Meta and to the deployment's health probes

pub mod health;
pub mod webhook;

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::database::DatabaseService;
use crate::middleware::log_requests;
use crate::services::IntakeService;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub intake: IntakeService,
    pub verify_token: String,
    /// Probed by `/health` when present
    pub database: Option<DatabaseService>,
}

impl AppState {
    pub fn new(intake: IntakeService, verify_token: impl Into<String>, database: Option<DatabaseService>) -> Self {
        Self {
            intake,
            verify_token: verify_token.into(),
            database,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/whatsapp/webhook", get(webhook::verify).post(webhook::receive))
        .route("/health", get(health::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
