//! WhatsApp webhook handlers
//!
//! `GET` answers Meta's subscription handshake, `POST` receives message
//! notifications and feeds the first message into the intake service.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::state::InboundEvent;
use crate::utils::logging;

use super::AppState;

pub const INVALID_VERIFY_TOKEN: &str = "Error: invalid verify token.";

/// Handshake query. Meta sends `hub.mode`; some proxies rewrite the dots.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode", alias = "hub_mode", alias = "mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token", alias = "hub_verify_token", alias = "verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge", alias = "hub_challenge", alias = "challenge")]
    pub challenge: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiveStatus {
    Ok,
    NoMessage,
    NoSender,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiveResponse {
    pub status: ReceiveStatus,
}

/// Handle the webhook verification handshake
pub async fn verify(State(state): State<AppState>, Query(query): Query<VerifyQuery>) -> impl IntoResponse {
    let accepted = query.mode.as_deref() == Some("subscribe")
        && query
            .verify_token
            .as_deref()
            .is_some_and(|token| !token.is_empty() && token == state.verify_token);

    if accepted {
        info!("Webhook verification accepted");
        (StatusCode::OK, query.challenge.unwrap_or_default())
    } else {
        info!(mode = ?query.mode, "Webhook verification rejected");
        (StatusCode::FORBIDDEN, INVALID_VERIFY_TOKEN.to_string())
    }
}

/// Handle an inbound notification. Always 200 so Meta does not retry.
pub async fn receive(State(state): State<AppState>, body: Bytes) -> Json<ReceiveResponse> {
    let status = match extract_event(&body) {
        Ok(event) => {
            let sender_id = event.sender_id.clone();
            if let Err(e) = state.intake.handle(event).await {
                error!(sender_id = %sender_id, error = %e, severity = %e.severity(), "Failed to process inbound message");
            }
            ReceiveStatus::Ok
        }
        Err(status) => status,
    };

    Json(ReceiveResponse { status })
}

/// Pull the first message out of a notification payload
pub fn extract_event(body: &[u8]) -> Result<InboundEvent, ReceiveStatus> {
    let payload: Value = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            debug!(error = %e, "Webhook body is not JSON");
            logging::log_ignored_payload("invalid_json");
            return Err(ReceiveStatus::NoMessage);
        }
    };

    debug!(payload = %payload, "Webhook payload");

    let message = match payload.pointer("/entry/0/changes/0/value/messages/0") {
        Some(message) if is_present(message) => message,
        _ => {
            logging::log_ignored_payload("no_message");
            return Err(ReceiveStatus::NoMessage);
        }
    };

    let sender_id = match message.get("from").and_then(Value::as_str) {
        Some(from) if !from.is_empty() => from.to_string(),
        _ => {
            logging::log_ignored_payload("no_sender");
            return Err(ReceiveStatus::NoSender);
        }
    };

    let text = message
        .pointer("/text/body")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let selected_option_id = message
        .pointer("/interactive/button_reply/id")
        .and_then(Value::as_str)
        .map(String::from);

    Ok(InboundEvent {
        sender_id,
        text,
        selected_option_id,
    })
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}
