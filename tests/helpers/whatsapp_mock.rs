//! Mock WhatsApp Graph API server for testing
//!
//! This module provides a mock HTTP server that simulates the Cloud API
//! messages endpoint. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use IntakeBot::config::WhatsAppConfig;

pub const TEST_ACCESS_TOKEN: &str = "test-access-token";
pub const TEST_PHONE_NUMBER_ID: &str = "106540352242922";
pub const TEST_API_VERSION: &str = "v21.0";

/// Mock WhatsApp Graph API server for testing
pub struct WhatsAppMockServer {
    pub server: MockServer,
}

impl WhatsAppMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn messages_path(&self) -> String {
        format!("/{}/{}/messages", TEST_API_VERSION, TEST_PHONE_NUMBER_ID)
    }

    /// Sender configuration pointing at this server
    pub fn config(&self) -> WhatsAppConfig {
        WhatsAppConfig {
            verify_token: super::TEST_VERIFY_TOKEN.to_string(),
            access_token: Some(TEST_ACCESS_TOKEN.to_string()),
            phone_number_id: Some(TEST_PHONE_NUMBER_ID.to_string()),
            api_base_url: self.server.uri(),
            api_version: TEST_API_VERSION.to_string(),
            timeout_seconds: 2,
        }
    }

    /// Accept every authorized send with a message id
    pub async fn mock_accept(&self) {
        Mock::given(method("POST"))
            .and(path(self.messages_path()))
            .and(header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messaging_product": "whatsapp",
                "contacts": [{ "input": "541155551234", "wa_id": "5491155551234" }],
                "messages": [{ "id": "wamid.accepted" }]
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer every send with the given status and error body
    pub async fn mock_reject(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(self.messages_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": { "message": "Invalid parameter", "type": "OAuthException", "code": 100 }
            })))
            .mount(&self.server)
            .await;
    }

    /// Accept sends only after the given delay
    pub async fn mock_slow(&self, delay: std::time::Duration) {
        Mock::given(method("POST"))
            .and(path(self.messages_path()))
            .respond_with(ResponseTemplate::new(200).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// Bodies of all requests the server received
    pub async fn received_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}
