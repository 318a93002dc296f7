//! Test context for unified test setup
//!
//! Wires in-memory stores and a recording notifier into an `IntakeService`
//! and the application router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use IntakeBot::handlers::{router, AppState};
use IntakeBot::services::{IntakeOutcome, IntakeService};
use IntakeBot::state::{InboundEvent, MenuCatalog};

use super::{InMemoryConversationStore, InMemoryNoticeStore, RecordingNotifier, TEST_VERIFY_TOKEN};

pub struct TestContext {
    pub conversations: Arc<InMemoryConversationStore>,
    pub notices: Arc<InMemoryNoticeStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub intake: IntakeService,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_notifier(RecordingNotifier::new())
    }

    pub fn with_notifier(notifier: RecordingNotifier) -> Self {
        super::init_test_logging();

        let conversations = Arc::new(InMemoryConversationStore::new());
        let notices = Arc::new(InMemoryNoticeStore::new());
        let notifier = Arc::new(notifier);
        let intake = IntakeService::new(
            conversations.clone(),
            notices.clone(),
            notifier.clone(),
            MenuCatalog::default(),
        );

        Self {
            conversations,
            notices,
            notifier,
            intake,
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        self.intake.catalog()
    }

    pub async fn send_text(&self, sender_id: &str, text: &str) -> IntakeOutcome {
        self.intake
            .handle(InboundEvent::text(sender_id, text))
            .await
            .expect("text message should be handled")
    }

    pub async fn press_button(&self, sender_id: &str, option_id: &str) -> IntakeOutcome {
        self.intake
            .handle(InboundEvent::button(sender_id, option_id))
            .await
            .expect("button reply should be handled")
    }

    pub fn router(&self) -> Router {
        router(AppState::new(self.intake.clone(), TEST_VERIFY_TOKEN, None))
    }

    /// POST a JSON payload to the webhook and return status plus JSON body
    pub async fn post_webhook(&self, payload: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/whatsapp/webhook")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// GET a path and return status plus raw body text
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
