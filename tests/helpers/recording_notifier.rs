//! Notifier that records outbound messages instead of sending them

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use IntakeBot::services::{DeliveryReceipt, Notifier};
use IntakeBot::state::MenuCatalog;
use IntakeBot::utils::errors::{DeliveryError, DeliveryResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Text { to: String, body: String },
    Menu { to: String },
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifier whose sends all fail, as if the Graph API were down
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<SentMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    fn record(&self, message: SentMessage) -> DeliveryResult<DeliveryReceipt> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DeliveryError::Rejected {
                status: 500,
                body: "upstream error".to_string(),
            });
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(message);
        Ok(DeliveryReceipt {
            status: 200,
            message_id: Some(format!("wamid.test.{}", sent.len())),
        })
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_text(&self, to: &str, message: &str) -> DeliveryResult<DeliveryReceipt> {
        self.record(SentMessage::Text {
            to: to.to_string(),
            body: message.to_string(),
        })
    }

    async fn send_menu(&self, to: &str, _catalog: &MenuCatalog) -> DeliveryResult<DeliveryReceipt> {
        self.record(SentMessage::Menu { to: to.to_string() })
    }
}
