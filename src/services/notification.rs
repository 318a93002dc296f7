//! Notification service implementation
//!
//! This service delivers replies through the WhatsApp Cloud API: plain text
//! messages and the interactive intake menu. Delivery is best-effort; every
//! failure is returned as a `DeliveryError` for the caller to log.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::WhatsAppConfig;
use crate::state::MenuCatalog;
use crate::utils::errors::{DeliveryError, DeliveryResult, IntakeBotError, Result};
use crate::utils::helpers::truncate_text;

/// Identifier of an accepted outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub message_id: Option<String>,
}

/// Outbound side of the conversation
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, to: &str, message: &str) -> DeliveryResult<DeliveryReceipt>;

    async fn send_menu(&self, to: &str, catalog: &MenuCatalog) -> DeliveryResult<DeliveryReceipt>;
}

/// Rewrite an inbound Argentine mobile id into the format the Cloud API
/// accepts as a recipient: `549XXXXXXXXXX` becomes `54XXXXXXXXXX`.
pub fn normalize_recipient(wa_id: &str) -> String {
    match wa_id.strip_prefix("549") {
        Some(rest) => format!("54{}", rest),
        None => wa_id.to_string(),
    }
}

/// Graph API message envelope
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMessage {
    pub messaging_product: &'static str,
    pub to: String,
    #[serde(flatten)]
    pub body: OutboundBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundBody {
    Text { text: TextBody },
    Interactive { interactive: InteractiveBody },
}

#[derive(Debug, Clone, Serialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractiveBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub body: InteractiveText,
    pub action: InteractiveAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractiveText {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InteractiveAction {
    pub buttons: Vec<ReplyButton>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyButton {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub reply: ReplyButtonBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyButtonBody {
    pub id: String,
    pub title: String,
}

impl OutboundMessage {
    pub fn text(to: &str, message: &str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: normalize_recipient(to),
            body: OutboundBody::Text {
                text: TextBody { body: message.to_string() },
            },
        }
    }

    pub fn menu(to: &str, catalog: &MenuCatalog) -> Self {
        let buttons = catalog
            .buttons
            .iter()
            .map(|button| ReplyButton {
                kind: "reply",
                reply: ReplyButtonBody {
                    id: button.id.clone(),
                    title: button.title.clone(),
                },
            })
            .collect();

        Self {
            messaging_product: "whatsapp",
            to: normalize_recipient(to),
            body: OutboundBody::Interactive {
                interactive: InteractiveBody {
                    kind: "button",
                    body: InteractiveText { text: catalog.body_text.clone() },
                    action: InteractiveAction { buttons },
                },
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Credentials {
    access_token: String,
    messages_url: String,
}

/// WhatsApp Cloud API sender
#[derive(Debug, Clone)]
pub struct WhatsAppSender {
    client: Client,
    credentials: Option<Credentials>,
}

impl WhatsAppSender {
    /// Create a new WhatsAppSender; without token and phone number id every send is a logged no-op
    pub fn new(config: &WhatsAppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("IntakeBot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(IntakeBotError::Http)?;

        let credentials = match (&config.access_token, &config.phone_number_id) {
            (Some(token), Some(phone_id)) if !token.is_empty() && !phone_id.is_empty() => Some(Credentials {
                access_token: token.clone(),
                messages_url: format!(
                    "{}/{}/{}/messages",
                    config.api_base_url.trim_end_matches('/'),
                    config.api_version,
                    phone_id
                ),
            }),
            _ => None,
        };

        Ok(Self { client, credentials })
    }

    /// Whether outbound delivery is configured
    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    async fn dispatch(&self, message: OutboundMessage, to_raw: &str, context: &str) -> DeliveryResult<DeliveryReceipt> {
        let credentials = self.credentials.as_ref().ok_or(DeliveryError::MissingCredentials)?;

        debug!(
            context = context,
            to_raw = to_raw,
            to = %message.to,
            payload = ?serde_json::to_value(&message).ok(),
            "Sending to WhatsApp"
        );

        let response = self
            .client
            .post(&credentials.messages_url)
            .bearer_auth(&credentials.access_token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        info!(
            context = context,
            to_raw = to_raw,
            status = status.as_u16(),
            body = %truncate_text(&body, 500),
            "WhatsApp response"
        );

        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let message_id = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.pointer("/messages/0/id").and_then(|id| id.as_str()).map(String::from));

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            message_id,
        })
    }
}

#[async_trait]
impl Notifier for WhatsAppSender {
    async fn send_text(&self, to: &str, message: &str) -> DeliveryResult<DeliveryReceipt> {
        self.dispatch(OutboundMessage::text(to, message), to, "text").await
    }

    async fn send_menu(&self, to: &str, catalog: &MenuCatalog) -> DeliveryResult<DeliveryReceipt> {
        self.dispatch(OutboundMessage::menu(to, catalog), to, "interactive_menu").await
    }
}
