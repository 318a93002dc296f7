//! Webhook payload fixtures

use serde_json::{json, Value};

pub const TEST_SENDER: &str = "5491155551234";
pub const TEST_SENDER_NORMALIZED: &str = "541155551234";
pub const TEST_SUBJECT_ID: &str = "30123456";
pub const TEST_VERIFY_TOKEN: &str = "test-verify-token";

fn notification(value: Value) -> Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "102290129340398",
            "changes": [{ "field": "messages", "value": value }]
        }]
    })
}

/// Notification carrying one text message
pub fn text_message_payload(from: &str, body: &str) -> Value {
    notification(json!({
        "messaging_product": "whatsapp",
        "metadata": { "display_phone_number": "15550783881", "phone_number_id": "106540352242922" },
        "contacts": [{ "profile": { "name": "Test" }, "wa_id": from }],
        "messages": [{
            "from": from,
            "id": "wamid.HBgLMTY1MDM4Nzk0MzkVAgASGBQzQTRBNjU5OUFFRTAzODEwMTQ0RgA=",
            "timestamp": "1749416383",
            "type": "text",
            "text": { "body": body }
        }]
    }))
}

/// Notification carrying one reply-button press
pub fn button_reply_payload(from: &str, button_id: &str, title: &str) -> Value {
    notification(json!({
        "messaging_product": "whatsapp",
        "messages": [{
            "from": from,
            "id": "wamid.button",
            "timestamp": "1749416390",
            "type": "interactive",
            "interactive": {
                "type": "button_reply",
                "button_reply": { "id": button_id, "title": title }
            }
        }]
    }))
}

/// Delivery status update, which carries no message
pub fn status_payload() -> Value {
    notification(json!({
        "messaging_product": "whatsapp",
        "statuses": [{ "id": "wamid.out", "status": "delivered", "recipient_id": TEST_SENDER }]
    }))
}

/// Message without a sender
pub fn anonymous_message_payload(body: &str) -> Value {
    notification(json!({
        "messages": [{ "id": "wamid.anon", "type": "text", "text": { "body": body } }]
    }))
}
