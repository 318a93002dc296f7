//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the IntakeBot application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::{IntakeBotError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| IntakeBotError::Config(format!("Invalid log filter: {}", e)))?;

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| IntakeBotError::Config(format!("Logging already initialized: {}", e)))?;

    info!(level = %config.level, directory = ?config.directory, "Logging initialized");
    Ok(guard)
}

/// Log a conversation state change
pub fn log_transition(sender_id: &str, from: &str, to: Option<&str>) {
    match to {
        Some(to) => info!(sender_id = sender_id, from = from, to = to, "Conversation advanced"),
        None => info!(sender_id = sender_id, from = from, "Conversation reset"),
    }
}

/// Log a newly stored notice
pub fn log_notice_created(notice_id: i64, sender_id: &str, notice_type: &str) {
    info!(
        notice_id = notice_id,
        sender_id = sender_id,
        notice_type = notice_type,
        "Notice recorded"
    );
}

/// Log the outcome of an outbound delivery
pub fn log_delivery_failure(recipient: &str, context: &str, error: &crate::utils::errors::DeliveryError) {
    match error {
        crate::utils::errors::DeliveryError::MissingCredentials => {
            warn!(recipient = recipient, context = context, "WhatsApp credentials missing, message not sent");
        }
        other => {
            error!(recipient = recipient, context = context, error = %other, "WhatsApp delivery failed");
        }
    }
}

/// Log webhook payloads that carried nothing to process
pub fn log_ignored_payload(reason: &str) {
    debug!(reason = reason, "Webhook payload ignored");
}
