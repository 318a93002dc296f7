//! Error handling for IntakeBot
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for IntakeBot application
#[derive(Error, Debug)]
pub enum IntakeBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Conversation not found: {sender_id}")]
    ConversationNotFound { sender_id: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Outbound delivery errors.
///
/// These never leave the notifier boundary as control flow; callers log them.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("WhatsApp credentials are not configured")]
    MissingCredentials,

    #[error("WhatsApp API request failed: {0}")]
    RequestFailed(String),

    #[error("WhatsApp API timeout")]
    Timeout,

    #[error("WhatsApp API rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            DeliveryError::Timeout
        } else {
            DeliveryError::RequestFailed(error.to_string())
        }
    }
}

/// Result type alias for IntakeBot operations
pub type Result<T> = std::result::Result<T, IntakeBotError>;

/// Result type alias for outbound deliveries
pub type DeliveryResult<T> = std::result::Result<T, DeliveryError>;

impl IntakeBotError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            IntakeBotError::Database(_) => ErrorSeverity::Critical,
            IntakeBotError::Migration(_) => ErrorSeverity::Critical,
            IntakeBotError::Config(_) => ErrorSeverity::Critical,
            IntakeBotError::ConversationNotFound { .. } => ErrorSeverity::Warning,
            IntakeBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
