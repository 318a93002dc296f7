//! IntakeBot WhatsApp Bot
//!
//! A conversational intake bot for WhatsApp. Senders identify themselves,
//! pick a notice type from an interactive menu and provide its details;
//! each completed conversation produces one stored absence or certificate
//! notice.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{IntakeBotError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{router, AppState};
pub use services::{IntakeService, WhatsAppSender};
pub use state::MenuCatalog;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
