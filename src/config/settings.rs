//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use serde::{Deserialize, Serialize};

use crate::state::MenuCatalog;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub menu: MenuCatalog,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// WhatsApp Cloud API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhatsAppConfig {
    /// Secret echoed back by Meta during webhook verification
    pub verify_token: String,
    /// Bearer token for the Graph API; delivery is a no-op without it
    #[serde(default)]
    pub access_token: Option<String>,
    /// Business phone number id the messages are sent from
    #[serde(default)]
    pub phone_number_id: Option<String>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v21.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_log_file_name() -> String {
    "intakebot.log".to_string()
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from the named configuration file (extension optional)
    /// layered under `INTAKEBOT__*` environment variables
    pub fn from_file(name: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix("INTAKEBOT")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::IntakeBotError> {
        super::validation::validate_settings(self)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            verify_token: String::new(),
            access_token: None,
            phone_number_id: None,
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/intakebot".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: default_log_file_name(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            whatsapp: WhatsAppConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            menu: MenuCatalog::default(),
        }
    }
}
