//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{IntakeBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_whatsapp_config(&settings.whatsapp)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    settings.menu.validate()?;

    Ok(())
}

/// Validate HTTP listener configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(IntakeBotError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(IntakeBotError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate WhatsApp configuration
fn validate_whatsapp_config(config: &super::WhatsAppConfig) -> Result<()> {
    if config.verify_token.is_empty() {
        return Err(IntakeBotError::Config(
            "WhatsApp verify token is required".to_string()
        ));
    }

    url::Url::parse(&config.api_base_url)?;

    if config.api_version.is_empty() {
        return Err(IntakeBotError::Config(
            "WhatsApp API version is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(IntakeBotError::Config(
            "WhatsApp timeout must be greater than 0".to_string()
        ));
    }

    // Missing delivery credentials are tolerated; the sender degrades to a no-op.
    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(IntakeBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(IntakeBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(IntakeBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(IntakeBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(IntakeBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_name.is_empty() {
        return Err(IntakeBotError::Config(
            "Log file name is required".to_string()
        ));
    }

    Ok(())
}
