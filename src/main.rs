//! IntakeBot WhatsApp Bot
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use IntakeBot::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService, PoolConfig},
    handlers::{router, AppState},
    services::{IntakeService, WhatsAppSender},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment overrides may live in .env during development
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", IntakeBot::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&PoolConfig::from(&settings.database)).await?;
    run_migrations(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);
    match database_service.get_stats().await {
        Ok(stats) => info!(
            conversations = stats.total_conversations,
            notices = stats.total_notices,
            "Database ready"
        ),
        Err(e) => warn!(error = %e, "Could not read database statistics"),
    }

    let sender = WhatsAppSender::new(&settings.whatsapp)?;
    if !sender.is_enabled() {
        warn!("WhatsApp access token or phone number id missing, replies will not be sent");
    }

    let intake = IntakeService::new(
        Arc::new(database_service.conversations.clone()),
        Arc::new(database_service.notices.clone()),
        Arc::new(sender),
        settings.menu.clone(),
    );
    let state = AppState::new(intake, settings.whatsapp.verify_token.clone(), Some(database_service));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(bind_address = %address, "IntakeBot is ready!");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("IntakeBot has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
