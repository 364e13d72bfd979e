//! # Tutor Platform
//!
//! Backend server for the tutoring platform.
//!
//! This is the application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database pool and migrations
//! - Optional Redis client for rate limiting
//! - HTTP/WebSocket server

use anyhow::Result;
use tracing::info;

use tutor_platform::config::Settings;
use tutor_platform::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    tutor_platform::telemetry::init_tracing();

    info!("Starting Tutor Platform...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        redis = settings.redis.is_some(),
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    info!("Server stopped");
    Ok(())
}
