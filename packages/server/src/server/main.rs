// Main entry point for the phone inventory / OTP ledger API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting phone inventory API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = connect_with_backoff(&config).await?;
    tracing::info!("Database connected");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let addr = format!("0.0.0.0:{}", config.port);
    let app = build_app(pool.clone(), Arc::new(config));

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down, closing database pool");
    pool.close().await;

    Ok(())
}

/// Initial connect with a bounded-backoff retry loop. Fails fatally once the
/// attempt budget is spent instead of retrying forever.
async fn connect_with_backoff(config: &Config) -> Result<PgPool> {
    const MAX_ATTEMPTS: u32 = 5;

    let mut delay = Duration::from_secs(1);
    let mut attempt = 1;

    loop {
        match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(error) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    %error,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "database connect failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(error) => {
                return Err(error).context("Failed to connect to database");
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
