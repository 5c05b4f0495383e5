//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring and the Axum server
//! lifecycle.

use crate::config::Config;
use crate::infrastructure::probe::{HttpProbe, NullProbe, UrlProbe};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Selects the reachability probe from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_probe(config: &Config) -> Result<Arc<dyn UrlProbe>> {
    if !config.probe.enabled {
        tracing::warn!("Reachability probe disabled; every URL is accepted as reachable");
        return Ok(Arc::new(NullProbe::new()));
    }

    let probe = HttpProbe::new(config.probe.timeout())
        .map_err(|e| anyhow::anyhow!("Failed to initialize probe: {}", e))?;
    Ok(Arc::new(probe))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Reachability probe (HTTP or disabled)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let db = &config.database;
    let pool = PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(db.connect_timeout))
        .idle_timeout(Duration::from_secs(db.idle_timeout))
        .max_lifetime(Duration::from_secs(db.max_lifetime))
        .connect(&db.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let probe = build_probe(&config)?;

    let state = AppState::new(
        Arc::new(pool),
        probe,
        config.accounts.token_signing_secret.clone(),
        config.accounts.allowed_email_domain.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
