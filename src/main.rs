// src/main.rs
use std::net::SocketAddr;

use anyhow::Context;
use catalog_api::config::AppConfig;
use catalog_api::{app, database, seed, AppState};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    // Create database pool
    let db_pool = database::create_pool(&config.database_url)
        .await
        .with_context(|| format!("failed to open database at {}", config.database_url))?;
    database::create_schema(&db_pool).await.context("failed to create schema")?;
    seed::seed(&db_pool, config.bcrypt_cost).await.context("failed to seed database")?;

    let state = AppState::new(db_pool.clone(), config.jwt_secret.clone(), config.bcrypt_cost)
        .context("failed to prepare application state")?;
    let app = app(state);

    // Try PORT..PORT+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        let (l, addr) = bound.with_context(|| {
            format!("failed to bind to any port starting at {} on {}", config.port, config.host)
        })?;
        tracing::info!("Server running on {}", addr);
        l
    };

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db_pool.close().await;
    tracing::info!("Database pool closed");

    served.context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error=%e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!(error=%e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
