//! # invhubd — invhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`invhub.toml` plus `INVHUB_*` env overrides)
//! - Initialise `tracing` from the configured filter
//! - Open the `SQLite` connection pool and run migrations
//! - Construct the repositories, the change bus and the inventory service
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use invhub_adapter_http_axum::state::AppState;
use invhub_adapter_storage_sqlite_sqlx::{
    SqliteClockRoutineRepository, SqliteItemRepository, SqliteMixRoutineRepository,
    SqliteMultiRoutineRepository, SqliteStorage, SqliteTimerRoutineRepository,
};
use invhub_app::change_bus::InProcessChangeBus;
use invhub_app::services::inventory::InventoryService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = invhub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .with_context(|| format!("failed to open database {}", config.database_url()))?;
    let pool = db.pool().clone();

    // Services
    let inventory = InventoryService::<SqliteStorage, _>::new(
        SqliteItemRepository::new(pool.clone()),
        SqliteTimerRoutineRepository::new(pool.clone()),
        SqliteClockRoutineRepository::new(pool.clone()),
        SqliteMultiRoutineRepository::new(pool.clone()),
        SqliteMixRoutineRepository::new(pool),
        Arc::new(InProcessChangeBus::new(config.changes.capacity)),
    );

    // HTTP
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let state = AppState::new(inventory).with_shutdown(shutdown_rx);
    let app = invhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "invhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // ends live SSE streams
            let _ = shutdown_tx.send(true);
        })
        .await
        .context("server error")?;

    tracing::info!("invhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
