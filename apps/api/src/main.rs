//! # Kasir API
//!
//! HTTP server for the Kasir point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir API Server                                 │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Route handlers ───► SQLite (kasir.db)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use kasir_api::{routes, ApiConfig, AppState};
use kasir_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "kasir_api=info,kasir_db=info,sqlx=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env before the log filter reads RUST_LOG
    let config = ApiConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_target(true)
        .init();

    info!("Starting Kasir API server...");

    let config = config?;
    info!(
        port = config.port,
        db_path = %config.db_path.display(),
        report_utc_offset = %config.report_utc_offset,
        "Configuration loaded"
    );

    let db = Database::new(
        DbConfig::new(config.db_path.clone()).max_connections(config.db_max_connections),
    )
    .await?;
    info!("Database ready");

    let app = routes::router(AppState::new(db.clone(), config.report_utc_offset));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// A handler that fails to install never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
