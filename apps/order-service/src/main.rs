//! Order Service Binary
//!
//! Serves the order REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-service
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_SERVICE_CONFIG`: config file path (default: `config.yaml`, built-in
//!   defaults when absent)
//! - `RUST_LOG`: overrides the configured log level

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use order_service::config::{Config, load_config_from_env};
use order_service::observability::init_metrics;
use order_service::telemetry::init_telemetry;
use order_service::{AppState, SqliteOrderRepository, create_router};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config_from_env().context("loading configuration")?;
    init_telemetry(&config.observability.logging).context("initializing telemetry")?;

    tracing::info!("Starting order service");

    if config.observability.metrics.enabled {
        let addr = config.metrics_addr()?;
        init_metrics(addr).context("starting metrics exporter")?;
        tracing::info!(%addr, "Metrics exporter listening");
    }

    let repo = SqliteOrderRepository::connect(
        &config.persistence.database_url,
        config.persistence.max_connections,
    )
    .await
    .with_context(|| format!("opening {}", config.persistence.database_url))?;
    tracing::info!(database_url = %config.persistence.database_url, "Order store ready");

    serve(&config, Arc::new(repo)).await?;

    tracing::info!("Order service stopped");
    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn serve(config: &Config, repo: Arc<SqliteOrderRepository>) -> anyhow::Result<()> {
    let pool = repo.pool().clone();
    let app = create_router(AppState::new(repo, env!("CARGO_PKG_VERSION")));

    let http_addr = config.server.http_addr();
    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("binding {http_addr}"))?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /pedidos");
    tracing::info!("  POST   /pedidos");
    tracing::info!("  GET    /pedidos/{{id}}");
    tracing::info!("  PUT    /pedidos/{{id}}");
    tracing::info!("  DELETE /pedidos/{{id}}");

    let (shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.recv().await;
    });
    let mut handle = tokio::spawn(async move { server.await });

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        result = &mut handle => {
            result.context("HTTP server task failed")??;
        }
        () = shutdown_signal() => {
            let _ = shutdown_tx.send(());
            tracing::info!(timeout_secs = timeout.as_secs(), "Graceful shutdown started");
            match tokio::time::timeout(timeout, &mut handle).await {
                Ok(result) => result.context("HTTP server task failed")??,
                Err(_) => {
                    tracing::warn!("Shutdown timeout elapsed, aborting open connections");
                    handle.abort();
                }
            }
        }
    }

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
