//! Order Report Binary
//!
//! Prints every stored order with its items.
//!
//! ```bash
//! cargo run --bin order-report
//! ```
//!
//! Uses the same configuration as the server (`ORDER_SERVICE_CONFIG`).
//! Logs go to stderr so the listing can be piped.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use order_service::config::load_config_from_env;
use order_service::report::write_report;
use order_service::telemetry::init_telemetry_with_writer;
use order_service::{OrderService, SqliteOrderRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config_from_env().context("loading configuration")?;
    init_telemetry_with_writer(&config.observability.logging, std::io::stderr)
        .context("initializing telemetry")?;

    let repo = SqliteOrderRepository::connect(
        &config.persistence.database_url,
        config.persistence.max_connections,
    )
    .await
    .with_context(|| format!("opening {}", config.persistence.database_url))?;
    let pool = repo.pool().clone();

    let service = OrderService::new(Arc::new(repo));
    let orders = service.list_orders().await.context("listing orders")?;
    tracing::debug!(count = orders.len(), "Orders loaded");

    let mut stdout = std::io::stdout().lock();
    write_report(&orders, &mut stdout)?;
    stdout.flush()?;

    pool.close().await;
    Ok(())
}
