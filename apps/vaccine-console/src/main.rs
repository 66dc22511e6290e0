//! Vaccine Console Binary
//!
//! ```bash
//! cargo run --bin vaccine-console
//! ```
//!
//! `RUST_LOG` controls diagnostics, written to stderr (default: warn).

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vaccine_console::Console;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("initializing tracing")?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Console::new(stdin.lock(), stdout.lock())
        .run()
        .context("console I/O failed")?;
    Ok(())
}
