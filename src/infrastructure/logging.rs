//! Logging initialization.
//!
//! Console output via `tracing`, filtered by `RUST_LOG` with an `info`
//! default so sweep progress is visible without configuration.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber. Safe to call once per process.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}
