//! Tracing setup for the CLI.
//!
//! Diagnostics go to stderr so report output on stdout stays pipeable.
//! `RUST_LOG` overrides the default `warn` filter.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn setup_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
