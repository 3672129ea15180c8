//! File logging.
//!
//! The terminal belongs to the UI, so tracing output goes to `scrolly.log`
//! through a non-blocking writer. `RUST_LOG` overrides the configured level.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "scrolly.log";

/// `--verbose` forces debug; otherwise `RUST_LOG`, then `level`.
pub fn env_filter(level: &str, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("scrolly=debug");
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scrolly={}", level)))
}

/// Install the global subscriber writing into `dir`. Keep the guard alive
/// until exit so buffered lines are flushed.
pub fn init(dir: &Path, level: &str, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level, verbose))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(guard)
}
