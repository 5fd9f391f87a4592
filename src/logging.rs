//! Tracing setup
//!
//! Console commands log to stderr. The interactive UI owns the terminal, so it
//! logs to `copy2.log` in the data directory instead.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `COPY2_LOG=debug`)
pub const LOG_ENV: &str = "COPY2_LOG";

/// Filter from `COPY2_LOG`, falling back to a level derived from `-v` count
pub fn env_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr
pub fn init_stderr(verbose: u8) {
    // try_init: a subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(verbose > 2)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to an append-only file, creating its directory if needed
pub fn init_file(log_path: &Path, verbose: u8) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("open {}", log_path.display()))?;

    let level = if verbose == 0 { 1 } else { verbose };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
