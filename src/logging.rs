//! Logging setup for the demo binary.
//!
//! Installs a global tracing subscriber writing to stdout, filtered through
//! `RUST_LOG` with an `info` default. Subsequent calls are no-ops.

use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize tracing to write to stdout.
///
/// Failures are returned so callers can degrade gracefully without aborting
/// startup.
pub fn init() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = registry().with(filter).with(fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = INSTALLED.set(());
    Ok(())
}
