//! Tracing subscriber installation for embedding binaries.

use std::io::IsTerminal;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Neither `RUST_LOG` nor the fallback directive is a valid filter.
    #[error("invalid RUST_LOG / log filter: {0}")]
    InvalidFilter(String),
}

/// Installs a formatted subscriber writing to standard error.
///
/// The filter is read from `RUST_LOG`, falling back to `default_directive`
/// (for example `"kanbn_task_editor=info"`). Installing twice is tolerated.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when no usable filter can be
/// built.
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|err| TelemetryError::InvalidFilter(err.to_string()))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}
