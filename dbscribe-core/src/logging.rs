//! Logging setup for the generator CLI.
//!
//! Verbosity flags map onto a tracing level; an explicit `RUST_LOG`
//! value takes precedence over the flags.

use tracing_subscriber::EnvFilter;

use crate::Result;
use crate::error::DbScribeError;

/// Selects the log level for the given verbosity flags.
///
/// `quiet` wins over any `-v` count; otherwise each repetition raises
/// the level from INFO through DEBUG to TRACE.
fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes structured logging based on verbosity level.
///
/// # Errors
/// Returns a configuration error if a global subscriber is already set.
///
/// # Example
/// ```rust,no_run
/// use dbscribe_core::logging::init_logging;
///
/// // Initialize at DEBUG level
/// init_logging(1, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet).to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| {
            DbScribeError::configuration(format!("Failed to initialize logging: {e}"))
        })?;

    Ok(())
}
