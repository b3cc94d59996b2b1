//! Tracing subscriber setup for the binary.
//!
//! Logs go to stderr so `render` output on stdout stays clean. `RUST_LOG`
//! wins over the verbosity flag when set.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber, human-readable or one JSON object per line.
///
/// A second call returns an error instead of replacing the first subscriber.
pub fn init(verbose: bool, json: bool) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}
