//! Structured logging setup
//!
//! All crates emit via `tracing`; this module wires up the subscriber.
//! The filter is taken from `RUST_LOG` when set, otherwise from the default
//! directive passed by the caller.

use crate::CoreError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Safe to call once per process; a second call returns an error instead of
/// panicking, so tests can call it unconditionally.
pub fn init_logging(default_directive: &str) -> Result<(), CoreError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| CoreError::Logging(e.to_string()))
}
