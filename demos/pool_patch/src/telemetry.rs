//! Tracing subscriber set-up for the demo binary.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the log filter, e.g. `POOL_PATCH_LOG=debug`.
pub const LOG_ENV: &str = "POOL_PATCH_LOG";

/// Install a global `fmt` subscriber writing to standard error.
///
/// Falls back to `warn` when [`LOG_ENV`] is unset or unparsable.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
        .try_init()
}
