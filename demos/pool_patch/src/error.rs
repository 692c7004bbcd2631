//! Error types for the `pool_patch` demo.
//!
//! `PoolPatchError` wraps the library's settings and reconciliation failures
//! alongside the demo's own file handling so `main` can hand a single error
//! to `color-eyre`.

use std::io;

use camino::Utf8PathBuf;
use patchmerge::{ReconcileError, SettingsError};
use thiserror::Error;

/// Errors raised by the pool patch demo.
#[derive(Debug, Error)]
pub enum PoolPatchError {
    /// The patch file could not be read.
    #[error("failed to read patch file '{path}': {source}")]
    ReadPatch {
        /// Location of the patch file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The patch file did not decode as a pool.
    #[error("patch file '{path}' does not describe a pool: {source}")]
    ParsePatch {
        /// Location of the patch file.
        path: Utf8PathBuf,
        /// Decoder failure, including dual-representation conflicts.
        #[source]
        source: serde_json::Error,
    },
    /// Layered settings could not be resolved.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The reconciliation itself failed.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    /// Writing the outcome to standard output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Convenient result alias for the demo.
pub type Result<T> = std::result::Result<T, PoolPatchError>;
