//! Demonstration binary for `patchmerge`.
//!
//! Resources live as JSON documents in a directory, one file per id. Given a
//! pool patch, the binary back-fills it from the stored pool, prints a diff
//! in dry-run mode and otherwise issues at most one shallow patch.

pub mod cli;
pub mod error;
pub mod resources;
pub mod store;
pub mod telemetry;

use std::fs;
use std::io::{self, Write};

use camino::Utf8Path;
use patchmerge::{Reconciliation, reconcile};
use tracing::info;

use crate::cli::PoolPatchCli;
use crate::error::{PoolPatchError, Result};
use crate::resources::Pool;
use crate::store::DirectoryStore;

/// Read and decode the pool patch stored at `path`.
///
/// # Errors
///
/// Returns [`PoolPatchError::ReadPatch`] when the file cannot be read and
/// [`PoolPatchError::ParsePatch`] when it is not a valid pool, including when
/// both `members` and `membersReference` are populated.
pub fn read_patch(path: &Utf8Path) -> Result<Pool> {
    let text = fs::read_to_string(path).map_err(|source| PoolPatchError::ReadPatch {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PoolPatchError::ParsePatch {
        path: path.to_owned(),
        source,
    })
}

/// Resolve settings, read the patch and reconcile it against the store.
///
/// # Errors
///
/// Propagates settings, patch-file and reconciliation failures.
pub fn execute(cli: &PoolPatchCli) -> Result<Reconciliation<Pool>> {
    let settings = cli.settings()?;
    let patch = read_patch(&cli.patch)?;
    let store = DirectoryStore::new(cli.store.clone());
    let outcome = reconcile(&store, &cli.id, patch, &settings.patch_config())?;
    info!(id = %cli.id, applied = outcome.was_applied(), "pool reconciled");
    Ok(outcome)
}

/// Describe `outcome` for a human reader.
///
/// Dry runs print the full patch report; the other outcomes print one line.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn write_outcome<W: Write>(
    out: &mut W,
    id: &str,
    outcome: &Reconciliation<Pool>,
) -> io::Result<()> {
    match outcome {
        Reconciliation::Unchanged(_) => writeln!(out, "{id}: already up to date"),
        Reconciliation::DryRun { report, .. } => write!(out, "{report}"),
        Reconciliation::Applied(pool) => {
            writeln!(out, "{id}: patched ({} members)", pool.members.len())
        }
    }
}
