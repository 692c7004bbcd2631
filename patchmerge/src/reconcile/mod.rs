//! Idempotent partial updates against a [`ResourceStore`].
//!
//! [`reconcile`] fetches the current resource, back-fills the caller's patch
//! from it, projects the post-patch state and only issues a mutating call
//! when that projection differs from what the store already holds:
//!
//! ```text
//! Start -> Fetched | FetchFailed
//! Fetched -> Reconciled -> Unchanged | DryRun | Applied | ApplyFailed
//! ```
//!
//! Under [`MergeStrategy::Overwrite`] nothing is fetched and the patch is
//! compared against an empty resource. Synthesis then merges that empty
//! resource back over the patch, which clears every sequence, so a patch
//! carrying only sequences projects to the empty resource and is not sent.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::equality::equivalent;
use crate::merge::{MergeConfig, MergeStrategy, Mergeable, merge};
use crate::store::ResourceStore;
use crate::structural::Structural;
use crate::{ReconcileError, ReconcileResult};

mod report;

pub use report::PatchReport;

/// Options for one reconciliation.
#[derive(Clone, Debug, Default)]
pub struct PatchConfig {
    /// Merge options; `skip_empty_fields` is set per phase and ignored here.
    pub merge: MergeConfig,
    /// Report the change instead of sending it.
    pub dry_run: bool,
}

impl PatchConfig {
    /// Reconcile with `merge`, sending patches.
    #[must_use]
    pub const fn new(merge: MergeConfig) -> Self {
        Self {
            merge,
            dry_run: false,
        }
    }

    /// Toggle dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The sequence strategy in effect.
    #[must_use]
    pub const fn strategy(&self) -> MergeStrategy {
        self.merge.strategy
    }
}

/// Outcome of a successful reconciliation.
#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation<R> {
    /// The projection matched the existing resource; nothing was sent.
    ///
    /// Holds the fetched resource, or a blank `R::default()` under
    /// [`MergeStrategy::Overwrite`], which does not fetch.
    Unchanged(R),
    /// Dry run: the patch that would have been sent, with a report.
    DryRun {
        /// The back-filled patch.
        prospective: R,
        /// Diff and payload describing the change.
        report: PatchReport,
    },
    /// The patch was sent; holds the store's response.
    Applied(R),
}

impl<R> Reconciliation<R> {
    /// Whether a mutating call was issued.
    #[must_use]
    pub const fn was_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// The resource carried by the outcome.
    #[must_use]
    pub fn into_resource(self) -> R {
        match self {
            Self::Unchanged(resource) | Self::Applied(resource) => resource,
            Self::DryRun { prospective, .. } => prospective,
        }
    }
}

/// Apply `patch` to the resource `id` only if it would change anything.
///
/// The store sees at most two calls, a `fetch` followed by an optional
/// `apply_patch`, and no lock is held between them.
///
/// Under [`MergeStrategy::Overwrite`] the existing resource is
/// `R::default()`. A patch whose only non-empty fields are sequences then
/// yields [`Reconciliation::Unchanged`] holding that blank resource, not the
/// store's state, and a warning is logged because the patch was dropped.
///
/// # Errors
///
/// - [`ReconcileError::FetchFailed`] when the existing resource cannot be
///   read; nothing else is attempted.
/// - [`ReconcileError::ApplyFailed`] with the store's error when the patch is
///   rejected.
/// - [`ReconcileError::Merge`] when the patch and the existing resource hold
///   incompatible polymorphic values.
/// - [`ReconcileError::Render`] when a dry-run report cannot be serialised.
pub fn reconcile<R, S>(
    store: &S,
    id: &str,
    mut patch: R,
    config: &PatchConfig,
) -> ReconcileResult<Reconciliation<R>>
where
    R: Mergeable + Default + Serialize,
    S: ResourceStore<R> + ?Sized,
{
    let strategy = config.strategy();
    debug!(id, %strategy, dry_run = config.dry_run, "reconciliation started");

    let existing = if strategy.combines() {
        let existing = store
            .fetch(id)
            .map_err(|source| ReconcileError::fetch_failed(id, source))?;
        debug!(id, "existing resource fetched");
        let backfill = config.merge.clone().with_skip_empty_fields(true);
        merge(&mut patch, &existing, &backfill)?;
        existing
    } else {
        R::default()
    };

    let synthesis = config.merge.clone().with_skip_empty_fields(false);
    let mut projected = R::default();
    merge(&mut projected, &patch, &synthesis)?;
    merge(&mut projected, &existing, &synthesis)?;
    debug!(id, "post-patch projection computed");

    if equivalent(&projected, &existing) {
        if !strategy.combines() && !patch.is_empty_value() {
            warn!(id, %strategy, "overwrite projection is empty; non-empty patch dropped");
        }
        info!(id, %strategy, "resource up to date; patch skipped");
        return Ok(Reconciliation::Unchanged(existing));
    }

    if config.dry_run {
        let report = PatchReport::render(id, strategy, &existing, &projected, &patch)?;
        info!(id, %strategy, "dry run; patch not sent");
        return Ok(Reconciliation::DryRun {
            prospective: patch,
            report,
        });
    }

    let response = store
        .apply_patch(id, &patch)
        .map_err(|source| ReconcileError::apply_failed(id, source))?;
    info!(id, %strategy, "patch applied");
    Ok(Reconciliation::Applied(response))
}
