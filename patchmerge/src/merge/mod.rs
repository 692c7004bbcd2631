//! Recursive, strategy-driven deep merge.
//!
//! [`merge`] combines a source value into a destination of the same type.
//! Records are merged field by field, maps key by key and sequences according
//! to the configured [`MergeStrategy`]. Scalars are copied only when the
//! source is non-empty and either the destination is empty or
//! `override_fields` is set.
//!
//! # Examples
//!
//! ```
//! use patchmerge::{MergeConfig, MergeStrategy, merge};
//!
//! let mut members = vec![String::from("b"), String::from("a")];
//! let incoming = vec![String::from("c"), String::from("a")];
//! let config = MergeConfig::new().with_strategy(MergeStrategy::UniqueFirstSeen);
//! merge(&mut members, &incoming, &config)?;
//! assert_eq!(members, ["a", "b", "c"]);
//! # Ok::<(), patchmerge::MergeError>(())
//! ```

use tracing::debug;

use crate::MergeResult;

mod config;
mod dynamic;
mod engine;
mod impls;
mod shared;
mod transform;

pub use config::{MergeConfig, MergeStrategy, ParseStrategyError};
pub use dynamic::DynMergeable;
pub use engine::{MergeStats, Mergeable, Merger, merge_scalar, merge_sequence};
pub use shared::{NodeId, Shared};
pub use transform::Transformers;

/// Merge `src` into `dst`.
///
/// # Errors
///
/// Returns [`MergeError::TypeMismatch`](crate::MergeError::TypeMismatch)
/// when polymorphic values inside the two graphs disagree on their concrete
/// type. `dst` may be partially merged when this happens.
pub fn merge<T: Mergeable>(dst: &mut T, src: &T, config: &MergeConfig) -> MergeResult<()> {
    merge_with_stats(dst, src, config).map(|_| ())
}

/// Merge `src` into `dst`, returning counters describing the run.
///
/// # Errors
///
/// As for [`merge`].
pub fn merge_with_stats<T: Mergeable>(
    dst: &mut T,
    src: &T,
    config: &MergeConfig,
) -> MergeResult<MergeStats> {
    let mut merger = Merger::new(config);
    merger.merge(dst, src)?;
    let stats = merger.stats();
    debug!(
        type_name = std::any::type_name::<T>(),
        strategy = %config.strategy,
        skipped_keys = stats.skipped_keys,
        transformed = stats.transformed,
        cycles_cut = stats.cycles_cut,
        "merge complete"
    );
    Ok(stats)
}

/// Merge two runtime-typed values.
///
/// # Errors
///
/// Returns [`MergeError::TypeMismatch`](crate::MergeError::TypeMismatch)
/// when `dst` and `src` have different concrete types, or when nested values
/// do.
pub fn merge_dyn(
    dst: &mut dyn DynMergeable,
    src: &dyn DynMergeable,
    config: &MergeConfig,
) -> MergeResult<()> {
    let mut merger = Merger::new(config);
    dst.merge_dyn(src, &mut merger)
}
