//! Typed deep merging and idempotent patch reconciliation.
//!
//! The crate has two halves. The [`merge`](mod@merge) module combines two
//! values of the same type according to a [`MergeConfig`], descending through
//! records, maps, sequences, optional and polymorphic values and shared graph
//! nodes. The [`reconcile`](mod@reconcile) module uses it to turn a partial
//! patch into at most one mutating call against a [`ResourceStore`], skipping
//! the call when the store already holds the patched state.
//!
//! Records opt in with `#[derive(Mergeable)]`:
//!
//! ```
//! use patchmerge::{MergeConfig, MergeStrategy, Mergeable, merge};
//!
//! #[derive(Clone, Debug, Default, PartialEq, Mergeable)]
//! struct Member {
//!     name: String,
//!     ratio: u32,
//! }
//!
//! let mut existing = vec![Member { name: "a".into(), ratio: 1 }];
//! let incoming = vec![
//!     Member { name: "a".into(), ratio: 5 },
//!     Member { name: "b".into(), ratio: 2 },
//! ];
//! let config = MergeConfig::new().with_strategy(MergeStrategy::UniqueFirstSeen);
//! merge(&mut existing, &incoming, &config)?;
//! assert_eq!(existing.len(), 2);
//! assert_eq!(existing[0].ratio, 1);
//! # Ok::<(), patchmerge::MergeError>(())
//! ```

extern crate self as patchmerge;

pub use patchmerge_macros::Mergeable;

pub mod decode;
mod equality;
mod error;
pub mod merge;
pub mod named_set;
pub mod reconcile;
pub mod settings;
pub mod store;
pub mod structural;

pub use equality::equivalent;
pub use error::{
    DecodeError, MergeError, MergeResult, ReconcileError, ReconcileResult, SettingsError,
    StoreError, StoreResult,
};
pub use merge::{
    DynMergeable, MergeConfig, MergeStats, MergeStrategy, Mergeable, Merger, NodeId, Shared,
    Transformers, merge, merge_dyn, merge_with_stats,
};
pub use named_set::NamedSet;
pub use reconcile::{PatchConfig, PatchReport, Reconciliation, reconcile};
pub use settings::ReconcileSettings;
pub use store::{MemoryStore, ResourceStore};
