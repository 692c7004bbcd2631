//! Error types produced by the merge engine, the store boundary and the
//! reconciliation protocol.

mod constructors;
mod types;

pub use types::{
    DecodeError, MergeError, ReconcileError, SettingsError, StoreError,
};

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Result alias for resource store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result alias for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
