//! The resource store collaborator consumed by [`reconcile`](crate::reconcile).
//!
//! A store owns authoritative copies of resources addressed by string ids.
//! Only [`ResourceStore::fetch`] and [`ResourceStore::apply_patch`] take part
//! in reconciliation; the remaining operations complete the surface callers
//! use around it. Calls block; timeouts and cancellation are the store's
//! concern.

mod memory;

pub use memory::{MemoryStore, shallow_patch};

use crate::StoreResult;

/// Access to a remote collection of resources of type `R`.
pub trait ResourceStore<R> {
    /// Fetch the current state of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) when the
    /// resource does not exist, or a transport error.
    fn fetch(&self, id: &str) -> StoreResult<R>;

    /// Send `patch` as a shallow partial update and return the stored result.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    fn apply_patch(&self, id: &str, patch: &R) -> StoreResult<R>;

    /// Create `resource` under `id`.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    fn create(&self, id: &str, resource: &R) -> StoreResult<R>;

    /// Replace the whole of `id` with `resource`.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    fn replace(&self, id: &str, resource: &R) -> StoreResult<R>;

    /// Remove `id`.
    ///
    /// # Errors
    ///
    /// Returns the store's error unchanged.
    fn delete(&self, id: &str) -> StoreResult<()>;
}
