//! A [`ResourceStore`] fake that records every call.
//!
//! [`RecordingStore`] keeps resources in a [`MemoryStore`], logs each call
//! with its resource id and can be told to fail a given operation.
//!
//! # Examples
//!
//! ```
//! use patchmerge::{ResourceStore, StoreError};
//! use patchmerge_test_helpers::{Operation, RecordingStore};
//!
//! let store: RecordingStore<Vec<String>> = RecordingStore::new();
//! store.fail(Operation::Fetch, StoreError::transport("web", "timed out"));
//! assert!(store.fetch("web").is_err());
//! assert_eq!(store.calls().len(), 1);
//! assert_eq!(store.mutating_calls(), 0);
//! ```

use std::collections::HashMap;

use parking_lot::Mutex;
use patchmerge::{MemoryStore, ResourceStore, StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Store operations, as recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`ResourceStore::fetch`].
    Fetch,
    /// [`ResourceStore::apply_patch`].
    ApplyPatch,
    /// [`ResourceStore::create`].
    Create,
    /// [`ResourceStore::replace`].
    Replace,
    /// [`ResourceStore::delete`].
    Delete,
}

impl Operation {
    /// Whether the operation changes stored state.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::Fetch)
    }
}

/// One recorded call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreCall {
    /// The operation invoked.
    pub operation: Operation,
    /// Resource id passed to it.
    pub id: String,
}

/// Call-recording store with failure injection.
#[derive(Debug)]
pub struct RecordingStore<R> {
    inner: MemoryStore<R>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashMap<Operation, StoreError>>,
}

impl<R> Default for RecordingStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecordingStore<R> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Make every later call to `operation` fail with `error`.
    pub fn fail(&self, operation: Operation, error: StoreError) {
        self.failures.lock().insert(operation, error);
    }

    /// Calls recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls that change stored state.
    #[must_use]
    pub fn mutating_calls(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.operation.is_mutating())
            .count()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// The backing store, for inspection without recording.
    #[must_use]
    pub const fn inner(&self) -> &MemoryStore<R> {
        &self.inner
    }

    fn record(&self, operation: Operation, id: &str) -> StoreResult<()> {
        self.calls.lock().push(StoreCall {
            operation,
            id: id.to_owned(),
        });
        self.failures
            .lock()
            .get(&operation)
            .cloned()
            .map_or(Ok(()), Err)
    }
}

impl<R> RecordingStore<R>
where
    R: Serialize + DeserializeOwned,
{
    /// Create a store already holding `resource` under `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `resource` cannot be serialised.
    pub fn with_resource(id: &str, resource: &R) -> StoreResult<Self> {
        let store = Self::new();
        store.inner.create(id, resource)?;
        Ok(store)
    }
}

impl<R> ResourceStore<R> for RecordingStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn fetch(&self, id: &str) -> StoreResult<R> {
        self.record(Operation::Fetch, id)?;
        self.inner.fetch(id)
    }

    fn apply_patch(&self, id: &str, patch: &R) -> StoreResult<R> {
        self.record(Operation::ApplyPatch, id)?;
        self.inner.apply_patch(id, patch)
    }

    fn create(&self, id: &str, resource: &R) -> StoreResult<R> {
        self.record(Operation::Create, id)?;
        self.inner.create(id, resource)
    }

    fn replace(&self, id: &str, resource: &R) -> StoreResult<R> {
        self.record(Operation::Replace, id)?;
        self.inner.replace(id, resource)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        self.record(Operation::Delete, id)?;
        self.inner.delete(id)
    }
}
