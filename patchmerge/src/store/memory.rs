//! In-process store with the remote store's shallow-patch semantics.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use super::ResourceStore;
use crate::{StoreError, StoreResult};

/// Resources held as JSON documents behind a mutex.
///
/// `apply_patch` replaces each top-level key present in the partial and keeps
/// the rest, like a REST `PATCH`. Keys whose value serialises to `null` are
/// treated as absent.
///
/// # Examples
///
/// ```
/// use patchmerge::store::{MemoryStore, ResourceStore};
/// use std::collections::BTreeMap;
///
/// let store: MemoryStore<BTreeMap<String, u32>> = MemoryStore::new();
/// store.create("limits", &BTreeMap::from([("a".into(), 1), ("b".into(), 2)]))?;
/// let patched = store.apply_patch("limits", &BTreeMap::from([("a".into(), 5)]))?;
/// assert_eq!(patched, BTreeMap::from([("a".into(), 5), ("b".into(), 2)]));
/// # Ok::<(), patchmerge::StoreError>(())
/// ```
#[derive(Debug)]
pub struct MemoryStore<R> {
    documents: Mutex<BTreeMap<String, Value>>,
    marker: PhantomData<fn() -> R>,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> MemoryStore<R> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            documents: Mutex::new(BTreeMap::new()),
            marker: PhantomData,
        }
    }

    /// Number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.lock().len()
    }

    /// Whether the store holds no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.lock().is_empty()
    }

    /// Raw JSON document stored under `id`.
    #[must_use]
    pub fn document(&self, id: &str) -> Option<Value> {
        self.documents.lock().get(id).cloned()
    }
}

impl<R> MemoryStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn encode(id: &str, resource: &R) -> StoreResult<Value> {
        serde_json::to_value(resource).map_err(|err| StoreError::transport(id, err.to_string()))
    }

    fn decode(id: &str, document: Value) -> StoreResult<R> {
        serde_json::from_value(document).map_err(|err| StoreError::transport(id, err.to_string()))
    }
}

/// Apply `partial` to `target` the way the remote store treats a `PATCH`.
///
/// Each top-level key of an object partial replaces the stored key; `null`
/// values are ignored and unmentioned keys are kept. A non-object partial
/// replaces the document outright.
///
/// ```
/// use patchmerge::store::shallow_patch;
/// use serde_json::json;
///
/// let mut stored = json!({"name": "web", "members": ["a"], "monitor": "http"});
/// shallow_patch(&mut stored, json!({"members": ["b"], "monitor": null}));
/// assert_eq!(stored, json!({"name": "web", "members": ["b"], "monitor": "http"}));
/// ```
pub fn shallow_patch(target: &mut Value, partial: Value) {
    let Value::Object(fields) = partial else {
        *target = partial;
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    let Some(stored) = target.as_object_mut() else {
        return;
    };
    for (key, value) in fields {
        if !value.is_null() {
            stored.insert(key, value);
        }
    }
}

impl<R> ResourceStore<R> for MemoryStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn fetch(&self, id: &str) -> StoreResult<R> {
        let document = self
            .document(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        Self::decode(id, document)
    }

    fn apply_patch(&self, id: &str, patch: &R) -> StoreResult<R> {
        let partial = Self::encode(id, patch)?;
        let mut documents = self.documents.lock();
        let stored = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        shallow_patch(stored, partial);
        debug!(id, "patched stored document");
        Self::decode(id, stored.clone())
    }

    fn create(&self, id: &str, resource: &R) -> StoreResult<R> {
        let document = Self::encode(id, resource)?;
        let mut documents = self.documents.lock();
        if documents.contains_key(id) {
            return Err(StoreError::transport(id, "resource already exists"));
        }
        documents.insert(id.to_owned(), document.clone());
        debug!(id, "created document");
        Self::decode(id, document)
    }

    fn replace(&self, id: &str, resource: &R) -> StoreResult<R> {
        let document = Self::encode(id, resource)?;
        let mut documents = self.documents.lock();
        let stored = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        stored.clone_from(&document);
        debug!(id, "replaced document");
        Self::decode(id, document)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        if self.documents.lock().remove(id).is_none() {
            return Err(StoreError::not_found(id));
        }
        debug!(id, "deleted document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use anyhow::{Result, ensure};
    use rstest::{fixture, rstest};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Pool {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        members: Vec<String>,
    }

    #[fixture]
    fn store() -> MemoryStore<Pool> {
        let store = MemoryStore::new();
        let seeded = store.create(
            "web",
            &Pool {
                name: "web".into(),
                description: Some("front".into()),
                members: vec!["a".into()],
            },
        );
        assert!(seeded.is_ok());
        store
    }

    #[rstest]
    fn patch_replaces_only_present_keys(store: MemoryStore<Pool>) -> Result<()> {
        let patch = Pool {
            name: "web".into(),
            members: vec!["b".into()],
            ..Pool::default()
        };
        let patched = store.apply_patch("web", &patch)?;
        ensure!(patched.description.as_deref() == Some("front"));
        ensure!(patched.members == vec![String::from("b")]);
        Ok(())
    }

    #[rstest]
    fn null_values_do_not_clear_keys() {
        let mut stored = json!({"name": "web", "description": "front"});
        shallow_patch(&mut stored, json!({"description": null}));
        assert_eq!(stored, json!({"name": "web", "description": "front"}));
    }

    #[rstest]
    fn missing_resources_report_not_found(store: MemoryStore<Pool>) {
        assert_eq!(store.fetch("api").err(), Some(StoreError::not_found("api")));
        assert_eq!(
            store.apply_patch("api", &Pool::default()).err(),
            Some(StoreError::not_found("api"))
        );
        assert_eq!(store.delete("api").err(), Some(StoreError::not_found("api")));
    }

    #[rstest]
    fn lifecycle(store: MemoryStore<Pool>) -> Result<()> {
        ensure!(store.create("web", &Pool::default()).is_err());
        let replaced = store.replace("web", &Pool::default())?;
        ensure!(replaced == Pool::default());
        store.delete("web")?;
        ensure!(store.is_empty());
        Ok(())
    }

    #[rstest]
    fn maps_round_trip() -> Result<()> {
        let store: MemoryStore<BTreeMap<String, u32>> = MemoryStore::default();
        store.create("x", &BTreeMap::from([(String::from("a"), 1)]))?;
        ensure!(store.len() == 1);
        ensure!(store.document("x") == Some(json!({"a": 1})));
        Ok(())
    }
}
