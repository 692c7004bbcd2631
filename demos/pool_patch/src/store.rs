//! A [`ResourceStore`] backed by a directory of JSON documents.

use std::fs;
use std::io;
use std::marker::PhantomData;

use camino::{Utf8Path, Utf8PathBuf};
use patchmerge::store::shallow_patch;
use patchmerge::{ResourceStore, StoreError, StoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// One `<id>.json` file per resource under `root`.
///
/// Slashes in ids become `~`, so `/Common/web` and `~Common~web` name the
/// same file. Patches follow the remote store's shallow semantics via
/// [`shallow_patch`].
#[derive(Debug)]
pub struct DirectoryStore<R> {
    root: Utf8PathBuf,
    marker: PhantomData<fn() -> R>,
}

impl<R> DirectoryStore<R> {
    /// Store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            marker: PhantomData,
        }
    }

    /// Directory holding the documents.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// File backing `id`.
    #[must_use]
    pub fn path_for(&self, id: &str) -> Utf8PathBuf {
        self.root.join(format!("{}.json", id.replace('/', "~")))
    }

    fn read_document(&self, id: &str) -> StoreResult<Value> {
        let path = self.path_for(id);
        let text = fs::read_to_string(&path).map_err(|err| io_error(id, &err))?;
        serde_json::from_str(&text).map_err(|err| StoreError::transport(id, err.to_string()))
    }

    fn write_document(&self, id: &str, document: &Value) -> StoreResult<()> {
        let mut text = serde_json::to_string_pretty(document)
            .map_err(|err| StoreError::transport(id, err.to_string()))?;
        text.push('\n');
        fs::create_dir_all(&self.root).map_err(|err| io_error(id, &err))?;
        fs::write(self.path_for(id), text).map_err(|err| io_error(id, &err))?;
        debug!(id, root = %self.root, "document written");
        Ok(())
    }
}

fn io_error(id: &str, err: &io::Error) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::not_found(id)
    } else {
        StoreError::transport(id, err.to_string())
    }
}

impl<R> DirectoryStore<R>
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

impl<R> ResourceStore<R> for DirectoryStore<R>
where
    R: Serialize + DeserializeOwned,
{
    fn fetch(&self, id: &str) -> StoreResult<R> {
        Self::decode(id, self.read_document(id)?)
    }

    fn apply_patch(&self, id: &str, patch: &R) -> StoreResult<R> {
        let mut stored = self.read_document(id)?;
        shallow_patch(&mut stored, Self::encode(id, patch)?);
        self.write_document(id, &stored)?;
        Self::decode(id, stored)
    }

    fn create(&self, id: &str, resource: &R) -> StoreResult<R> {
        if self.path_for(id).exists() {
            return Err(StoreError::transport(id, "resource already exists"));
        }
        let document = Self::encode(id, resource)?;
        self.write_document(id, &document)?;
        Self::decode(id, document)
    }

    fn replace(&self, id: &str, resource: &R) -> StoreResult<R> {
        if !self.path_for(id).exists() {
            return Err(StoreError::not_found(id));
        }
        let document = Self::encode(id, resource)?;
        self.write_document(id, &document)?;
        Self::decode(id, document)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        fs::remove_file(self.path_for(id)).map_err(|err| io_error(id, &err))?;
        debug!(id, "document removed");
        Ok(())
    }
}
