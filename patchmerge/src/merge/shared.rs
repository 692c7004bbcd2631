//! Shared, possibly cyclic, graph nodes.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::engine::{Mergeable, Merger};
use crate::MergeResult;
use crate::structural::{Kind, Structural};

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Shared`] node, stable across clones of its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A value reachable from several places in one graph.
///
/// Clones share the underlying value and its [`NodeId`], which lets a graph
/// refer back to itself. Merging visits each node at most once per
/// invocation, so cyclic graphs terminate.
///
/// # Examples
///
/// ```
/// use patchmerge::{MergeConfig, Shared, merge};
///
/// let mut dst = Shared::new(Some(String::from("kept")));
/// let src = Shared::new(Some(String::from("ignored")));
/// merge(&mut dst, &src, &MergeConfig::default())?;
/// assert_eq!(dst.read().as_deref(), Some("kept"));
/// # Ok::<(), patchmerge::MergeError>(())
/// ```
pub struct Shared<T> {
    id: NodeId,
    cell: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    /// Wrap `value` in a new node.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            id: NodeId::next(),
            cell: Arc::new(RwLock::new(value)),
        }
    }

    /// The node's identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Borrow the value for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.cell.read()
    }

    /// Borrow the value for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.cell.write()
    }

    /// Whether both handles refer to the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Shared<T> {}

impl<T> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&self.id).finish()
    }
}

impl<T: Structural> Structural for Shared<T> {
    fn kind(&self) -> Kind {
        Kind::Shared
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn node_id(&self) -> Option<NodeId> {
        Some(self.id)
    }
}

impl<T> Mergeable for Shared<T>
where
    T: Mergeable + Send + Sync,
{
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        if !merger.visit(self.id, TypeId::of::<T>()) {
            return Ok(());
        }
        if merger.config().override_fields {
            *self = src.clone();
            return Ok(());
        }
        if self.ptr_eq(src) {
            return Ok(());
        }
        // A node held further up the path is mid-merge; entering it again
        // would deadlock.
        let Some(snapshot) = src.cell.try_read().map(|guard| T::clone(&guard)) else {
            merger.note_active(src.id);
            return Ok(());
        };
        let Some(mut guard) = self.cell.try_write() else {
            merger.note_active(self.id);
            return Ok(());
        };
        merger.merge(&mut *guard, &snapshot)
    }
}
