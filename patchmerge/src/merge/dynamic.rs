//! Runtime-typed values: merging through `Box<dyn DynMergeable>`.

use std::any::Any;
use std::fmt;

use super::engine::{Mergeable, Merger};
use crate::MergeResult;
use crate::structural::{Kind, Structural};

/// Object-safe face of [`Mergeable`].
///
/// Every `Mergeable + Send + Sync` type implements this automatically, so a
/// field typed `Box<dyn DynMergeable>` can hold any of them. Merging two
/// boxes whose concrete types differ fails with a type mismatch.
pub trait DynMergeable: Structural + Send + Sync {
    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn DynMergeable>;

    /// View as a [`Structural`] trait object.
    fn as_structural(&self) -> &dyn Structural;

    /// View as [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Merge `src` into `self` after checking both share a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TypeMismatch`](crate::MergeError::TypeMismatch)
    /// when the concrete types differ, or any error from the inner merge.
    fn merge_dyn(&mut self, src: &dyn DynMergeable, merger: &mut Merger<'_>) -> MergeResult<()>;
}

impl<T> DynMergeable for T
where
    T: Mergeable + Send + Sync,
{
    fn clone_box(&self) -> Box<dyn DynMergeable> {
        Box::new(self.clone())
    }

    fn as_structural(&self) -> &dyn Structural {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn merge_dyn(&mut self, src: &dyn DynMergeable, merger: &mut Merger<'_>) -> MergeResult<()> {
        match src.as_any().downcast_ref::<T>() {
            Some(src) => merger.merge(self, src),
            None => Err(merger.type_mismatch(self.type_name(), src.type_name())),
        }
    }
}

impl Clone for Box<dyn DynMergeable> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

impl fmt::Debug for dyn DynMergeable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMergeable")
            .field("type_name", &self.type_name())
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

impl Structural for Box<dyn DynMergeable> {
    fn kind(&self) -> Kind {
        Kind::Polymorphic
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn target(&self) -> Option<&dyn Structural> {
        Some((**self).as_structural())
    }
}

impl Mergeable for Box<dyn DynMergeable> {
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        if merger.config().override_fields {
            *self = src.clone();
            return Ok(());
        }
        (**self).merge_dyn(&**src, merger)
    }
}
