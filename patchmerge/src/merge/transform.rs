//! Registry of per-type merge overrides.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::{MergeError, MergeResult};

type TransformFn = dyn Fn(&mut dyn Any, &dyn Any) -> MergeResult<()> + Send + Sync;

struct Transformer {
    type_name: &'static str,
    apply: Box<TransformFn>,
}

/// Maps concrete types to functions that replace the default merge rule.
///
/// A transformer only runs when the destination is non-empty, and the
/// engine does not descend into a node it handled.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use patchmerge::{MergeConfig, Transformers, merge};
///
/// let mut transformers = Transformers::new();
/// transformers.register::<u32, _>(|dst, src| {
///     *dst = (*dst).max(*src);
///     Ok(())
/// });
/// let config = MergeConfig::new()
///     .with_override()
///     .with_transformers(Arc::new(transformers));
///
/// let mut limit = 10_u32;
/// merge(&mut limit, &4, &config)?;
/// assert_eq!(limit, 10);
/// # Ok::<_, patchmerge::MergeError>(())
/// ```
#[derive(Default)]
pub struct Transformers {
    by_type: HashMap<TypeId, Transformer>,
}

impl Transformers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transform` for values of type `T`, replacing any earlier
    /// registration.
    pub fn register<T, F>(&mut self, transform: F) -> &mut Self
    where
        T: Any,
        F: Fn(&mut T, &T) -> MergeResult<()> + Send + Sync + 'static,
    {
        let apply = move |dst: &mut dyn Any, src: &dyn Any| {
            match (dst.downcast_mut::<T>(), src.downcast_ref::<T>()) {
                (Some(dst), Some(src)) => transform(dst, src),
                _ => Err(MergeError::type_mismatch(
                    "$",
                    type_name::<T>(),
                    "another type",
                )),
            }
        };
        self.by_type.insert(
            TypeId::of::<T>(),
            Transformer {
                type_name: type_name::<T>(),
                apply: Box::new(apply),
            },
        );
        self
    }

    /// Whether a transformer is registered for `T`.
    #[must_use]
    pub fn contains<T: Any>(&self) -> bool {
        self.by_type.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered transformers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    pub(crate) fn apply<T: Any>(&self, dst: &mut T, src: &T) -> Option<MergeResult<()>> {
        let transformer = self.by_type.get(&TypeId::of::<T>())?;
        Some((transformer.apply)(dst, src))
    }
}

impl fmt::Debug for Transformers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.by_type.values().map(|t| t.type_name).collect();
        names.sort_unstable();
        f.debug_struct("Transformers").field("types", &names).finish()
    }
}
