//! The recursive merge driver and the per-kind rules it dispatches to.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;

use tracing::trace;

use super::{MergeConfig, MergeStrategy};
use crate::named_set::NamedSet;
use crate::structural::{Kind, Structural};
use crate::{MergeError, MergeResult, NodeId};

/// A value the engine can merge into another value of the same type.
///
/// Implemented by `#[derive(Mergeable)]` for records and by the crate for
/// scalars, `Vec`, `Option`, maps, boxed polymorphic values and
/// [`Shared`](crate::Shared) nodes.
pub trait Mergeable: Structural + Clone {
    /// Apply the merge rule for this type, combining `src` into `self`.
    ///
    /// Callers should go through [`Merger::merge`], which applies
    /// `skip_empty_fields` and registered transformers first.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TypeMismatch`] when nested polymorphic values
    /// disagree on their concrete type.
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()>;

    /// Merge `src` into `self` when both are values of a mapping.
    ///
    /// # Errors
    ///
    /// As for [`Mergeable::merge_from`].
    fn merge_entry(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        merger.merge(self, src)
    }

    /// Value to store under a mapping key that the destination lacks.
    ///
    /// # Errors
    ///
    /// As for [`Mergeable::merge_from`].
    fn entry_from(src: &Self, _merger: &mut Merger<'_>) -> MergeResult<Self> {
        Ok(src.clone())
    }
}

/// Counters describing a completed merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Sequence elements dropped by keyed strategies for lack of a name.
    pub skipped_keys: usize,
    /// Nodes handled by a registered transformer.
    pub transformed: usize,
    /// Shared nodes not descended into because they were already visited.
    pub cycles_cut: usize,
}

#[derive(Clone, Debug)]
enum Segment {
    Field(&'static str),
    Key(String),
}

/// State for one merge invocation.
///
/// Holds the configuration, the visited set used to terminate on cyclic
/// graphs, the current field path and the running [`MergeStats`]. A merger
/// must not be shared between invocations.
pub struct Merger<'c> {
    config: &'c MergeConfig,
    visited: HashSet<(NodeId, TypeId)>,
    path: Vec<Segment>,
    stats: MergeStats,
}

impl<'c> Merger<'c> {
    /// Start a merge with `config`.
    #[must_use]
    pub fn new(config: &'c MergeConfig) -> Self {
        Self {
            config,
            visited: HashSet::new(),
            path: Vec::new(),
            stats: MergeStats::default(),
        }
    }

    /// The configuration this merge runs with.
    #[must_use]
    pub const fn config(&self) -> &'c MergeConfig {
        self.config
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Merge `src` into `dst`.
    ///
    /// Empty destinations are left alone when `skip_empty_fields` is set. A
    /// transformer registered for `T` replaces the default rule when the
    /// destination is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TypeMismatch`] from nested polymorphic values.
    /// The destination is not restored on error.
    pub fn merge<T: Mergeable>(&mut self, dst: &mut T, src: &T) -> MergeResult<()> {
        let config = self.config;
        let dst_empty = dst.is_empty_value();
        if config.skip_empty_fields && dst_empty {
            trace!(path = %self.path(), "destination empty; skipped");
            return Ok(());
        }
        if !dst_empty
            && let Some(result) = config
                .transformers
                .as_deref()
                .and_then(|transformers| transformers.apply(dst, src))
        {
            self.stats.transformed += 1;
            trace!(path = %self.path(), type_name = dst.type_name(), "transformer applied");
            return result;
        }
        T::merge_from(dst, src, self)
    }

    /// Merge a record field, recording its name in the error path.
    ///
    /// # Errors
    ///
    /// As for [`Merger::merge`].
    pub fn merge_field<T: Mergeable>(
        &mut self,
        name: &'static str,
        dst: &mut T,
        src: &T,
    ) -> MergeResult<()> {
        self.path.push(Segment::Field(name));
        let result = self.merge(dst, src);
        self.path.pop();
        result
    }

    /// Build a type mismatch error located at the current path.
    #[must_use]
    pub fn type_mismatch(&self, expected: &'static str, found: &'static str) -> MergeError {
        MergeError::type_mismatch(self.path(), expected, found)
    }

    /// Record a visit to a shared node.
    ///
    /// Returns `false` when the node was already visited during this merge.
    pub fn visit(&mut self, id: NodeId, ty: TypeId) -> bool {
        let first = self.visited.insert((id, ty));
        if !first {
            self.stats.cycles_cut += 1;
            trace!(path = %self.path(), node = %id, "node already merged");
        }
        first
    }

    /// Count a shared node that could not be entered because it is being
    /// merged further up the current path.
    pub fn note_active(&mut self, id: NodeId) {
        self.stats.cycles_cut += 1;
        trace!(path = %self.path(), node = %id, "node on the active path");
    }

    pub(crate) fn with_key<K: fmt::Display, R>(
        &mut self,
        key: &K,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.path.push(Segment::Key(key.to_string()));
        let result = f(self);
        self.path.pop();
        result
    }

    pub(crate) const fn note_skipped(&mut self, count: usize) {
        self.stats.skipped_keys += count;
    }

    /// Current field path, rendered as `$.field[key]`.
    #[must_use]
    pub fn path(&self) -> String {
        let mut rendered = String::from("$");
        for segment in &self.path {
            match segment {
                Segment::Field(name) => {
                    rendered.push('.');
                    rendered.push_str(name);
                }
                Segment::Key(key) => {
                    rendered.push('[');
                    rendered.push_str(key);
                    rendered.push(']');
                }
            }
        }
        rendered
    }
}

/// Scalar rule: copy `src` when it is non-empty and either override is set
/// or `dst` is empty.
///
/// Also used for records without visible fields.
///
/// # Errors
///
/// Never fails; the `Result` keeps the signature uniform with the other
/// rules.
pub fn merge_scalar<T: Mergeable>(dst: &mut T, src: &T, merger: &Merger<'_>) -> MergeResult<()> {
    if !src.is_empty_value() && (merger.config().override_fields || dst.is_empty_value()) {
        dst.clone_from(src);
    }
    Ok(())
}

/// Combine two sequences according to the configured strategy.
///
/// `Overwrite` copies `src`; `AppendAdditive` concatenates; the unique
/// strategies deduplicate by name and return the survivors ordered by name.
pub fn merge_sequence<T: Mergeable>(dst: &mut Vec<T>, src: &[T], merger: &mut Merger<'_>) {
    match merger.config().strategy {
        MergeStrategy::Overwrite => {
            dst.clear();
            dst.extend_from_slice(src);
        }
        MergeStrategy::AppendAdditive => dst.extend_from_slice(src),
        MergeStrategy::UniqueFirstSeen => {
            let mut unique = NamedSet::new();
            for item in dst.drain(..) {
                unique.add(item);
            }
            for item in src {
                unique.add(item.clone());
            }
            merger.note_skipped(unique.skipped());
            *dst = unique.into_sorted_vec();
        }
        MergeStrategy::UniqueLastSeen => {
            let mut unique = NamedSet::new();
            for item in dst.drain(..) {
                unique.upsert(item);
            }
            for item in src {
                unique.upsert(item.clone());
            }
            merger.note_skipped(unique.skipped());
            *dst = unique.into_sorted_vec();
        }
    }
}

/// Mapping rule for one source entry.
///
/// Returns the value to insert when the destination lacks the key.
pub(crate) fn merge_mapping_entry<V: Mergeable>(
    dst: Option<&mut V>,
    src: &V,
    merger: &mut Merger<'_>,
) -> MergeResult<Option<V>> {
    let Some(existing) = dst else {
        return V::entry_from(src, merger).map(Some);
    };
    match src.kind() {
        Kind::Sequence => existing.merge_entry(src, merger)?,
        kind if kind.is_composite() => merger.merge(existing, src)?,
        _ => {
            if merger.config().override_fields {
                existing.clone_from(src);
            }
        }
    }
    Ok(None)
}
