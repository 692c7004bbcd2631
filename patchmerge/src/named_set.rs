//! Deduplicating set keyed by a name extracted from each element.
//!
//! Backs the [`MergeStrategy::UniqueFirstSeen`](crate::MergeStrategy) and
//! [`MergeStrategy::UniqueLastSeen`](crate::MergeStrategy) sequence strategies.
//! Elements whose name cannot be derived are left out of the set; each drop
//! is logged and counted so callers can surface it.

use std::collections::BTreeMap;

use tracing::warn;

use crate::structural::{Kind, Scalar, Structural, resolve};

/// Extract the key used to deduplicate `value`.
///
/// Optional and polymorphic wrappers are dereferenced first. A string scalar
/// is used verbatim; a record contributes the string held by its key field
/// (the field marked `#[merge(name)]`, or the one called `name`). Anything
/// else, including an empty string, yields `None`.
///
/// # Examples
///
/// ```
/// use patchmerge::named_set::extract_name;
///
/// assert_eq!(extract_name(&String::from("web")), Some("web"));
/// assert_eq!(extract_name(&Some(String::from("api"))), Some("api"));
/// assert_eq!(extract_name(&7_u32), None);
/// ```
#[must_use]
pub fn extract_name(value: &dyn Structural) -> Option<&str> {
    let value = resolve(value)?;
    let key = match value.kind() {
        Kind::Scalar => value.scalar(),
        Kind::Record => value
            .fields()
            .into_iter()
            .find(|field| field.is_key())
            .and_then(|field| resolve(field.value()))
            .and_then(Structural::scalar),
        _ => None,
    };
    match key {
        Some(Scalar::Str(name)) if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Set of elements keyed by their extracted name.
///
/// Materialisation is ordered by key, ascending and byte-wise, so repeated
/// merges of the same inputs always produce the same sequence.
///
/// # Examples
///
/// ```
/// use patchmerge::NamedSet;
///
/// let mut set = NamedSet::new();
/// assert!(set.add(String::from("b")));
/// assert!(set.add(String::from("a")));
/// assert!(!set.add(String::from("b")));
/// assert_eq!(set.into_sorted_vec(), vec!["a", "b"]);
/// ```
#[derive(Clone, Debug)]
pub struct NamedSet<T> {
    items: BTreeMap<String, T>,
    skipped: usize,
}

impl<T: Structural> Default for NamedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Structural> NamedSet<T> {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            skipped: 0,
        }
    }

    /// Insert `value` unless an element with the same name is already held.
    ///
    /// Returns whether the value was inserted.
    pub fn add(&mut self, value: T) -> bool {
        let Some(key) = self.key_for(&value) else {
            return false;
        };
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, value);
        true
    }

    /// Insert `value`, replacing any element with the same name.
    ///
    /// Returns whether the value was stored.
    pub fn upsert(&mut self, value: T) -> bool {
        let Some(key) = self.key_for(&value) else {
            return false;
        };
        self.items.insert(key, value);
        true
    }

    /// Number of elements held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements dropped because no name could be extracted.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Consume the set, returning its elements ordered by name.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.items.into_values().collect()
    }

    fn key_for(&mut self, value: &T) -> Option<String> {
        if let Some(name) = extract_name(value) {
            return Some(name.to_owned());
        }
        self.skipped += 1;
        warn!(
            type_name = value.type_name(),
            kind = ?value.kind(),
            "element has no usable name; excluded from keyed set"
        );
        None
    }
}
