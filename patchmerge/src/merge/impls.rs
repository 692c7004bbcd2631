//! [`Mergeable`] implementations for scalars and standard containers.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use super::engine::{Mergeable, Merger, merge_mapping_entry, merge_scalar, merge_sequence};
use crate::MergeResult;

macro_rules! scalar_mergeable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Mergeable for $ty {
                fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
                    merge_scalar(self, src, merger)
                }
            }
        )+
    };
}

scalar_mergeable!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
);

impl<T: Mergeable> Mergeable for Vec<T> {
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        merge_sequence(self, src, merger);
        Ok(())
    }

    fn merge_entry(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        merge_sequence(self, src, merger);
        Ok(())
    }

    fn entry_from(src: &Self, merger: &mut Merger<'_>) -> MergeResult<Self> {
        let mut entry = Self::new();
        merge_sequence(&mut entry, src, merger);
        Ok(entry)
    }
}

impl<T: Mergeable> Mergeable for Option<T> {
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let Some(incoming) = src else {
            return Ok(());
        };
        if !merger.config().override_fields
            && let Some(existing) = self.as_mut()
        {
            return merger.merge(existing, incoming);
        }
        *self = Some(incoming.clone());
        Ok(())
    }
}

impl<K, V> Mergeable for BTreeMap<K, V>
where
    K: Ord + Clone + Display + 'static,
    V: Mergeable,
{
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        for (key, incoming) in src {
            let inserted =
                merger.with_key(key, |merger| merge_mapping_entry(self.get_mut(key), incoming, merger))?;
            if let Some(value) = inserted {
                self.insert(key.clone(), value);
            }
        }
        Ok(())
    }
}

impl<K, V, S> Mergeable for HashMap<K, V, S>
where
    K: Eq + Hash + Ord + Clone + Display + 'static,
    V: Mergeable,
    S: BuildHasher + Clone + 'static,
{
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        let mut keys: Vec<&K> = src.keys().collect();
        keys.sort();
        for key in keys {
            let Some(incoming) = src.get(key) else {
                continue;
            };
            let inserted =
                merger.with_key(key, |merger| merge_mapping_entry(self.get_mut(key), incoming, merger))?;
            if let Some(value) = inserted {
                self.insert(key.clone(), value);
            }
        }
        Ok(())
    }
}
