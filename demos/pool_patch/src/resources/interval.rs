//! Refresh intervals that arrive either as seconds or as a keyword.

use patchmerge::structural::{Kind, Structural};
use patchmerge::{MergeResult, Mergeable, Merger};
use serde::{Deserialize, Serialize};

/// How often an FQDN node re-resolves its name.
///
/// The store accepts a number of seconds or the keyword `ttl`. Merging two
/// intervals of different shapes is a type mismatch unless
/// `override_fields` is set, in which case the incoming interval wins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interval {
    /// A fixed period.
    Seconds(u64),
    /// A keyword such as `ttl`.
    Keyword(String),
}

impl Interval {
    fn value(&self) -> &dyn Structural {
        match self {
            Self::Seconds(seconds) => seconds,
            Self::Keyword(keyword) => keyword,
        }
    }
}

impl Structural for Interval {
    fn kind(&self) -> Kind {
        Kind::Polymorphic
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn type_name(&self) -> &'static str {
        self.value().type_name()
    }

    fn target(&self) -> Option<&dyn Structural> {
        Some(self.value())
    }
}

impl Mergeable for Interval {
    fn merge_from(&mut self, src: &Self, merger: &mut Merger<'_>) -> MergeResult<()> {
        if merger.config().override_fields {
            self.clone_from(src);
            return Ok(());
        }
        match (self, src) {
            (Self::Seconds(dst), Self::Seconds(src)) => merger.merge(dst, src),
            (Self::Keyword(dst), Self::Keyword(src)) => merger.merge(dst, src),
            (dst, src) => Err(merger.type_mismatch(dst.type_name(), src.type_name())),
        }
    }
}
