//! Merge configuration: strategy selection and behaviour flags.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Transformers;

/// Policy for combining two sequences.
///
/// The textual names (`overwrite`, `additive`, `unique-first-seen`,
/// `unique-last-seen`) are accepted by [`FromStr`], serde and the settings
/// loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    /// Replace the destination sequence wholesale.
    #[default]
    Overwrite,
    /// Concatenate destination then source, keeping duplicates.
    #[serde(rename = "additive", alias = "append")]
    AppendAdditive,
    /// Deduplicate by name; the destination's element wins.
    UniqueFirstSeen,
    /// Deduplicate by name; the source's element wins.
    UniqueLastSeen,
}

impl MergeStrategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Overwrite,
        Self::AppendAdditive,
        Self::UniqueFirstSeen,
        Self::UniqueLastSeen,
    ];

    /// Canonical textual name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::AppendAdditive => "additive",
            Self::UniqueFirstSeen => "unique-first-seen",
            Self::UniqueLastSeen => "unique-last-seen",
        }
    }

    /// Whether the strategy combines existing sequence content rather than
    /// replacing it.
    #[must_use]
    pub const fn combines(self) -> bool {
        !matches!(self, Self::Overwrite)
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown strategy name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown merge strategy '{0}' (expected overwrite, additive, unique-first-seen or unique-last-seen)")]
pub struct ParseStrategyError(String);

impl FromStr for MergeStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "additive" | "append" => Ok(Self::AppendAdditive),
            "unique-first-seen" => Ok(Self::UniqueFirstSeen),
            "unique-last-seen" => Ok(Self::UniqueLastSeen),
            _ => Err(ParseStrategyError(s.to_owned())),
        }
    }
}

/// Options controlling a single merge.
///
/// `override_fields` decides whether a non-empty destination may be
/// replaced; `skip_empty_fields` leaves empty destinations untouched. The two
/// are independent.
///
/// # Examples
///
/// ```
/// use patchmerge::{MergeConfig, MergeStrategy};
///
/// let config = MergeConfig::new()
///     .with_strategy(MergeStrategy::UniqueLastSeen)
///     .with_override();
/// assert!(config.override_fields);
/// assert!(!config.skip_empty_fields);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MergeConfig {
    /// Leave empty destination nodes untouched.
    pub skip_empty_fields: bool,
    /// Allow non-empty source values to replace non-empty destinations.
    pub override_fields: bool,
    /// Sequence combination policy.
    pub strategy: MergeStrategy,
    /// Per-type overrides of the default merge rules.
    pub transformers: Option<Arc<Transformers>>,
}

impl MergeConfig {
    /// Configuration with every flag off and the `Overwrite` strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            skip_empty_fields: false,
            override_fields: false,
            strategy: MergeStrategy::Overwrite,
            transformers: None,
        }
    }

    /// Set the sequence strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Allow non-empty destinations to be replaced.
    #[must_use]
    pub const fn with_override(mut self) -> Self {
        self.override_fields = true;
        self
    }

    /// Toggle skipping of empty destinations.
    #[must_use]
    pub const fn with_skip_empty_fields(mut self, skip: bool) -> Self {
        self.skip_empty_fields = skip;
        self
    }

    /// Install a transformer registry.
    #[must_use]
    pub fn with_transformers(mut self, transformers: Arc<Transformers>) -> Self {
        self.transformers = Some(transformers);
        self
    }
}
