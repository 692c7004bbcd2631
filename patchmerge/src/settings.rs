//! Layered reconciliation settings.
//!
//! Settings are resolved from three layers, later ones winning: built-in
//! defaults, an optional TOML file and `PATCHMERGE_`-prefixed environment
//! variables.
//!
//! ```toml
//! strategy = "unique-last-seen"
//! dry_run = true
//! override_fields = false
//! ```

use camino::Utf8Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::merge::{MergeConfig, MergeStrategy};
use crate::reconcile::PatchConfig;
use crate::SettingsError;

/// Prefix for environment overrides, e.g. `PATCHMERGE_STRATEGY=additive`.
pub const ENV_PREFIX: &str = "PATCHMERGE_";

/// User-facing knobs for [`reconcile`](crate::reconcile).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileSettings {
    /// Sequence strategy, by its textual name.
    pub strategy: MergeStrategy,
    /// Report changes without sending them.
    pub dry_run: bool,
    /// Let patch values replace non-empty existing values.
    pub override_fields: bool,
}

impl ReconcileSettings {
    /// The layered provider stack, exposed so callers can add their own
    /// layers before extracting.
    #[must_use]
    pub fn figment(file: Option<&Utf8Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path.as_std_path()));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Resolve settings from defaults, `file` (if any) and the environment.
    ///
    /// A file that does not exist contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a layer cannot be parsed or holds
    /// an unknown strategy name.
    pub fn load(file: Option<&Utf8Path>) -> Result<Self, SettingsError> {
        let settings: Self = Self::figment(file).extract().map_err(Box::new)?;
        debug!(
            strategy = %settings.strategy,
            dry_run = settings.dry_run,
            override_fields = settings.override_fields,
            "reconcile settings loaded"
        );
        Ok(settings)
    }

    /// Merge options described by these settings.
    #[must_use]
    pub fn merge_config(&self) -> MergeConfig {
        let config = MergeConfig::new().with_strategy(self.strategy);
        if self.override_fields {
            config.with_override()
        } else {
            config
        }
    }

    /// Reconciliation options described by these settings.
    #[must_use]
    pub fn patch_config(&self) -> PatchConfig {
        PatchConfig::new(self.merge_config()).with_dry_run(self.dry_run)
    }
}
