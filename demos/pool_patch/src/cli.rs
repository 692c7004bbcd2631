//! Command-line arguments and their layering over file and environment
//! settings.

use camino::Utf8PathBuf;
use clap::Parser;
use figment::providers::Serialized;
use patchmerge::{MergeStrategy, ReconcileSettings, SettingsError};
use serde::Serialize;
use tracing::debug;

/// Reconcile a pool definition against a directory of JSON resources.
#[derive(Clone, Debug, Parser)]
#[command(name = "pool-patch", version, about)]
pub struct PoolPatchCli {
    /// Directory holding one JSON document per resource.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub store: Utf8PathBuf,
    /// TOML settings file; `PATCHMERGE_*` variables override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,
    /// Sequence strategy: overwrite, additive, unique-first-seen or
    /// unique-last-seen.
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<MergeStrategy>,
    /// Print the patch report instead of applying it.
    #[arg(long)]
    pub dry_run: bool,
    /// Let patch values replace non-empty stored values.
    #[arg(long = "override")]
    pub override_fields: bool,
    /// Resource identifier, e.g. `~Common~web`.
    pub id: String,
    /// JSON file holding the pool patch.
    pub patch: Utf8PathBuf,
}

/// Flags given on the command line; unset flags leave lower layers alone.
#[derive(Debug, Serialize)]
struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    strategy: Option<MergeStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    override_fields: Option<bool>,
}

impl PoolPatchCli {
    /// Resolve settings: defaults, the `--config` file, the environment and
    /// finally the flags given here.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a layer fails to parse.
    pub fn settings(&self) -> Result<ReconcileSettings, SettingsError> {
        let overrides = Overrides {
            strategy: self.strategy,
            dry_run: self.dry_run.then_some(true),
            override_fields: self.override_fields.then_some(true),
        };
        let settings: ReconcileSettings = ReconcileSettings::figment(self.config.as_deref())
            .merge(Serialized::defaults(overrides))
            .extract()
            .map_err(Box::new)?;
        debug!(
            strategy = %settings.strategy,
            dry_run = settings.dry_run,
            override_fields = settings.override_fields,
            "command-line settings resolved"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use test_helpers::figment::{figment_error, with_jail};

    use super::*;

    fn parse(args: &[&str]) -> Result<PoolPatchCli> {
        let argv = std::iter::once("pool-patch").chain(args.iter().copied());
        Ok(PoolPatchCli::try_parse_from(argv)?)
    }

    #[rstest]
    fn positional_arguments_are_required() {
        assert!(parse(&["~Common~web"]).is_err());
    }

    #[rstest]
    #[case::named("unique-last-seen", MergeStrategy::UniqueLastSeen)]
    #[case::alias("append", MergeStrategy::AppendAdditive)]
    fn strategy_flag_accepts_textual_names(
        #[case] flag: &str,
        #[case] expected: MergeStrategy,
    ) -> Result<()> {
        let cli = parse(&["--strategy", flag, "~Common~web", "patch.json"])?;
        ensure!(cli.strategy == Some(expected));
        Ok(())
    }

    #[rstest]
    fn unknown_strategy_is_rejected() {
        assert!(parse(&["--strategy", "sideways", "~Common~web", "patch.json"]).is_err());
    }

    #[rstest]
    fn flags_override_file_and_environment() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.create_file("pool.toml", "strategy = \"additive\"\ndry_run = false\n")?;
            jail.set_env("PATCHMERGE_OVERRIDE_FIELDS", "true");
            let cli = parse(&[
                "--config",
                "pool.toml",
                "--strategy",
                "unique-first-seen",
                "--dry-run",
                "~Common~web",
                "patch.json",
            ])
            .map_err(figment_error)?;
            cli.settings().map_err(figment_error)
        })?;
        ensure!(settings.strategy == MergeStrategy::UniqueFirstSeen);
        ensure!(settings.dry_run);
        ensure!(settings.override_fields);
        Ok(())
    }

    #[rstest]
    fn absent_flags_keep_file_values() -> Result<()> {
        let settings = with_jail(|jail| {
            jail.create_file("pool.toml", "strategy = \"unique-last-seen\"\ndry_run = true\n")?;
            let cli = parse(&["--config", "pool.toml", "~Common~web", "patch.json"])
                .map_err(figment_error)?;
            cli.settings().map_err(figment_error)
        })?;
        ensure!(settings.strategy == MergeStrategy::UniqueLastSeen);
        ensure!(settings.dry_run);
        ensure!(!settings.override_fields);
        Ok(())
    }
}
