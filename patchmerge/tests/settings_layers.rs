//! Layered loading of `ReconcileSettings` from files and the environment.

use anyhow::{Result, ensure};
use camino::Utf8Path;
use patchmerge::{MergeStrategy, ReconcileSettings};
use rstest::rstest;
use test_helpers::figment::{figment_error, with_jail};

const FILE: &str = "reconcile.toml";

fn load() -> figment::error::Result<ReconcileSettings> {
    ReconcileSettings::load(Some(Utf8Path::new(FILE))).map_err(figment_error)
}

#[rstest]
#[case::overwrite("overwrite", MergeStrategy::Overwrite)]
#[case::additive("additive", MergeStrategy::AppendAdditive)]
#[case::append_alias("append", MergeStrategy::AppendAdditive)]
#[case::first("unique-first-seen", MergeStrategy::UniqueFirstSeen)]
#[case::last("unique-last-seen", MergeStrategy::UniqueLastSeen)]
fn file_selects_strategy(#[case] name: &str, #[case] expected: MergeStrategy) -> Result<()> {
    let settings = with_jail(|jail| {
        jail.create_file(FILE, &format!("strategy = \"{name}\""))?;
        load()
    })?;
    ensure!(settings.strategy == expected);
    ensure!(!settings.dry_run);
    Ok(())
}

#[rstest]
fn environment_wins_over_file() -> Result<()> {
    let settings = with_jail(|jail| {
        jail.create_file(FILE, "strategy = \"additive\"\noverride_fields = false\n")?;
        jail.set_env("PATCHMERGE_OVERRIDE_FIELDS", "true");
        jail.set_env("PATCHMERGE_DRY_RUN", "true");
        load()
    })?;
    ensure!(settings.strategy == MergeStrategy::AppendAdditive);
    ensure!(settings.override_fields);
    let config = settings.patch_config();
    ensure!(config.dry_run);
    ensure!(config.merge.override_fields);
    Ok(())
}

#[rstest]
fn missing_file_falls_back_to_defaults() -> Result<()> {
    let settings = with_jail(|_| load())?;
    ensure!(settings == ReconcileSettings::default());
    Ok(())
}

#[rstest]
fn malformed_file_is_an_error() {
    let result = with_jail(|jail| {
        jail.create_file(FILE, "strategy = [1, 2]")?;
        load()
    });
    assert!(result.is_err());
}

#[rstest]
fn unknown_environment_strategy_is_rejected() {
    let result = with_jail(|jail| {
        jail.create_file(FILE, "dry_run = true\n")?;
        jail.set_env("PATCHMERGE_STRATEGY", "sideways");
        load()
    });
    assert!(result.is_err());
}
