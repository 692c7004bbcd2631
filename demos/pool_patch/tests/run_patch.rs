//! End-to-end runs of the demo against a jailed store directory.

use anyhow::{Result, ensure};
use clap::Parser;
use patchmerge::{ReconcileError, Reconciliation, StoreError};
use pool_patch::cli::PoolPatchCli;
use pool_patch::error::PoolPatchError;
use pool_patch::resources::Pool;
use pool_patch::{execute, write_outcome};
use rstest::rstest;
use serde_json::{Value, json};
use test_helpers::figment::{figment_error, with_jail};

const ID: &str = "~Common~web";
const STORED: &str = "store/~Common~web.json";

fn seed(jail: &mut figment::Jail, patch: &Value) -> figment::error::Result<()> {
    let stored = json!({
        "name": "web",
        "partition": "Common",
        "loadBalancingMode": "round-robin",
        "members": [{"name": "a:80", "ratio": 1}],
        "generation": 4
    });
    std::fs::create_dir_all("store").map_err(figment_error)?;
    jail.create_file(STORED, &stored.to_string())?;
    jail.create_file("patch.json", &patch.to_string())?;
    Ok(())
}

fn cli(extra: &[&str]) -> figment::error::Result<PoolPatchCli> {
    let argv = ["pool-patch", "--store", "store"]
        .into_iter()
        .chain(extra.iter().copied())
        .chain([ID, "patch.json"]);
    PoolPatchCli::try_parse_from(argv).map_err(figment_error)
}

fn stored_document() -> figment::error::Result<Value> {
    let text = std::fs::read_to_string(STORED).map_err(figment_error)?;
    serde_json::from_str(&text).map_err(figment_error)
}

fn member_names(pool: &Pool) -> Vec<&str> {
    pool.members.iter().map(|member| member.name.as_str()).collect()
}

#[rstest]
fn patch_is_applied_once() -> Result<()> {
    let (first, second, document) = with_jail(|jail| {
        seed(jail, &json!({"name": "web", "members": [{"name": "b:80"}]}))?;
        let args = cli(&["--strategy", "unique-last-seen"])?;
        let first = execute(&args).map_err(figment_error)?;
        let second = execute(&args).map_err(figment_error)?;
        Ok((first, second, stored_document()?))
    })?;
    let Reconciliation::Applied(pool) = first else {
        anyhow::bail!("first run should apply the patch");
    };
    ensure!(member_names(&pool) == ["a:80", "b:80"]);
    ensure!(matches!(second, Reconciliation::Unchanged(_)));
    ensure!(document.get("members") == Some(&json!([{"name": "a:80", "ratio": 1}, {"name": "b:80"}])));
    ensure!(document.get("generation") == Some(&json!(4)));
    ensure!(document.get("loadBalancingMode") == Some(&json!("round-robin")));
    Ok(())
}

#[rstest]
fn dry_run_prints_report_and_leaves_store() -> Result<()> {
    let (output, before, after) = with_jail(|jail| {
        seed(jail, &json!({"name": "web", "members": [{"name": "b:80"}]}))?;
        let before = stored_document()?;
        let args = cli(&["--strategy", "unique-first-seen", "--dry-run"])?;
        let outcome = execute(&args).map_err(figment_error)?;
        let mut output = Vec::new();
        write_outcome(&mut output, ID, &outcome).map_err(figment_error)?;
        Ok((output, before, stored_document()?))
    })?;
    let output = String::from_utf8(output)?;
    ensure!(before == after);
    ensure!(output.starts_with("Patching: ~Common~web\nPatch Diff:\n"));
    ensure!(output.contains("+      \"name\": \"b:80\""));
    ensure!(output.contains("Patch Data (merge strategy: unique-first-seen):\n"));
    Ok(())
}

#[rstest]
fn unchanged_outcome_is_one_line() -> Result<()> {
    let mut output = Vec::new();
    write_outcome(&mut output, ID, &Reconciliation::Unchanged(Pool::default()))?;
    ensure!(String::from_utf8(output)? == "~Common~web: already up to date\n");
    Ok(())
}

#[rstest]
fn missing_resource_fails_before_patching() -> Result<()> {
    let result = with_jail(|jail| {
        jail.create_file("patch.json", r#"{"name": "web"}"#)?;
        let args = cli(&["--strategy", "additive"])?;
        Ok(execute(&args))
    })?;
    ensure!(matches!(
        result,
        Err(PoolPatchError::Reconcile(ReconcileError::FetchFailed {
            source: StoreError::NotFound { .. },
            ..
        }))
    ));
    Ok(())
}

#[rstest]
fn dual_member_lists_in_patch_are_rejected() -> Result<()> {
    let result = with_jail(|jail| {
        seed(
            jail,
            &json!({
                "name": "web",
                "members": [{"name": "b:80"}],
                "membersReference": {"items": [{"name": "c:80"}]}
            }),
        )?;
        Ok(execute(&cli(&[])?))
    })?;
    ensure!(matches!(result, Err(PoolPatchError::ParsePatch { .. })));
    Ok(())
}

#[rstest]
fn settings_file_selects_strategy() -> Result<()> {
    let document = with_jail(|jail| {
        seed(jail, &json!({"name": "web", "members": [{"name": "a:80"}]}))?;
        jail.create_file("pool.toml", "strategy = \"additive\"\n")?;
        execute(&cli(&["--config", "pool.toml"])?).map_err(figment_error)?;
        stored_document()
    })?;
    ensure!(document.get("members") == Some(&json!([{"name": "a:80"}, {"name": "a:80", "ratio": 1}])));
    Ok(())
}
