//! Dry-run reporting.

use std::fmt;

use serde::Serialize;
use similar::TextDiff;

use crate::MergeStrategy;

/// What a reconciliation would send, and how it would change the resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchReport {
    /// Identifier of the resource being reconciled.
    pub id: String,
    /// Strategy the patch was computed with.
    pub strategy: MergeStrategy,
    /// Unified diff from the existing resource to the projected one.
    pub diff: String,
    /// Pretty JSON of the payload that would be sent.
    pub payload: String,
}

impl PatchReport {
    pub(super) fn render<R: Serialize>(
        id: &str,
        strategy: MergeStrategy,
        existing: &R,
        projected: &R,
        patch: &R,
    ) -> serde_json::Result<Self> {
        let before = pretty(existing)?;
        let after = pretty(projected)?;
        let diff = TextDiff::from_lines(&before, &after)
            .unified_diff()
            .context_radius(3)
            .header("existing", "patched")
            .to_string();
        Ok(Self {
            id: id.to_owned(),
            strategy,
            diff,
            payload: pretty(patch)?,
        })
    }
}

fn pretty<R: Serialize>(value: &R) -> serde_json::Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patching: {}", self.id)?;
        writeln!(f, "Patch Diff:")?;
        write!(f, "{}", self.diff)?;
        writeln!(f, "Patch Data (merge strategy: {}):", self.strategy)?;
        write!(f, "{}", self.payload)
    }
}
