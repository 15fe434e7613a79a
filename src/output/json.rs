// JSON result files — machine-readable scoring output.

use anyhow::{Context, Result};
use std::path::Path;

use super::ScoreRun;

/// Write a scoring run as pretty-printed JSON.
pub fn write_results(path: &Path, run: &ScoreRun) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("Failed to serialize results")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    Ok(())
}

pub fn read_results(path: &Path) -> Result<ScoreRun> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid results file {}", path.display()))
}
