//! Output writers: pretty JSON files and the reporting-template CSV.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use paddock_core::NormalizedTransaction;

/// Write a value as pretty-printed JSON, creating parent directories as
/// needed (per-tracker outputs live in their own subdirectories).
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let s = serde_json::to_string_pretty(value).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the normalized ledger as CSV for the reporting template.
pub fn write_ledger_csv(path: &Path, transactions: &[NormalizedTransaction]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("open {}", path.display()))?;
    for tx in transactions {
        wtr.serialize(tx)?;
    }
    wtr.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
