//! File loaders for the platform's JSON exports.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{
    RawAccount, RawAccountMapping, RawInvoice, RawLivestockEvent, RawTracker, ReportEnvelope,
};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// The chart-of-accounts export: arbitrary keys mapping to account objects.
pub fn load_accounts(path: &Path) -> Result<BTreeMap<String, RawAccount>> {
    read_json(path)
}

/// One cashflow report envelope.
pub fn load_report(path: &Path) -> Result<ReportEnvelope> {
    read_json(path)
}

pub fn load_trackers(path: &Path) -> Result<Vec<RawTracker>> {
    read_json(path)
}

pub fn load_livestock_events(path: &Path) -> Result<Vec<RawLivestockEvent>> {
    read_json(path)
}

/// Account mappings keyed by tracker id.
pub fn load_account_mappings(path: &Path) -> Result<BTreeMap<String, Vec<RawAccountMapping>>> {
    read_json(path)
}

pub fn load_invoices(path: &Path) -> Result<Vec<RawInvoice>> {
    read_json(path)
}

/// Every `*cashflow.json` in the data directory, sorted for stable runs.
pub fn find_cashflow_reports(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        let is_report = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("cashflow.json"));
        if is_report {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_cashflow_reports() {
        let dir = std::env::temp_dir().join("paddock-ingest-find-reports");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("2024_cashflow.json"), "{}").unwrap();
        fs::write(dir.join("2023_cashflow.json"), "{}").unwrap();
        fs::write(dir.join("accounts.json"), "{}").unwrap();

        let found = find_cashflow_reports(&dir).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["2023_cashflow.json", "2024_cashflow.json"]);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_accounts(Path::new("/nonexistent/accounts.json")).unwrap_err();
        assert!(err.to_string().contains("accounts.json"));
    }
}
