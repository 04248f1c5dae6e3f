use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use paddock_ledger::{DropRule, FlattenRules};

/// Farm-specific settings for a batch run, read from `paddock.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Year all output `Year` offsets are relative to.
    pub reference_year: i32,
    /// Migration artifacts: values on these accounts dated after the
    /// cutover are dropped from the ledger.
    #[serde(default, rename = "drop")]
    pub drops: Vec<DropRuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropRuleConfig {
    pub account: String,
    /// `YYYY-MM-DD`.
    pub after: NaiveDate,
}

impl Default for FarmConfig {
    fn default() -> Self {
        // The historical farm: offsets against 2023, and account 155 was
        // migrated off the platform mid-2022.
        Self {
            reference_year: 2023,
            drops: vec![DropRuleConfig {
                account: "155".to_string(),
                after: NaiveDate::from_ymd_opt(2022, 7, 1).expect("valid cutover date"),
            }],
        }
    }
}

impl FarmConfig {
    pub fn flatten_rules(&self) -> FlattenRules {
        FlattenRules {
            reference_year: self.reference_year,
            drops: self
                .drops
                .iter()
                .map(|d| DropRule {
                    account: d.account.clone(),
                    after: d.after,
                })
                .collect(),
        }
    }
}

/// Load the farm config, falling back to the defaults when the file does
/// not exist yet.
pub fn load_config(path: &Path) -> Result<FarmConfig> {
    if !path.exists() {
        return Ok(FarmConfig::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// Write a default config for editing.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    let s = toml::to_string_pretty(&FarmConfig::default()).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_carries_legacy_drop_rule() {
        let cfg = FarmConfig::default();
        assert_eq!(cfg.reference_year, 2023);
        assert_eq!(cfg.drops.len(), 1);
        assert_eq!(cfg.drops[0].account, "155");
    }

    #[test]
    fn test_toml_roundtrip() {
        let cfg = FarmConfig::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: FarmConfig = toml::from_str(&s).unwrap();
        assert_eq!(back.reference_year, cfg.reference_year);
        assert_eq!(back.drops[0].after, cfg.drops[0].after);
    }

    #[test]
    fn test_parse_without_drops() {
        let cfg: FarmConfig = toml::from_str("reference_year = 2025\n").unwrap();
        assert_eq!(cfg.reference_year, 2025);
        assert!(cfg.drops.is_empty());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = load_config(Path::new("/nonexistent/paddock.toml")).unwrap();
        assert_eq!(cfg.reference_year, 2023);
    }
}
