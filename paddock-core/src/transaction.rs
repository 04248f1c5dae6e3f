//! The canonical flat transaction shape every subsystem converts into.

use serde::{Deserialize, Serialize};

/// Whether a period's figures are booked or projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Actuals,
    Forecast,
}

impl TransactionKind {
    /// Parse the platform's lowercase `data_type` / `transaction_type`
    /// values, title-casing them on the way in.
    pub fn from_source(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "actuals" => Some(TransactionKind::Actuals),
            "forecast" => Some(TransactionKind::Forecast),
            _ => None,
        }
    }
}

/// Normalized output of every converter (subsystem-agnostic).
///
/// Field names and casing are a compatibility contract with the downstream
/// reporting template — do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    /// Account code as text when the row carried one, else the account name.
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    /// Offset from the configured reference year, not an absolute year.
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_source() {
        assert_eq!(TransactionKind::from_source("actuals"), Some(TransactionKind::Actuals));
        assert_eq!(TransactionKind::from_source("FORECAST"), Some(TransactionKind::Forecast));
        assert_eq!(TransactionKind::from_source("budget"), None);
        assert_eq!(TransactionKind::from_source(""), None);
    }

    #[test]
    fn test_output_field_names() {
        let tx = NormalizedTransaction {
            kind: TransactionKind::Actuals,
            account: "400".to_string(),
            amount: -500.0,
            year: 1,
            month: 3,
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Type": "Actuals",
                "Account": "400",
                "Amount": -500.0,
                "Year": 1,
                "Month": 3,
            })
        );
    }

    #[test]
    fn test_roundtrip() {
        let tx = NormalizedTransaction {
            kind: TransactionKind::Forecast,
            account: "Interest Income".to_string(),
            amount: 120.5,
            year: -1,
            month: 12,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let back: NormalizedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
