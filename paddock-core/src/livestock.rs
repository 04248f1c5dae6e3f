//! Livestock output shapes: per-event records and per-tracker summaries.

use serde::{Deserialize, Serialize};

/// Livestock event kinds. The platform emits more transitions than these;
/// only purchases and sales take part in reconciliation, the rest pass
/// through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Purchase,
    Sale,
    #[serde(untagged)]
    Other(String),
}

/// One normalized livestock event.
///
/// Field presence is part of the contract: `Amount` is omitted when the
/// source amount is missing or zero, `Weight` survives an explicit zero,
/// and `Type` is always emitted, null when the source has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LivestockRecord {
    #[serde(rename = "StockClass")]
    pub stock_class: String,
    #[serde(rename = "Transition")]
    pub transition: Transition,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    /// Offset from the configured reference year.
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    /// Absolute purchase/sale value, omitted when the source had none.
    #[serde(rename = "Amount", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Weight per head; zero is a valid weight, distinct from absent.
    #[serde(rename = "Weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

/// Per-tracker summary written alongside the tracker's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSummary {
    #[serde(rename = "TrackerType")]
    pub tracker_type: String,
    #[serde(rename = "StockTypeUuid")]
    pub stock_type_uuid: String,
    #[serde(rename = "PurchaseAccount")]
    pub purchase_account: i64,
    #[serde(rename = "SalesAccount")]
    pub sales_account: i64,
    #[serde(rename = "StockClasses")]
    pub stock_classes: Vec<StockClassSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockClassSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Enabled")]
    pub enabled: bool,
    /// Not exported by the platform; always null until opening stock is.
    #[serde(rename = "OpeningQuantity")]
    pub opening_quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LivestockRecord {
        LivestockRecord {
            stock_class: "Ewes".to_string(),
            transition: Transition::Sale,
            quantity: 40.0,
            year: 1,
            month: 5,
            amount: Some(4800.0),
            weight: None,
            kind: None,
        }
    }

    #[test]
    fn test_transition_known_and_other() {
        assert_eq!(
            serde_json::from_str::<Transition>(r#""purchase""#).unwrap(),
            Transition::Purchase
        );
        assert_eq!(
            serde_json::from_str::<Transition>(r#""natural_increase""#).unwrap(),
            Transition::Other("natural_increase".to_string())
        );
        assert_eq!(
            serde_json::to_string(&Transition::Other("death".to_string())).unwrap(),
            r#""death""#
        );
    }

    #[test]
    fn test_amount_omitted_when_absent() {
        let mut r = record();
        r.amount = None;
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("Amount").is_none());
        assert_eq!(json.get("Type"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_zero_weight_survives() {
        let mut r = record();
        r.weight = Some(0.0);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["Weight"], serde_json::json!(0.0));
    }

    #[test]
    fn test_absent_weight_omitted() {
        let json = serde_json::to_value(record()).unwrap();
        assert!(json.get("Weight").is_none());
    }

    #[test]
    fn test_type_always_present() {
        let mut r = record();
        r.kind = Some("opening".to_string());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["Type"], serde_json::json!("opening"));

        r.kind = None;
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("Type").is_some());
        assert_eq!(json["Type"], serde_json::Value::Null);
    }
}
