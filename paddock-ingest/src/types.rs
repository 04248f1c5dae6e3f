//! Raw shapes of the platform's JSON exports, as the export layer delivers
//! them. Field names mirror the source payloads; normalization happens in
//! paddock-ledger.

use paddock_core::{AccountClass, Transition};
use serde::Deserialize;
use std::collections::BTreeMap;

/// An account code as exported: the platform sends numbers, numeric text,
/// or free-form text depending on the account's origin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    Number(i64),
    Text(String),
}

impl RawCode {
    /// Numeric form when there is one; free-form text degrades to `None`
    /// and the account falls back to its name as identifier.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawCode::Number(n) => Some(*n),
            RawCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One account from the chart-of-accounts export.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccount {
    #[serde(default)]
    pub code: Option<RawCode>,
    pub name: String,
    pub class: AccountClass,
    #[serde(rename = "type", default)]
    pub account_type: String,
    #[serde(default)]
    pub tax_type: Option<String>,
    /// Set when the platform marks this as one of its fixed system accounts.
    #[serde(default)]
    pub system_account: bool,
    #[serde(default)]
    pub active: bool,
}

/// Envelope the export layer writes around each cashflow report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEnvelope {
    pub data: CashflowReport,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CashflowReport {
    pub sections: BTreeMap<String, Section>,
    /// Period metadata keyed by `YYYY-MM`.
    pub period: BTreeMap<String, PeriodMeta>,
}

/// Whether a month's figures are booked or projected.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodMeta {
    pub data_type: String,
}

/// A node of the report tree.
///
/// `totals`, `rows` and `sections` are genuinely optional: an absent map
/// means the branch does not exist, which is not the same as an empty one —
/// the zero-totals pruning step relies on the distinction.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub totals: Option<BTreeMap<String, SectionTotal>>,
    #[serde(default)]
    pub rows: Option<BTreeMap<String, Row>>,
    #[serde(default)]
    pub sections: Option<BTreeMap<String, Section>>,
}

/// Aggregate value a section carries per period, used only for pruning.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionTotal {
    pub value: f64,
}

/// A leaf row: one account's values across the report's periods.
#[derive(Debug, Clone, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub account_code: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, RowValue>>,
}

/// One period's cell in a report row.
#[derive(Debug, Clone, Deserialize)]
pub struct RowValue {
    /// `YYYY-MM`, duplicated from the map key by the platform.
    pub date: String,
    pub value: f64,
}

/// A livestock tracker: a grouping entity owning named stock classes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTracker {
    pub id: String,
    pub name: String,
    pub stock_type_id: String,
    #[serde(default)]
    pub stock_classes: Vec<RawStockClass>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStockClass {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

/// One livestock inventory event.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLivestockEvent {
    pub tracker_id: String,
    pub stock_class_id: String,
    pub transition: Transition,
    pub quantity: f64,
    pub accrual_date: AccrualDate,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub weight_per_head: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccrualDate {
    /// `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
}

/// A tracker's transition-to-account mapping, with the account uuid already
/// resolved to its numeric code by the export layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAccountMapping {
    pub transition: Transition,
    pub account_code: i64,
}

/// An invoice from the invoicing subsystem. Only the first line takes part
/// in reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInvoice {
    /// ISO date string.
    pub accrual_date: String,
    #[serde(default)]
    pub lines: Vec<InvoiceLine>,
    pub transaction_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceLine {
    /// Account name; resolution to a code goes through the account list.
    pub account: String,
    pub amount: f64,
}
