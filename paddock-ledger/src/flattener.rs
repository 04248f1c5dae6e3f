//! Flattens the platform's nested cashflow report into ledger transactions.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::classifier::Classification;
use paddock_core::{AccountId, NormalizedTransaction, Period, TransactionKind};
use paddock_ingest::types::{CashflowReport, PeriodMeta, Row, Section};

/// Farm-specific flattening parameters.
#[derive(Debug, Clone)]
pub struct FlattenRules {
    /// Year all output `Year` offsets are relative to.
    pub reference_year: i32,
    /// Migration artifacts: values on these accounts dated after the
    /// cutover are dropped entirely.
    pub drops: Vec<DropRule>,
}

#[derive(Debug, Clone)]
pub struct DropRule {
    pub account: String,
    pub after: NaiveDate,
}

impl FlattenRules {
    pub fn new(reference_year: i32) -> Self {
        Self {
            reference_year,
            drops: Vec::new(),
        }
    }

    fn dropped(&self, account: &str, period: Period) -> bool {
        self.drops
            .iter()
            .any(|rule| rule.account == account && period.first_day() > rule.after)
    }
}

/// Flatten one report: walk the section tree and emit one transaction per
/// non-zero cell.
pub fn flatten_report(
    report: &CashflowReport,
    classification: &Classification,
    rules: &FlattenRules,
) -> Vec<NormalizedTransaction> {
    walk_sections(&report.sections, &report.period, classification, rules)
}

fn walk_sections(
    sections: &BTreeMap<String, Section>,
    periods: &BTreeMap<String, PeriodMeta>,
    classification: &Classification,
    rules: &FlattenRules,
) -> Vec<NormalizedTransaction> {
    let mut out = Vec::new();
    for section in sections.values() {
        // Zero aggregate totals are assumed to mean zero-valued leaves, so
        // the whole subtree is skipped without looking at its rows. Not a
        // proven invariant: offsetting rows can net to zero. Kept for
        // compatibility with the historical output.
        if let Some(totals) = &section.totals
            && totals.values().all(|t| t.value == 0.0)
        {
            continue;
        }

        if let Some(rows) = &section.rows {
            out.extend(flatten_rows(rows, periods, classification, rules));
        }
        if let Some(children) = &section.sections {
            out.extend(walk_sections(children, periods, classification, rules));
        }
    }
    out
}

fn flatten_rows(
    rows: &BTreeMap<String, Row>,
    periods: &BTreeMap<String, PeriodMeta>,
    classification: &Classification,
    rules: &FlattenRules,
) -> Vec<NormalizedTransaction> {
    let mut out = Vec::new();
    for row in rows.values() {
        let Some(account) = row.account_code.clone().or_else(|| row.account_name.clone())
        else {
            continue;
        };
        let inverted = classification.inverts_sign(&AccountId::parse(&account));

        let Some(data) = &row.data else { continue };
        for cell in data.values() {
            let Ok(period) = Period::parse(&cell.date) else {
                continue;
            };
            // Exact equality on purpose: only a true zero is "no movement".
            if cell.value == 0.0 {
                continue;
            }
            if rules.dropped(&account, period) {
                continue;
            }
            let Some(kind) = periods
                .get(&cell.date)
                .and_then(|meta| TransactionKind::from_source(&meta.data_type))
            else {
                continue;
            };

            let amount = if inverted { -cell.value } else { cell.value };
            out.push(NormalizedTransaction {
                kind,
                account: account.clone(),
                amount,
                year: period.year_offset(rules.reference_year),
                month: period.month,
            });
        }
    }
    out
}
