//! Cross-subsystem reconciliation: removes ledger transactions that restate
//! events already recorded by another subsystem.
//!
//! The subsystems share no identifier, so matching is approximate and
//! field-based. Every secondary record scans the full transaction list and
//! marks its matches; the marked set is removed once at the end. The scan
//! is O(N×M) — single-farm, single-year ledgers keep both sides small.

use std::collections::HashSet;

use crate::classifier::Classification;
use paddock_core::{
    LivestockRecord, NormalizedTransaction, TransactionKind, Transition, parse_accrual_date,
};
use paddock_ingest::types::RawInvoice;
use chrono::Datelike;

/// Purchase and sale ledger accounts configured on a livestock tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerAccounts {
    pub purchase: i64,
    pub sales: i64,
}

/// Remove ledger transactions that duplicate livestock purchases or sales.
///
/// A record matches a transaction when its transition routes to the
/// tracker's configured account, the absolute amounts agree, and the year
/// offset and month agree. Records without an amount never match.
pub fn remove_duplicate_livestock(
    transactions: Vec<NormalizedTransaction>,
    livestock: &[(TrackerAccounts, Vec<LivestockRecord>)],
) -> Vec<NormalizedTransaction> {
    let mut bad: HashSet<usize> = HashSet::new();

    for (accounts, records) in livestock {
        for record in records {
            let target = match record.transition {
                Transition::Purchase => accounts.purchase,
                Transition::Sale => accounts.sales,
                Transition::Other(_) => continue,
            };
            let Some(amount) = record.amount else { continue };
            let target = target.to_string();

            for (i, tx) in transactions.iter().enumerate() {
                if tx.amount.abs() == amount.abs()
                    && tx.year == record.year
                    && tx.month == record.month
                    && tx.account == target
                {
                    bad.insert(i);
                }
            }
        }
    }

    keep_unmarked(transactions, &bad)
}

/// Remove ledger transactions that duplicate invoices.
///
/// The invoice's first line names an account; resolution is name-only on
/// purpose, unlike the flattener's code-then-name fallback — the two call
/// sites disagree historically and unifying them would change which
/// transactions count as duplicates. A transaction matches on either the
/// resolved name or code, the accrual period, the signed amount, and the
/// invoice's transaction type.
pub fn remove_duplicate_invoices(
    transactions: Vec<NormalizedTransaction>,
    invoices: &[RawInvoice],
    classification: &Classification,
    reference_year: i32,
) -> Vec<NormalizedTransaction> {
    let mut bad: HashSet<usize> = HashSet::new();

    for invoice in invoices {
        let Some(line) = invoice.lines.first() else {
            continue;
        };
        let Some(account) = classification.account_by_name(&line.account) else {
            continue;
        };
        let Ok(date) = parse_accrual_date(&invoice.accrual_date) else {
            continue;
        };
        let Some(kind) = TransactionKind::from_source(&invoice.transaction_type) else {
            continue;
        };

        let code_form = account.code.map(|c| c.to_string());
        let year = date.year() - reference_year;
        let month = date.month();

        for (i, tx) in transactions.iter().enumerate() {
            let account_matches = tx.account == account.name
                || code_form.as_deref() == Some(tx.account.as_str());
            if account_matches
                && tx.year == year
                && tx.month == month
                && tx.amount == line.amount
                && tx.kind == kind
            {
                bad.insert(i);
            }
        }
    }

    keep_unmarked(transactions, &bad)
}

fn keep_unmarked(
    transactions: Vec<NormalizedTransaction>,
    bad: &HashSet<usize>,
) -> Vec<NormalizedTransaction> {
    transactions
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !bad.contains(i))
        .map(|(_, tx)| tx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use paddock_core::AccountClass;
    use paddock_ingest::types::{InvoiceLine, RawAccount, RawCode};

    fn tx(account: &str, amount: f64, year: i32, month: u32) -> NormalizedTransaction {
        NormalizedTransaction {
            kind: TransactionKind::Actuals,
            account: account.to_string(),
            amount,
            year,
            month,
        }
    }

    fn record(transition: Transition, amount: Option<f64>, year: i32, month: u32) -> LivestockRecord {
        LivestockRecord {
            stock_class: "Ewes".to_string(),
            transition,
            quantity: 10.0,
            year,
            month,
            amount,
            weight: None,
            kind: None,
        }
    }

    const ACCOUNTS: TrackerAccounts = TrackerAccounts {
        purchase: 210,
        sales: 200,
    };

    #[test]
    fn test_sale_matches_sales_account_only() {
        let transactions = vec![
            tx("200", -4800.0, 1, 5),
            tx("210", -4800.0, 1, 5),
            tx("200", -4800.0, 1, 6),
        ];
        let livestock = vec![(
            ACCOUNTS,
            vec![record(Transition::Sale, Some(4800.0), 1, 5)],
        )];
        let kept = remove_duplicate_livestock(transactions, &livestock);
        // Only the sales-account transaction in the matching period goes.
        assert_eq!(
            kept,
            vec![tx("210", -4800.0, 1, 5), tx("200", -4800.0, 1, 6)]
        );
    }

    #[test]
    fn test_purchase_routes_to_purchase_account() {
        let transactions = vec![tx("210", 1500.0, 0, 2), tx("200", 1500.0, 0, 2)];
        let livestock = vec![(
            ACCOUNTS,
            vec![record(Transition::Purchase, Some(1500.0), 0, 2)],
        )];
        let kept = remove_duplicate_livestock(transactions, &livestock);
        assert_eq!(kept, vec![tx("200", 1500.0, 0, 2)]);
    }

    #[test]
    fn test_other_transitions_and_missing_amounts_never_match() {
        let transactions = vec![tx("200", -4800.0, 1, 5)];
        let livestock = vec![(
            ACCOUNTS,
            vec![
                record(Transition::Other("death".to_string()), Some(4800.0), 1, 5),
                record(Transition::Sale, None, 1, 5),
            ],
        )];
        let kept = remove_duplicate_livestock(transactions.clone(), &livestock);
        assert_eq!(kept, transactions);
    }

    #[test]
    fn test_amounts_compare_absolute() {
        let transactions = vec![tx("200", -4800.0, 1, 5)];
        let livestock = vec![(
            ACCOUNTS,
            vec![record(Transition::Sale, Some(4800.0), 1, 5)],
        )];
        assert!(remove_duplicate_livestock(transactions, &livestock).is_empty());
    }

    #[test]
    fn test_double_match_removes_once() {
        let transactions = vec![tx("200", -4800.0, 1, 5), tx("500", 75.0, 1, 5)];
        let livestock = vec![(
            ACCOUNTS,
            vec![
                record(Transition::Sale, Some(4800.0), 1, 5),
                record(Transition::Sale, Some(-4800.0), 1, 5),
            ],
        )];
        let kept = remove_duplicate_livestock(transactions, &livestock);
        assert_eq!(kept, vec![tx("500", 75.0, 1, 5)]);
    }

    fn sales_classification() -> Classification {
        classify(&[RawAccount {
            code: Some(RawCode::Number(200)),
            name: "Sales".to_string(),
            class: AccountClass::Revenue,
            account_type: String::new(),
            tax_type: None,
            system_account: false,
            active: true,
        }])
        .unwrap()
    }

    fn invoice(account: &str, amount: f64, date: &str, kind: &str) -> RawInvoice {
        RawInvoice {
            accrual_date: date.to_string(),
            lines: vec![InvoiceLine {
                account: account.to_string(),
                amount,
            }],
            transaction_type: kind.to_string(),
        }
    }

    #[test]
    fn test_invoice_matches_code_form() {
        let transactions = vec![tx("200", 1000.0, 1, 5), tx("200", 1000.0, 1, 6)];
        let invoices = vec![invoice("Sales", 1000.0, "2024-05-20", "actuals")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert_eq!(kept, vec![tx("200", 1000.0, 1, 6)]);
    }

    #[test]
    fn test_invoice_matches_name_form() {
        let transactions = vec![tx("Sales", 1000.0, 1, 5)];
        let invoices = vec![invoice("Sales", 1000.0, "2024-05-20", "actuals")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_invoice_amount_sign_must_agree() {
        let transactions = vec![tx("200", -1000.0, 1, 5)];
        let invoices = vec![invoice("Sales", 1000.0, "2024-05-20", "actuals")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_invoice_type_must_agree() {
        let transactions = vec![tx("200", 1000.0, 1, 5)];
        let invoices = vec![invoice("Sales", 1000.0, "2024-05-20", "forecast")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_unresolvable_invoice_account_matches_nothing() {
        let transactions = vec![tx("200", 1000.0, 1, 5)];
        let invoices = vec![invoice("Freight", 1000.0, "2024-05-20", "actuals")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_survivors_keep_original_order() {
        let transactions = vec![
            tx("500", 1.0, 1, 1),
            tx("200", 1000.0, 1, 5),
            tx("510", 2.0, 1, 2),
            tx("520", 3.0, 1, 3),
        ];
        let invoices = vec![invoice("Sales", 1000.0, "2024-05-20", "actuals")];
        let kept =
            remove_duplicate_invoices(transactions, &invoices, &sales_classification(), 2023);
        assert_eq!(
            kept,
            vec![tx("500", 1.0, 1, 1), tx("510", 2.0, 1, 2), tx("520", 3.0, 1, 3)]
        );
    }
}
