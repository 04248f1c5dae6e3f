//! Chart-of-accounts classification: canonical system-account tags plus the
//! identifier sets that drive sign conventions downstream.

use anyhow::{Result, bail};
use std::collections::HashSet;

use paddock_core::{Account, AccountClass, AccountId};
use paddock_ingest::types::RawAccount;

/// Canonical tags for the platform's fixed system accounts, keyed by every
/// name the platform is known to emit for them (including vendor-suffixed
/// and deleted-account aliases).
///
/// A system-flagged account missing from this table stops the whole batch:
/// the table has to be extended by hand, not worked around.
pub const SYSTEM_ACCOUNTS: &[(&str, &str)] = &[
    ("Accounts Payable", "CREDITORS"),
    ("Accounts Payable (Xero)", "CREDITORS"),
    ("Accounts Payable (A/P) (deleted)", "CREDITORS"),
    ("Accounts Receivable", "DEBTORS"),
    ("Accounts Receivable (Xero)", "DEBTORS"),
    ("Accounts Receivable (A/R)", "DEBTORS"),
    ("Accounts Receivable (deleted)", "DEBTORS"),
    ("Bank Revaluations", "BANKREVALUATIONS"),
    ("GST", "GST"),
    ("Refunds/Payments", "GSTPAYMENTS"),
    ("Historical Adjustment", "HISTORICAL"),
    ("Historical Adjustment8", "HISTORICAL"),
    ("Realised Currency Gains", "REALISEDCURRENCYGAIN"),
    ("Retained Earnings", "RETAINEDEARNINGS"),
    ("Retained earnings", "RETAINEDEARNINGS"),
    ("Rounding", "ROUNDING"),
    ("Rounding8", "ROUNDING"),
    ("Tracking Transfers", "TRACKINGTRANSFERS"),
    ("Tracking Transfers8", "TRACKINGTRANSFERS"),
    ("Unpaid Expense Claims", "UNPAIDEXPCLM"),
    ("Unrealised Currency Gains", "UNREALISEDCURRENCYGAIN"),
    ("Wages Payable", "WAGESPAYABLE"),
    ("Wages control account", "WAGESPAYABLE"),
    ("Sales Tax", "GST"),
    ("Vat control account", "GST"),
    ("Realized Currency Gains", "REALISEDCURRENCYGAIN"),
    ("Unpaid expense claims (3564)", "UNPAIDEXPCLM"),
    ("Unrealized Currency Gains", "UNREALISEDCURRENCYGAIN"),
    ("Unapplied Cash Payment Income", "UnappliedCashPaymentIncome"),
    ("Current Year Earnings", "CURRENTYEAREARNINGS"),
];

/// Canonical tag for a system account name, if the table knows it.
pub fn system_account_tag(name: &str) -> Option<&'static str> {
    SYSTEM_ACCOUNTS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, tag)| *tag)
}

/// The classification of one account batch: the converted accounts plus the
/// revenue and equity-like identifier sets.
///
/// Built once per run and passed by reference to the flattener and the
/// dedup matcher; there is no shared state between runs.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// Sorted by code ascending, codeless accounts last.
    pub accounts: Vec<Account>,
    pub revenue: HashSet<AccountId>,
    pub equity_like: HashSet<AccountId>,
}

impl Classification {
    /// True when amounts on this identifier flip sign in the ledger.
    pub fn inverts_sign(&self, id: &AccountId) -> bool {
        self.revenue.contains(id) || self.equity_like.contains(id)
    }

    /// Name-only account lookup, the form invoice lines resolve through.
    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }
}

/// Classify a raw account export.
///
/// Fails — producing nothing — when a system-flagged account has no
/// canonical tag. Every other irregularity is absorbed per account: a
/// non-numeric code degrades to the name as identifier, and repeated
/// `(code, name)` pairs keep their first occurrence.
pub fn classify<'a, I>(raw: I) -> Result<Classification>
where
    I: IntoIterator<Item = &'a RawAccount>,
{
    let mut seen: HashSet<(Option<i64>, String)> = HashSet::new();
    let mut out = Classification::default();

    for item in raw {
        let tag = if item.system_account {
            match system_account_tag(&item.name) {
                Some(tag) => tag,
                None => bail!(
                    "system account '{}' has no canonical tag; the system-accounts table needs a new entry",
                    item.name
                ),
            }
        } else {
            ""
        };

        let account = Account {
            code: item.code.as_ref().and_then(|c| c.as_i64()),
            name: item.name.clone(),
            class: item.class,
            account_type: item.account_type.clone(),
            tax_type: item.tax_type.clone(),
            system_account: tag.to_string(),
            active: item.active,
        };

        if !seen.insert((account.code, account.name.clone())) {
            continue;
        }

        let id = account.id();
        match account.class {
            AccountClass::Revenue => {
                out.revenue.insert(id);
            }
            AccountClass::Equity | AccountClass::Liability | AccountClass::Asset => {
                out.equity_like.insert(id);
            }
            _ if account.system_account == "GST" => {
                out.equity_like.insert(id);
            }
            _ => {}
        }

        out.accounts.push(account);
    }

    out.accounts.sort_by_key(|a| a.code.unwrap_or(i64::MAX));
    Ok(out)
}
