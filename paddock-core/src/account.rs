//! Chart-of-accounts types: classified accounts and the identifier form
//! used by the sign-convention sets.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The platform's account classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountClass {
    Revenue,
    Expense,
    Equity,
    Liability,
    Asset,
}

/// An account identifier: the numeric code when the platform has one, else
/// the account name. Serializes as a bare number or string, which is what
/// the `revenue.json` / `equity.json` sign-convention files contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountId {
    Code(i64),
    Name(String),
}

impl AccountId {
    /// Resolve a raw identifier the way report rows carry them: numeric
    /// text is a code, anything else is a name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(code) => AccountId::Code(code),
            Err(_) => AccountId::Name(raw.to_string()),
        }
    }
}

// Codes sort ascending and come before names, matching the account list
// ordering where codeless accounts go last.
impl Ord for AccountId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AccountId::Code(a), AccountId::Code(b)) => a.cmp(b),
            (AccountId::Code(_), AccountId::Name(_)) => Ordering::Less,
            (AccountId::Name(_), AccountId::Code(_)) => Ordering::Greater,
            (AccountId::Name(a), AccountId::Name(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for AccountId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A classified account, ready for `accounts.json`.
///
/// Field names and casing are a compatibility contract with the downstream
/// reporting template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "Code")]
    pub code: Option<i64>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Class")]
    pub class: AccountClass,
    #[serde(rename = "Type")]
    pub account_type: String,
    #[serde(rename = "TaxType")]
    pub tax_type: Option<String>,
    /// Canonical system-account tag, empty for ordinary accounts.
    #[serde(rename = "SystemAccount")]
    pub system_account: String,
    #[serde(rename = "Active")]
    pub active: bool,
}

impl Account {
    /// The identifier this account contributes to the sign-convention sets.
    pub fn id(&self) -> AccountId {
        match self.code {
            Some(code) => AccountId::Code(code),
            None => AccountId::Name(self.name.clone()),
        }
    }
}
