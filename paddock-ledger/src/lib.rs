//! paddock-ledger: account classification, cashflow flattening, livestock
//! normalization, and cross-subsystem deduplication

pub mod classifier;
pub mod dedup;
pub mod flattener;
pub mod livestock;

pub use classifier::{Classification, classify, system_account_tag};
pub use dedup::{TrackerAccounts, remove_duplicate_invoices, remove_duplicate_livestock};
pub use flattener::{DropRule, FlattenRules, flatten_report};
pub use livestock::{TrackerBatch, build_tracker_summaries, normalize_events};
