//! paddock-core: canonical ledger types and period/date utilities

pub mod account;
pub mod livestock;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountClass, AccountId};
pub use livestock::{LivestockRecord, StockClassSummary, TrackerSummary, Transition};
pub use period::{Period, parse_accrual_date};
pub use transaction::{NormalizedTransaction, TransactionKind};
