//! paddock-ingest: raw shapes of the platform's JSON exports and the file
//! loaders that deliver them to the conversion pipeline.

pub mod load;
pub mod types;

pub use types::{CashflowReport, RawAccount, ReportEnvelope, Row, Section};
