//! Period and accrual-date utilities.
//!
//! The cashflow report buckets values by `YYYY-MM` period keys, and every
//! output `Year` is a signed offset from a configured reference year so the
//! ledger stays stable across calendar years.

use anyhow::{Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// A monthly report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// Parse a `YYYY-MM` period key.
    pub fn parse(key: &str) -> Result<Self> {
        let re = Regex::new(r"^(\d{4})-(\d{2})$")?;
        let caps = re
            .captures(key.trim())
            .ok_or_else(|| anyhow!("invalid period key: {key}"))?;
        let year: i32 = caps[1].parse()?;
        let month: u32 = caps[2].parse()?;
        if !(1..=12).contains(&month) {
            return Err(anyhow!("month out of range in period key: {key}"));
        }
        Ok(Period { year, month })
    }

    /// Signed offset of this period's year from the reference year.
    pub fn year_offset(&self, reference_year: i32) -> i32 {
        self.year - reference_year
    }

    /// First day of the period, the date cutover rules compare against.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month validated at parse")
    }
}

/// Parse a platform accrual date: `YYYY-MM-DD HH:MM:SS` as the livestock
/// API emits them, or a bare ISO date as invoices carry.
pub fn parse_accrual_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| anyhow!("invalid accrual date '{s}': {e}"))
}
