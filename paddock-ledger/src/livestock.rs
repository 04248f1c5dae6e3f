//! Normalizes livestock tracker events into per-tracker ledger records and
//! builds the on-disk tracker summaries.

use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use std::collections::{BTreeMap, HashMap};

use paddock_core::{
    LivestockRecord, StockClassSummary, TrackerSummary, Transition, parse_accrual_date,
};
use paddock_ingest::types::{RawAccountMapping, RawLivestockEvent, RawTracker};

/// Events grouped under their owning tracker's name, the partitioning key
/// for the per-tracker output files.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerBatch {
    pub tracker: String,
    pub records: Vec<LivestockRecord>,
}

/// Normalize livestock events into one record per event, partitioned by
/// tracker name. Every tracker appears in the output, eventless ones with
/// an empty batch. Events referencing unknown trackers or stock classes
/// are skipped.
pub fn normalize_events(
    trackers: &[RawTracker],
    events: &[RawLivestockEvent],
    reference_year: i32,
) -> Vec<TrackerBatch> {
    // tracker id -> (batch index, stock class uuid -> name)
    let mut index: HashMap<&str, (usize, HashMap<&str, &str>)> = HashMap::new();
    let mut batches: Vec<TrackerBatch> = Vec::with_capacity(trackers.len());

    for tracker in trackers {
        let classes = tracker
            .stock_classes
            .iter()
            .map(|sc| (sc.uuid.as_str(), sc.name.as_str()))
            .collect();
        index.insert(tracker.id.as_str(), (batches.len(), classes));
        batches.push(TrackerBatch {
            tracker: tracker.name.clone(),
            records: Vec::new(),
        });
    }

    for event in events {
        let Some((batch_idx, classes)) = index.get(event.tracker_id.as_str()) else {
            continue;
        };
        let Some(stock_class) = classes.get(event.stock_class_id.as_str()) else {
            continue;
        };
        let Ok(date) = parse_accrual_date(&event.accrual_date.date) else {
            continue;
        };

        batches[*batch_idx].records.push(LivestockRecord {
            stock_class: stock_class.to_string(),
            transition: event.transition.clone(),
            quantity: event.quantity,
            year: date.year() - reference_year,
            month: date.month(),
            // A zero amount means "none recorded"; weight keeps its zero.
            amount: event.amount.filter(|a| *a != 0.0).map(f64::abs),
            weight: event.weight_per_head,
            kind: event.kind.clone().filter(|k| !k.is_empty()),
        });
    }

    batches
}

/// Build the per-tracker summaries from the trackers and their account
/// mappings. A tracker without both a purchase and a sale mapping is an
/// error: the summary cannot name its ledger accounts without them.
pub fn build_tracker_summaries(
    trackers: &[RawTracker],
    mappings: &BTreeMap<String, Vec<RawAccountMapping>>,
) -> Result<Vec<(String, TrackerSummary)>> {
    let mut out = Vec::with_capacity(trackers.len());
    for tracker in trackers {
        let maps = mappings
            .get(&tracker.id)
            .ok_or_else(|| anyhow!("no account mappings for tracker '{}'", tracker.name))?;
        let purchase = mapped_account(maps, &Transition::Purchase)
            .with_context(|| format!("tracker '{}'", tracker.name))?;
        let sales = mapped_account(maps, &Transition::Sale)
            .with_context(|| format!("tracker '{}'", tracker.name))?;

        out.push((
            tracker.name.clone(),
            TrackerSummary {
                tracker_type: "stock".to_string(),
                stock_type_uuid: tracker.stock_type_id.clone(),
                purchase_account: purchase,
                sales_account: sales,
                stock_classes: tracker
                    .stock_classes
                    .iter()
                    .map(|sc| StockClassSummary {
                        name: sc.name.clone(),
                        enabled: sc.enabled,
                        opening_quantity: None,
                    })
                    .collect(),
            },
        ));
    }
    Ok(out)
}

fn mapped_account(maps: &[RawAccountMapping], transition: &Transition) -> Result<i64> {
    maps.iter()
        .find(|m| &m.transition == transition)
        .map(|m| m.account_code)
        .ok_or_else(|| anyhow!("missing {transition:?} account mapping"))
}
