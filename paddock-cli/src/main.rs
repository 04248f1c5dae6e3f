use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use paddock_core::NormalizedTransaction;
use paddock_ingest::load;
use paddock_ledger::{
    TrackerAccounts, build_tracker_summaries, classify, flatten_report, normalize_events,
    remove_duplicate_invoices, remove_duplicate_livestock,
};

mod config;
mod output;

use config::FarmConfig;

#[derive(Parser, Debug)]
#[command(name = "paddock", version, about = "Farm accounting export normalizer")]
struct Cli {
    /// Directory holding the platform's JSON exports and the outputs.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Farm config file.
    #[arg(long, default_value = "paddock.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the chart of accounts and write accounts/revenue/equity files
    Accounts,

    /// Normalize livestock trackers and events into per-tracker outputs
    Livestock,

    /// Flatten cashflow reports into the ledger, with optional reconciliation
    Transactions {
        /// Reconcile against the livestock exports before writing
        #[arg(long)]
        dedup_livestock: bool,

        /// Invoice export to reconcile against
        #[arg(long)]
        invoices: Option<PathBuf>,
    },

    /// Run the whole batch: accounts, livestock, then transactions
    Run {
        /// Reconcile against the livestock exports before writing
        #[arg(long)]
        dedup_livestock: bool,

        /// Invoice export to reconcile against
        #[arg(long)]
        invoices: Option<PathBuf>,
    },

    /// Write the normalized ledger as CSV for the reporting template
    Export {
        /// Output file (defaults to ledger.csv in the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a default paddock.toml for editing
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Command::Accounts => run_accounts(&cli.data_dir)?,
        Command::Livestock => run_livestock(&cli.data_dir, &cfg)?,
        Command::Transactions {
            dedup_livestock,
            invoices,
        } => run_transactions(&cli.data_dir, &cfg, dedup_livestock, invoices.as_deref())?,
        Command::Run {
            dedup_livestock,
            invoices,
        } => {
            run_accounts(&cli.data_dir)?;
            run_livestock(&cli.data_dir, &cfg)?;
            run_transactions(&cli.data_dir, &cfg, dedup_livestock, invoices.as_deref())?;
            println!("Done!");
        }
        Command::Export { out } => run_export(&cli.data_dir, out)?,
        Command::InitConfig => config::init_config(&cli.config)?,
    }

    Ok(())
}

/// Classify the raw account export and write the three account files.
/// A classification error writes nothing.
fn run_accounts(data_dir: &Path) -> Result<()> {
    let raw = load::load_accounts(&data_dir.join("original_accounts.json"))?;
    let classification = classify(raw.values())?;

    let mut revenue: Vec<_> = classification.revenue.iter().cloned().collect();
    revenue.sort();
    let mut equity: Vec<_> = classification.equity_like.iter().cloned().collect();
    equity.sort();

    output::write_json(&data_dir.join("accounts.json"), &classification.accounts)?;
    output::write_json(&data_dir.join("revenue.json"), &revenue)?;
    output::write_json(&data_dir.join("equity.json"), &equity)?;

    println!(
        "Accounts converted successfully ({} accounts, {} revenue, {} equity-like).",
        classification.accounts.len(),
        revenue.len(),
        equity.len()
    );
    Ok(())
}

fn run_livestock(data_dir: &Path, cfg: &FarmConfig) -> Result<()> {
    let trackers = load::load_trackers(&data_dir.join("trackers.json"))?;
    let events = load::load_livestock_events(&data_dir.join("original_livestock.json"))?;
    let mappings = load::load_account_mappings(&data_dir.join("account_mappings.json"))?;

    let batches = normalize_events(&trackers, &events, cfg.reference_year);
    let summaries = build_tracker_summaries(&trackers, &mappings)?;

    for batch in &batches {
        let path = data_dir.join(&batch.tracker).join("transactions.json");
        output::write_json(&path, &batch.records)?;
    }
    for (name, summary) in &summaries {
        output::write_json(&data_dir.join(name).join("tracker.json"), summary)?;
    }

    println!(
        "Livestock converted successfully ({} trackers, {} events).",
        trackers.len(),
        events.len()
    );
    Ok(())
}

fn run_transactions(
    data_dir: &Path,
    cfg: &FarmConfig,
    dedup_livestock: bool,
    invoices: Option<&Path>,
) -> Result<()> {
    let raw_accounts = load::load_accounts(&data_dir.join("original_accounts.json"))?;
    let classification = classify(raw_accounts.values())?;
    let rules = cfg.flatten_rules();

    let reports = load::find_cashflow_reports(data_dir)?;
    let mut ledger = Vec::new();
    for path in &reports {
        let envelope = load::load_report(path)?;
        ledger.extend(flatten_report(&envelope.data, &classification, &rules));
    }
    println!(
        "Flattened {} reports into {} transactions.",
        reports.len(),
        ledger.len()
    );

    if dedup_livestock {
        let trackers = load::load_trackers(&data_dir.join("trackers.json"))?;
        let events = load::load_livestock_events(&data_dir.join("original_livestock.json"))?;
        let mappings = load::load_account_mappings(&data_dir.join("account_mappings.json"))?;
        let summaries = build_tracker_summaries(&trackers, &mappings)?;

        let livestock: Vec<_> = normalize_events(&trackers, &events, cfg.reference_year)
            .into_iter()
            .filter_map(|batch| {
                summaries
                    .iter()
                    .find(|(name, _)| *name == batch.tracker)
                    .map(|(_, summary)| {
                        (
                            TrackerAccounts {
                                purchase: summary.purchase_account,
                                sales: summary.sales_account,
                            },
                            batch.records,
                        )
                    })
            })
            .collect();

        let before = ledger.len();
        ledger = remove_duplicate_livestock(ledger, &livestock);
        println!("Removed {} livestock duplicates.", before - ledger.len());
    }

    if let Some(path) = invoices {
        let invoices = load::load_invoices(path)?;
        let before = ledger.len();
        ledger = remove_duplicate_invoices(ledger, &invoices, &classification, cfg.reference_year);
        println!("Removed {} invoice duplicates.", before - ledger.len());
    }

    let out = data_dir.join("transactions.json");
    output::write_json(&out, &ledger)?;
    println!("Wrote {} transactions to {}.", ledger.len(), out.display());
    Ok(())
}

fn run_export(data_dir: &Path, out: Option<PathBuf>) -> Result<()> {
    let path = data_dir.join("transactions.json");
    let s = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let ledger: Vec<NormalizedTransaction> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;

    let out = out.unwrap_or_else(|| data_dir.join("ledger.csv"));
    output::write_ledger_csv(&out, &ledger)?;
    println!("Exported {} transactions to {}.", ledger.len(), out.display());
    Ok(())
}
