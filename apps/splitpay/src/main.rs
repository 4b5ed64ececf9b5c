//! SplitPay CLI - split a bill described in a JSON file
//!
//! Usage:
//! ```bash
//! splitpay dinner.json --rates rates.json
//! SPLITPAY_SNAPSHOT_PATH=rates.json splitpay dinner.json --base EUR
//! splitpay dinner.json --rates rates.json --json
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load config (file, then `SPLITPAY_*` env, then flags)
//! 3. Read the bill file
//! 4. Start a session over the snapshot provider (currency names, rates)
//! 5. Calculate and print the summary, or the form error

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use splitpay_app::bill_file::BillFile;
use splitpay_app::export::StdoutSink;
use splitpay_app::provider::SnapshotFileProvider;
use splitpay_app::{AppConfig, SplitSession};

/// SplitPay - split a bill evenly across people paying in different currencies
#[derive(Parser)]
#[command(name = "splitpay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Bill file (JSON)
    bill: PathBuf,

    /// Rate snapshot file (JSON); overrides config and SPLITPAY_SNAPSHOT_PATH
    #[arg(long)]
    rates: Option<PathBuf>,

    /// Base currency; overrides the bill file and config
    #[arg(long)]
    base: Option<String>,

    /// Config file (TOML); overrides SPLITPAY_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of the plain-text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    splitpay_app::init_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config).context("Failed to load configuration")?;
    let bill = BillFile::read(&cli.bill).await?;

    if let Some(base) = cli.base.or_else(|| bill.base.clone()) {
        config.base_currency = base;
        config.validate()?;
    }

    let snapshot = cli
        .rates
        .or_else(|| config.snapshot_path.clone())
        .context("No rate snapshot: pass --rates or set SPLITPAY_SNAPSHOT_PATH")?;

    let session = SplitSession::new(config, Arc::new(SnapshotFileProvider::new(snapshot)));
    if let Err(e) = session.startup().await {
        warn!(error = %e, "Continuing without fresh rates");
        eprintln!("{}", e.message);
    }

    session.load_roster(bill.roster()?);
    session.set_total_amount(bill.total);

    match session.calculate() {
        Ok(response) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Ok(_) => {
            session.copy_results(&StdoutSink)?;
        }
        Err(e) => {
            eprintln!("{}", e.message);
            std::process::exit(1);
        }
    }

    Ok(())
}
