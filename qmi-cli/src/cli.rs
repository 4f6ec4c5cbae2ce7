//! Command line surface
//!
//! All six path arguments are optional on the command line: values omitted
//! fall back to the stored values from the previous run, and the resolved
//! set is saved back for the next one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use crate::config::{ArgStore, StoredArgs};
use crate::excel::SourceSpec;
use crate::reports::{self, ReportInputs};

/// Create the weekly QMI report workbook
#[derive(Debug, Parser)]
#[command(name = "qmi-cli", version)]
pub struct Cli {
    /// RVR inter-org past due export
    rvr_iopd: Option<PathBuf>,
    /// JEF inter-org past due export
    jef_iopd: Option<PathBuf>,
    /// TOP 750 backorder summary export
    top_750: Option<PathBuf>,
    /// RVR firm order report export
    rvr_firm_orders: Option<PathBuf>,
    /// JEF firm order report export
    jef_firm_orders: Option<PathBuf>,
    /// Directory to write the report workbook into
    output_dir: Option<PathBuf>,
    /// Override the stored-arguments file location
    #[arg(long)]
    args_file: Option<PathBuf>,
}

fn resolve(cli: Option<PathBuf>, stored: Option<PathBuf>, name: &str) -> Result<PathBuf> {
    cli.or(stored).with_context(|| {
        format!(
            "Missing argument '{}' and no stored value from a previous run",
            name
        )
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let store = match cli.args_file {
        Some(path) => ArgStore::new(path),
        None => ArgStore::new(ArgStore::default_path()?),
    };
    let stored = store.load()?;

    let rvr_iopd = resolve(cli.rvr_iopd, stored.rvr_iopd, "rvr_iopd")?;
    let jef_iopd = resolve(cli.jef_iopd, stored.jef_iopd, "jef_iopd")?;
    let top_750 = resolve(cli.top_750, stored.top_750, "top_750")?;
    let rvr_firm_orders = resolve(cli.rvr_firm_orders, stored.rvr_firm_orders, "rvr_firm_orders")?;
    let jef_firm_orders = resolve(cli.jef_firm_orders, stored.jef_firm_orders, "jef_firm_orders")?;
    let output_dir = resolve(cli.output_dir, stored.output_dir, "output_dir")?;

    store.save(&StoredArgs {
        rvr_iopd: Some(rvr_iopd.clone()),
        jef_iopd: Some(jef_iopd.clone()),
        top_750: Some(top_750.clone()),
        rvr_firm_orders: Some(rvr_firm_orders.clone()),
        jef_firm_orders: Some(jef_firm_orders.clone()),
        output_dir: Some(output_dir.clone()),
    })?;

    // The inter-org and firm order exports carry a title row above the real
    // header; the backorder summary does not
    let inputs = ReportInputs {
        rvr_iopd: SourceSpec::new(rvr_iopd, 1),
        jef_iopd: SourceSpec::new(jef_iopd, 1),
        top_750: SourceSpec::new(top_750, 0),
        rvr_firm_orders: SourceSpec::new(rvr_firm_orders, 1),
        jef_firm_orders: SourceSpec::new(jef_firm_orders, 1),
    };

    let run_date = Local::now().date_naive();
    let path = reports::run(&inputs, &output_dir, run_date)?;
    println!("Report written to {}", path.display());
    Ok(())
}
