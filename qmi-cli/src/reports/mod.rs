//! The three report transformations and the driver that runs them
//!
//! Each transformation is a pure function over `Table`s; the driver wires
//! them to the source exports and writes the finished workbook. Any failure
//! aborts the whole run, nothing is written on partial success.

pub mod backorder;
pub mod external_past_due;
pub mod internal_past_due;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::excel::{self, SourceSpec};

/// Sheet names in workbook order
pub const SHEET_EXTERNAL: &str = "External Past Due";
pub const SHEET_BACKORDER: &str = "BO By Supplier";
pub const SHEET_INTERNAL: &str = "Internal Past Due";

/// The five source exports feeding the report
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub rvr_iopd: SourceSpec,
    pub jef_iopd: SourceSpec,
    pub top_750: SourceSpec,
    pub rvr_firm_orders: SourceSpec,
    pub jef_firm_orders: SourceSpec,
}

/// Workbook filename for a given run date
pub fn output_filename(run_date: NaiveDate) -> String {
    format!("{} QMI Report.xlsx", run_date.format("%m.%d.%Y"))
}

/// Run all three transformations and write the report workbook.
///
/// Returns the path of the written workbook.
pub fn run(inputs: &ReportInputs, output_dir: &Path, run_date: NaiveDate) -> Result<PathBuf> {
    let rvr_iopd = excel::read_table(&inputs.rvr_iopd)
        .context("Reading RVR inter-org past due export")?;
    let jef_iopd = excel::read_table(&inputs.jef_iopd)
        .context("Reading JEF inter-org past due export")?;
    let top_750 = excel::read_table(&inputs.top_750)
        .context("Reading TOP 750 backorder summary export")?;
    let rvr_firm = excel::read_table(&inputs.rvr_firm_orders)
        .context("Reading RVR firm order export")?;
    let jef_firm = excel::read_table(&inputs.jef_firm_orders)
        .context("Reading JEF firm order export")?;

    let internal = internal_past_due::combine(&rvr_iopd, &jef_iopd)?;
    let total = internal_past_due::total_quantity(&internal)?;
    println!("Quantity Ordered Total: {}", total);

    let bo_by_supplier = backorder::summarize(&top_750)?;
    let external = external_past_due::extract(&rvr_firm, &jef_firm, run_date)?;

    let path = output_dir.join(output_filename(run_date));
    excel::write_report(
        &path,
        &[
            (SHEET_EXTERNAL, &external),
            (SHEET_BACKORDER, &bo_by_supplier),
            (SHEET_INTERNAL, &internal),
        ],
    )?;
    log::info!("Wrote report workbook: {}", path.display());
    Ok(path)
}
