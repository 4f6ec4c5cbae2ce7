//! Weekly QMI report builder
//!
//! Reads five spreadsheet exports, runs the three report transformations and
//! writes a dated three-sheet workbook into the chosen output directory.

mod cli;
mod config;
mod excel;
mod reports;
mod table;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run()
}
