//! External firm-order past-due extractor
//!
//! Combines the JEF and RVR firm-order exports, strips footer blocks and
//! shipment/prepack lines, keeps rows due between 2020-01-01 and the run
//! date, and derives the open quantity per PO line.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::table::{Table, Value};

/// Output schema, in order
pub const OUTPUT_COLUMNS: [&str; 17] = [
    "PO Number",
    "Release",
    "PO Line Number",
    "Shipment Number",
    "Vendor Name",
    "Ship From",
    "Buyer",
    "Planner Code",
    "Item Number",
    "Description",
    "Supplier Item",
    "Due Date",
    "NEED_BY_DATE",
    "Quantity Ordered",
    "Intransit Quantity",
    "Received Quantity",
    "QTY_OPEN",
];

const KEY_COLUMN: &str = "PO Number";
const SHIPMENT_LINE_TYPE: &str = "Shipment";
const PREPACK_PATTERN: &str = "(?i)^pp";

/// Earliest due date included in the report
pub fn window_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Parse a due-date cell, tolerating a trailing time component
fn parse_due_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

fn int_cell(row: &[Value], idx: usize, column: &str) -> Result<i64> {
    row[idx].as_int().with_context(|| {
        format!(
            "Non-numeric value '{}' in column '{}'",
            row[idx].to_display_string(),
            column
        )
    })
}

/// Extract the past-due external firm orders from both sources
pub fn extract(rvr: &Table, jef: &Table, run_date: NaiveDate) -> Result<Table> {
    let mut rvr = rvr.clone();
    let mut jef = jef.clone();

    // Each export ends in a summary block with no PO number
    let dropped = rvr.trim_trailing_by_key(KEY_COLUMN)? + jef.trim_trailing_by_key(KEY_COLUMN)?;
    log::debug!("External past due: trimmed {} footer rows", dropped);

    let mut table = jef.concat(rvr)?;
    table.trim_trailing_by_key(KEY_COLUMN)?;
    table.fill_blanks();

    let line_type = table.column_index("Line Type")?;
    table.retain(|row| row[line_type].as_str() != Some(SHIPMENT_LINE_TYPE));

    let prepack = Regex::new(PREPACK_PATTERN).context("Invalid prepack pattern")?;
    let item_number = table.column_index("Item Number")?;
    table.retain(|row| match row[item_number].as_str() {
        Some(item) => !prepack.is_match(item),
        None => true,
    });

    // Drop unparseable due dates, keep the reporting window, normalize the
    // retained dates to plain calendar-date text
    let start = window_start();
    let due_date = table.column_index("Due Date")?;
    table.retain(|row| {
        matches!(parse_due_date(&row[due_date]), Some(d) if d >= start && d <= run_date)
    });
    table.map_column("Due Date", |v| match parse_due_date(v) {
        Some(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        None => v.clone(),
    })?;

    table.add_empty_column("NEED_BY_DATE");

    let ordered = table.column_index("Quantity Ordered")?;
    let intransit = table.column_index("Intransit Quantity")?;
    let received = table.column_index("Received Quantity")?;
    let open: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let qty = int_cell(row, ordered, "Quantity Ordered")?
                - int_cell(row, intransit, "Intransit Quantity")?
                - int_cell(row, received, "Received Quantity")?;
            Ok(Value::Int(qty))
        })
        .collect::<Result<_>>()?;
    table.add_column("QTY_OPEN", open)?;

    let out = table.select(&OUTPUT_COLUMNS)?;
    log::info!("External past due: {} rows retained", out.len());
    Ok(out)
}
