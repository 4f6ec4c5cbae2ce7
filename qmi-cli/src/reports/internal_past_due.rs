//! Internal past-due combiner
//!
//! Merges the RVR and JEF inter-org past-due exports into one table, keeping
//! only genuinely past-due rows shipped from outside the internal network.

use anyhow::Result;

use crate::table::Table;

/// Output schema, in order
pub const COLUMNS: [&str; 6] = [
    "Order Number",
    "Item",
    "Item Description",
    "Quantity Ordered",
    "Ship ORG",
    "Past Due Status",
];

/// Ship orgs that count as internal and are excluded from the report
pub const EXCLUDED_SHIP_ORGS: [&str; 7] = ["JEF", "RVR", "DB6", "KLC", "SLC", "WAL", "NAP"];

const FUTURE_ORDER_STATUS: &str = "Future order";

/// Restrict to the report columns and drop future orders and internal ship orgs
fn filter_past_due(table: &Table) -> Result<Table> {
    let mut out = table.select(&COLUMNS)?;
    let ship_org = out.column_index("Ship ORG")?;
    let status = out.column_index("Past Due Status")?;

    out.retain(|row| {
        if row[status].as_str() == Some(FUTURE_ORDER_STATUS) {
            return false;
        }
        match row[ship_org].as_str() {
            Some(org) => !EXCLUDED_SHIP_ORGS.contains(&org),
            None => true,
        }
    });
    Ok(out)
}

/// Combine both filtered sources, RVR rows first
pub fn combine(rvr: &Table, jef: &Table) -> Result<Table> {
    let rvr = filter_past_due(rvr)?;
    let jef = filter_past_due(jef)?;
    log::info!(
        "Internal past due: {} RVR rows, {} JEF rows retained",
        rvr.len(),
        jef.len()
    );
    rvr.concat(jef)
}

/// Total of the Quantity Ordered column over the combined result
pub fn total_quantity(combined: &Table) -> Result<i64> {
    combined.sum_int("Quantity Ordered")
}
