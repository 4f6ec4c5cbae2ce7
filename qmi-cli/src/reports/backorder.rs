//! Backorder-by-supplier summarizer
//!
//! Nets prepack counts out of the raw backorder totals and reshapes the
//! supplier summary export into the report schema.

use anyhow::{Context, Result};

use crate::table::{Table, Value};

/// Output schema, in order
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "VENDOR_NAME",
    "VENDOR_SITE",
    "ITEM_ID",
    "DESCRIPTION",
    "COMP_NAME",
    "TOTAL_BO_PIECES",
    "TOTAL_BO_LINES",
    "TECH_BO_PIECES",
    "TECH_BO_LINES",
];

const KEY_COLUMN: &str = "VENDOR_NAME";

/// Derived column: minuend minus subtrahend, integer arithmetic
fn difference_column(table: &Table, minuend: &str, subtrahend: &str) -> Result<Vec<Value>> {
    let a = table.column_index(minuend)?;
    let b = table.column_index(subtrahend)?;
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            let lhs = row[a].as_int().with_context(|| {
                format!(
                    "Non-numeric value '{}' in column '{}' at row {}",
                    row[a].to_display_string(),
                    minuend,
                    row_idx
                )
            })?;
            let rhs = row[b].as_int().with_context(|| {
                format!(
                    "Non-numeric value '{}' in column '{}' at row {}",
                    row[b].to_display_string(),
                    subtrahend,
                    row_idx
                )
            })?;
            Ok(Value::Int(lhs - rhs))
        })
        .collect()
}

/// Reshape the supplier backorder summary into the report schema
pub fn summarize(source: &Table) -> Result<Table> {
    let mut table = source.clone();

    // The export ends in a summary row with no vendor name; trim it before
    // the integer derivations so a non-numeric footer cannot fail the casts
    table.trim_trailing_by_key(KEY_COLUMN)?;

    let total = difference_column(&table, "TRUE_BO", "BO_PP")?;
    table.add_column("TOTAL_BO_PIECES", total)?;
    table.add_empty_column("TOTAL_BO_LINES");

    let tech = difference_column(&table, "TRUE_TECH_BO", "TECH_BO_PP")?;
    table.add_column("TECH_BO_PIECES", tech)?;
    table.add_empty_column("TECH_BO_LINES");

    let mut out = table.select(&OUTPUT_COLUMNS)?;
    out.fill_blanks();
    log::info!("BO by supplier: {} rows retained", out.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT_COLUMNS: [&str; 9] = [
        "VENDOR_NAME",
        "VENDOR_SITE",
        "ITEM_ID",
        "DESCRIPTION",
        "COMP_NAME",
        "TRUE_BO",
        "BO_PP",
        "TRUE_TECH_BO",
        "TECH_BO_PP",
    ];

    fn source_row(vendor: &str, true_bo: i64, bo_pp: i64, true_tech: i64, tech_pp: i64) -> Vec<Value> {
        vec![
            vendor.into(),
            "SITE-1".into(),
            Value::Int(1234),
            "widget".into(),
            "Comp".into(),
            Value::Int(true_bo),
            Value::Int(bo_pp),
            Value::Int(true_tech),
            Value::Int(tech_pp),
        ]
    }

    #[test]
    fn test_summarize_piece_counts() {
        let mut t = Table::new(INPUT_COLUMNS.to_vec());
        t.push_row(source_row("Acme", 20, 5, 12, 2)).unwrap();
        t.push_row(source_row("Globex", 7, 7, 3, 0)).unwrap();

        let out = summarize(&t).unwrap();
        assert_eq!(out.columns(), &OUTPUT_COLUMNS.map(String::from));
        assert_eq!(out.len(), 2);

        let total = out.column_index("TOTAL_BO_PIECES").unwrap();
        let tech = out.column_index("TECH_BO_PIECES").unwrap();
        assert_eq!(out.rows()[0][total], Value::Int(15));
        assert_eq!(out.rows()[0][tech], Value::Int(10));
        assert_eq!(out.rows()[1][total], Value::Int(0));
        assert_eq!(out.rows()[1][tech], Value::Int(3));
    }

    #[test]
    fn test_summarize_drops_footer_row() {
        let mut t = Table::new(INPUT_COLUMNS.to_vec());
        t.push_row(source_row("Acme", 20, 5, 12, 2)).unwrap();
        let mut footer = source_row("", 27, 12, 15, 2);
        footer[0] = Value::Empty;
        t.push_row(footer).unwrap();

        let out = summarize(&t).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_summarize_lines_columns_are_blank_strings() {
        let mut t = Table::new(INPUT_COLUMNS.to_vec());
        t.push_row(source_row("Acme", 1, 0, 1, 0)).unwrap();

        let out = summarize(&t).unwrap();
        let total_lines = out.column_index("TOTAL_BO_LINES").unwrap();
        let tech_lines = out.column_index("TECH_BO_LINES").unwrap();
        assert_eq!(out.rows()[0][total_lines], Value::String(String::new()));
        assert_eq!(out.rows()[0][tech_lines], Value::String(String::new()));
    }

    #[test]
    fn test_summarize_missing_source_column_fails() {
        let t = Table::new(vec!["VENDOR_NAME", "TRUE_BO"]);
        assert!(summarize(&t).is_err());
    }
}
