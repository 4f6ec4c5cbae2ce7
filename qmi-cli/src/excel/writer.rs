//! Write the finished report tables to a single workbook

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::table::{Table, Value};

/// Write the named sheets, in order, to one workbook at `path`
pub fn write_report<P: AsRef<Path>>(path: P, sheets: &[(&str, &Table)]) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, table) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;
        write_sheet(worksheet, table, &header_format)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;

    Ok(())
}

fn write_sheet(ws: &mut Worksheet, table: &Table, header_format: &Format) -> Result<()> {
    for (col, name) in table.columns().iter().enumerate() {
        ws.write_string_with_format(0, col as u16, name, header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            write_value(ws, row_num, col_idx as u16, value)?;
        }
    }

    ws.autofit();
    Ok(())
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Empty => { /* Leave cell empty */ }
        Value::String(s) => {
            ws.write_string(row, col, s)?;
        }
        Value::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Value::Bool(b) => {
            ws.write_string(row, col, &b.to_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx, open_workbook};

    #[test]
    fn test_write_report_sheet_names_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let mut first = Table::new(vec!["A"]);
        first.push_row(vec![Value::Int(1)]).unwrap();
        let second = Table::new(vec!["B"]);

        write_report(&path, &[("First Sheet", &first), ("Second Sheet", &second)]).unwrap();

        let workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(
            workbook.sheet_names().to_vec(),
            vec!["First Sheet".to_string(), "Second Sheet".to_string()]
        );
    }

    #[test]
    fn test_write_report_cell_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.xlsx");

        let mut table = Table::new(vec!["name", "qty", "note"]);
        table
            .push_row(vec!["widget".into(), Value::Int(12), Value::Empty])
            .unwrap();

        write_report(&path, &[("Data", &table)]).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Data").unwrap();
        let rows: Vec<_> = range.rows().collect();
        assert_eq!(rows[0][1], Data::String("qty".into()));
        assert_eq!(rows[1][0], Data::String("widget".into()));
        assert_eq!(rows[1][1], Data::Float(12.0));
    }
}
