//! Read source exports into `Table`
//!
//! Each export is described by a `SourceSpec`: the file path plus the row
//! index carrying the real column headers. Several of the exports prepend a
//! title row above the header, so the header row is explicit configuration
//! rather than an assumption baked into the reader.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::table::{Table, Value};

/// One source export: where it lives and where its header row is
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub path: PathBuf,
    /// 0-based row index of the header; rows above it are skipped
    pub header_row: usize,
}

impl SourceSpec {
    pub fn new<P: Into<PathBuf>>(path: P, header_row: usize) -> Self {
        SourceSpec {
            path: path.into(),
            header_row,
        }
    }
}

/// Convert an Excel cell to a table value
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) if s.is_empty() => Value::Empty,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Whole numbers come back from Excel as floats
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Value::String(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => Value::Empty,
        },
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Empty,
    }
}

fn header_name(cell: &Data) -> String {
    cell_to_value(cell).to_display_string().trim().to_string()
}

/// Read the first worksheet of an export into a `Table`
pub fn read_table(spec: &SourceSpec) -> Result<Table> {
    let path: &Path = &spec.path;
    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .with_context(|| format!("Excel file has no sheets: {}", path.display()))?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    if rows.len() <= spec.header_row {
        bail!(
            "Sheet '{}' has {} rows, expected a header at row {}",
            sheet_name,
            rows.len(),
            spec.header_row
        );
    }

    let headers: Vec<String> = rows[spec.header_row].iter().map(header_name).collect();
    let width = headers.len();

    let mut table = Table::new(headers);
    for row in rows.iter().skip(spec.header_row + 1) {
        let mut cells: Vec<Value> = row.iter().take(width).map(cell_to_value).collect();
        cells.resize(width, Value::Empty);
        table.push_row(cells)?;
    }

    log::debug!(
        "Read {} rows x {} columns from {}",
        table.len(),
        width,
        path.display()
    );
    Ok(table)
}
