//! In-memory tabular model shared by all report transformations
//!
//! A `Table` is an ordered set of named columns over rows of `Value` cells.
//! Every transformation in `reports` takes tables in and returns tables out;
//! Excel I/O lives in `excel` and only converts to/from this model.

use anyhow::{Context, Result, bail};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// True for missing cells and whitespace-only strings
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to an integer.
    ///
    /// Floats truncate toward zero; numeric strings are parsed. Returns
    /// `None` for blanks, booleans and non-numeric text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Some(i)
                } else {
                    s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
                }
            }
            _ => None,
        }
    }

    /// Render for display in headers and diagnostics
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::String(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Rows by named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row; width must match the column count
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            bail!(
                "Row has {} cells but table has {} columns",
                row.len(),
                self.columns.len()
            );
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of a named column; missing columns are a hard error
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .with_context(|| format!("Missing expected column: {}", name))
    }

    /// Restrict and reorder to the named columns
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let indices: Vec<usize> = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<Result<_>>()?;

        let mut out = Table::new(names.to_vec());
        for row in &self.rows {
            out.rows
                .push(indices.iter().map(|&i| row[i].clone()).collect());
        }
        Ok(out)
    }

    /// Keep only rows matching the predicate
    pub fn retain<F: FnMut(&[Value]) -> bool>(&mut self, mut predicate: F) {
        self.rows.retain(|row| predicate(row));
    }

    /// Append another table's rows; column sets must match exactly
    pub fn concat(mut self, other: Table) -> Result<Table> {
        if self.columns != other.columns {
            bail!(
                "Cannot concatenate tables with different columns: {:?} vs {:?}",
                self.columns,
                other.columns
            );
        }
        self.rows.extend(other.rows);
        Ok(self)
    }

    /// Append a column with one precomputed value per row
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.rows.len() {
            bail!(
                "Column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            );
        }
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Append an all-blank placeholder column
    pub fn add_empty_column(&mut self, name: &str) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Empty);
        }
    }

    /// Drop the contiguous block of trailing rows whose key column is blank.
    ///
    /// Footer/summary blocks in the source exports leave the key column empty;
    /// trimming by sentinel instead of a fixed row count survives layout
    /// changes in the export. Returns the number of rows dropped.
    pub fn trim_trailing_by_key(&mut self, key_column: &str) -> Result<usize> {
        let key = self.column_index(key_column)?;
        let keep = self
            .rows
            .iter()
            .rposition(|row| !row[key].is_blank())
            .map(|i| i + 1)
            .unwrap_or(0);
        let dropped = self.rows.len() - keep;
        self.rows.truncate(keep);
        Ok(dropped)
    }

    /// Rewrite every cell of a column in place
    pub fn map_column<F: FnMut(&Value) -> Value>(&mut self, name: &str, mut f: F) -> Result<()> {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Replace missing cells with empty strings
    pub fn fill_blanks(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                if *cell == Value::Empty {
                    *cell = Value::String(String::new());
                }
            }
        }
    }

    /// Integer sum over a column; non-numeric cells are an error
    pub fn sum_int(&self, column: &str) -> Result<i64> {
        let idx = self.column_index(column)?;
        let mut total = 0i64;
        for (row_idx, row) in self.rows.iter().enumerate() {
            let value = row[idx].as_int().with_context(|| {
                format!(
                    "Non-numeric value '{}' in column '{}' at row {}",
                    row[idx].to_display_string(),
                    column,
                    row_idx
                )
            })?;
            total += value;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(vec!["a", "b", "c"]);
        t.push_row(vec!["x".into(), Value::Int(1), Value::Empty]).unwrap();
        t.push_row(vec!["y".into(), Value::Int(2), "z".into()]).unwrap();
        t
    }

    #[test]
    fn test_as_int_coercions() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Float(7.0).as_int(), Some(7));
        assert_eq!(Value::Float(2.5).as_int(), Some(2));
        assert_eq!(Value::String(" 42 ".into()).as_int(), Some(42));
        assert_eq!(Value::String("10.0".into()).as_int(), Some(10));
        assert_eq!(Value::String("abc".into()).as_int(), None);
        assert_eq!(Value::Empty.as_int(), None);
    }

    #[test]
    fn test_select_reorders() {
        let out = sample().select(&["b", "a"]).unwrap();
        assert_eq!(out.columns(), &["b".to_string(), "a".to_string()]);
        assert_eq!(out.rows()[0], vec![Value::Int(1), "x".into()]);
    }

    #[test]
    fn test_select_missing_column_names_it() {
        let err = sample().select(&["a", "nope"]).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_concat_rejects_mismatched_columns() {
        let other = Table::new(vec!["a", "b"]);
        assert!(sample().concat(other).is_err());
    }

    #[test]
    fn test_trim_trailing_by_key() {
        let mut t = Table::new(vec!["key", "v"]);
        t.push_row(vec!["k1".into(), Value::Int(1)]).unwrap();
        t.push_row(vec![Value::Empty, Value::Int(2)]).unwrap();
        t.push_row(vec!["k2".into(), Value::Int(3)]).unwrap();
        t.push_row(vec![Value::String("  ".into()), Value::Int(4)]).unwrap();
        t.push_row(vec![Value::Empty, Value::Int(5)]).unwrap();

        let dropped = t.trim_trailing_by_key("key").unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(t.len(), 3);
        // Blank keys in the middle of the data are kept
        assert_eq!(t.rows()[1][1], Value::Int(2));
    }

    #[test]
    fn test_trim_all_blank_keys_empties_table() {
        let mut t = Table::new(vec!["key"]);
        t.push_row(vec![Value::Empty]).unwrap();
        t.push_row(vec![Value::Empty]).unwrap();
        assert_eq!(t.trim_trailing_by_key("key").unwrap(), 2);
        assert!(t.is_empty());
    }

    #[test]
    fn test_sum_int() {
        let mut t = Table::new(vec!["q"]);
        t.push_row(vec![Value::Int(3)]).unwrap();
        t.push_row(vec![Value::Float(4.0)]).unwrap();
        t.push_row(vec!["5".into()]).unwrap();
        assert_eq!(t.sum_int("q").unwrap(), 12);
    }

    #[test]
    fn test_sum_int_rejects_non_numeric() {
        let mut t = Table::new(vec!["q"]);
        t.push_row(vec!["n/a".into()]).unwrap();
        let err = t.sum_int("q").unwrap_err();
        assert!(err.to_string().contains("'q'"));
    }

    #[test]
    fn test_fill_blanks() {
        let mut t = sample();
        t.fill_blanks();
        assert_eq!(t.rows()[0][2], Value::String(String::new()));
    }

    #[test]
    fn test_add_column_length_check() {
        let mut t = sample();
        assert!(t.add_column("d", vec![Value::Int(1)]).is_err());
        t.add_column("d", vec![Value::Int(1), Value::Int(2)]).unwrap();
        assert_eq!(t.columns().last().map(String::as_str), Some("d"));
    }
}
