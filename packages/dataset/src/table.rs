// ABOUTME: In-memory tabular dataset loaded from CSV
// ABOUTME: Lowercased column names, positional rows, numeric coercion helpers

use std::io::Read;
use std::path::Path;

use crate::DatasetError;

/// An immutable table of string cells. Empty cells are missing values.
///
/// The whole table is replaced wholesale on reload; rows have no identity
/// beyond their position.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read a CSV file from disk. Column names are normalized to lowercase.
    pub fn from_csv_path(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Read CSV from any reader. Column names are normalized to lowercase.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let columns = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Raw cell values of a column, in row order. `None` if the column is
    /// absent. Empty cells are returned verbatim; callers treat them as
    /// missing.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(move |row| {
            row.get(index).map(String::as_str).unwrap_or("")
        }))
    }

    /// Numerically coerced column values; non-numeric cells become `None`.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        Some(self.column(name)?.map(parse_number).collect())
    }
}

/// Coerce a raw cell to a number. Blank and non-numeric cells yield `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}
