//! Tabular records extracted from documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One data row: column key to cell text, in column order.
pub type RecordRow = IndexMap<String, String>;

/// Header and rows of one extracted table.
///
/// Serializes as `{"headers": [...], "data": [...]}`. Header text is used
/// verbatim as row keys, so a repeated header name makes the later column
/// overwrite the earlier one within a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Header cells in column order (may contain duplicates)
    pub headers: Vec<String>,

    /// Data rows
    #[serde(rename = "data")]
    pub rows: Vec<RecordRow>,
}

impl TableRecord {
    /// Create a record with headers and no rows.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Key for the column at `index`: the header text, or `列{index+1}`
    /// when the row is wider than the header.
    pub fn column_key(&self, index: usize) -> String {
        match self.headers.get(index) {
            Some(header) => header.clone(),
            None => fallback_label(index),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: RecordRow) {
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the record has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column, empty string where a row lacks the key.
    pub fn column(&self, key: &str) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(key).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

/// Synthetic label for a column without a header (1-based).
pub fn fallback_label(index: usize) -> String {
    format!("列{}", index + 1)
}
