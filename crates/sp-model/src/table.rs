//! Raw extract tables and the canonical tidy layout.

use serde::{Deserialize, Serialize};

/// A raw wide extract table, all cells kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractTable {
    /// File stem the table was read from, e.g. `nat_SP101` or `SP101A`.
    pub id: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExtractTable {
    pub fn new(id: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            id: id.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Column signature: header names in order. Combination groups require
    /// identical signatures across all members.
    pub fn signature(&self) -> &[String] {
        &self.headers
    }
}

/// The canonical tidy layout: ordered columns, with the header labels
/// duplicated as the first data row (a contract of the downstream renderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidyTable {
    pub headers: Vec<String>,
    /// Data rows; `rows[0]` repeats `headers` verbatim.
    pub rows: Vec<Vec<String>>,
}

impl TidyTable {
    /// Build a tidy table from ordered headers and data rows, inserting the
    /// duplicated header row.
    pub fn with_header_row(headers: Vec<String>, data_rows: Vec<Vec<String>>) -> Self {
        let mut rows = Vec::with_capacity(data_rows.len() + 1);
        rows.push(headers.clone());
        rows.extend(data_rows);
        Self { headers, rows }
    }

    /// Number of observation rows, excluding the duplicated header row.
    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}
