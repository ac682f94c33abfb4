//! Shared CSV reading helpers for the catalog parsers.

use std::path::Path;

use crate::error::CatalogError;

/// Header and record rows of one catalog file, headers trimmed of
/// whitespace and BOM markers. The commission spec sheet exports its key
/// column with a leading space, so trimming here is load-bearing.
pub(crate) struct CatalogFile {
    pub headers: Vec<String>,
    pub records: Vec<csv::StringRecord>,
}

pub(crate) fn read_catalog_file(path: &Path) -> Result<CatalogFile, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::csv(path, &e))?
        .iter()
        .map(|h| h.trim().trim_matches('\u{feff}').to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::csv(path, &e))?;
        records.push(record);
    }

    Ok(CatalogFile { headers, records })
}

impl CatalogFile {
    /// Index of a required column.
    pub fn require(&self, path: &Path, name: &str) -> Result<usize, CatalogError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CatalogError::missing_column(path, name))
    }

    /// Index of an optional column.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Trimmed cell value, `None` when the cell is absent or empty.
pub(crate) fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Trimmed cell value, empty string when absent.
pub(crate) fn get_field(row: &csv::StringRecord, idx: usize) -> String {
    row.get(idx).map(|s| s.trim().to_string()).unwrap_or_default()
}
