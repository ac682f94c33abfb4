//! Parser for `Source.csv`, holding the run-wide disclosure control statement.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_string, read_catalog_file};

/// The statistical disclosure control statement from the first row.
pub fn parse_sdc_statement(path: &Path) -> Result<String, CatalogError> {
    let file = read_catalog_file(path)?;
    let idx_statement = file.require(path, "SDC_Statement")?;

    let first = file.records.first().ok_or_else(|| CatalogError::Empty {
        path: path.to_path_buf(),
    })?;
    Ok(get_string(first, Some(idx_statement)).unwrap_or_default())
}
