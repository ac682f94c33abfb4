//! Parser for the commission specification table.
//!
//! This is the CSV export of the bespoke spec sheet for commissioned
//! datasets. Its descriptor fields (`variables`, `Geography`) are free text
//! and are parsed downstream by the resolver, not here.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_field, get_string, read_catalog_file};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CommissionRow {
    pub table_number: String,
    pub title: String,
    pub description: String,
    /// Free-text comma-separated classification list.
    pub variables: String,
    /// Free-text "/"-delimited geography list.
    pub geography: String,
    /// Free-text population, e.g. "Usual residents: aged 16 and over".
    pub population: String,
}

pub fn parse_commission_csv(path: &Path) -> Result<Vec<CommissionRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    // The upstream export writes the key column as " table number"; headers
    // are trimmed on read.
    let idx_number = file.require(path, "table number")?;
    let idx_title = file.require(path, "table title")?;
    let idx_description = file.index("dataset_description / Table Notes");
    let idx_variables = file.require(path, "variables")?;
    let idx_geography = file.require(path, "Geography")?;
    let idx_population = file.index("table population");

    let mut results = Vec::new();
    for row in &file.records {
        let Some(table_number) = get_string(row, Some(idx_number)) else {
            continue;
        };
        results.push(CommissionRow {
            table_number,
            title: get_field(row, idx_title),
            description: get_string(row, idx_description).unwrap_or_default(),
            variables: get_field(row, idx_variables),
            geography: get_field(row, idx_geography),
            population: get_string(row, idx_population).unwrap_or_default(),
        });
    }
    Ok(results)
}
