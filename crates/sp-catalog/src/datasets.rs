//! Parser for `Dataset.csv`, the standard dataset catalog.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_field, get_string, read_catalog_file};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DatasetRow {
    pub mnemonic: String,
    pub title: String,
    pub description: String,
    pub statistical_unit: String,
    pub population: String,
}

pub fn parse_datasets_csv(path: &Path) -> Result<Vec<DatasetRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    let idx_mnemonic = file.require(path, "Dataset_Mnemonic")?;
    let idx_title = file.require(path, "Dataset_Title")?;
    let idx_description = file.index("Dataset_Description");
    let idx_unit = file.index("Statistical_Unit");
    let idx_population = file.index("Dataset_Population");

    let mut results = Vec::new();
    for row in &file.records {
        let Some(mnemonic) = get_string(row, Some(idx_mnemonic)) else {
            continue;
        };
        results.push(DatasetRow {
            mnemonic,
            title: get_field(row, idx_title),
            description: get_string(row, idx_description).unwrap_or_default(),
            statistical_unit: get_string(row, idx_unit).unwrap_or_default(),
            population: get_string(row, idx_population).unwrap_or_default(),
        });
    }
    Ok(results)
}
