//! Parser for `Dataset_Variable.csv`, the dataset-variable join table.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_string, read_catalog_file};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DatasetVariableRow {
    pub dataset: String,
    pub variable: String,
    pub classification: Option<String>,
    /// Set when this row names the dataset's lowest published geography
    /// rather than a classified dimension.
    pub lowest_geog: bool,
}

pub fn parse_dataset_variables_csv(path: &Path) -> Result<Vec<DatasetVariableRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    let idx_dataset = file.require(path, "Dataset_Mnemonic")?;
    let idx_variable = file.require(path, "Variable_Mnemonic")?;
    let idx_classification = file.index("Classification_Mnemonic");
    let idx_lowest_geog = file.index("Lowest_Geog_Variable_Flag");

    let mut results = Vec::new();
    for row in &file.records {
        let Some(dataset) = get_string(row, Some(idx_dataset)) else {
            continue;
        };
        let Some(variable) = get_string(row, Some(idx_variable)) else {
            continue;
        };
        results.push(DatasetVariableRow {
            dataset,
            variable,
            classification: get_string(row, idx_classification),
            lowest_geog: get_string(row, idx_lowest_geog).is_some(),
        });
    }
    Ok(results)
}
