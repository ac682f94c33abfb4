//! Parsers for `Classification.csv` and `Category.csv`.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_field, get_string, read_catalog_file};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClassificationRow {
    pub mnemonic: String,
    /// External English label used for tidy column naming.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CategoryRow {
    pub classification: String,
    pub code: String,
    pub label: String,
}

pub fn parse_classifications_csv(path: &Path) -> Result<Vec<ClassificationRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    let idx_mnemonic = file.require(path, "Classification_Mnemonic")?;
    let idx_label = file.require(path, "External_Classification_Label_English")?;

    let mut results = Vec::new();
    for row in &file.records {
        let Some(mnemonic) = get_string(row, Some(idx_mnemonic)) else {
            continue;
        };
        results.push(ClassificationRow {
            mnemonic,
            label: get_field(row, idx_label),
        });
    }
    Ok(results)
}

pub fn parse_categories_csv(path: &Path) -> Result<Vec<CategoryRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    let idx_classification = file.require(path, "Classification_Mnemonic")?;
    let idx_code = file.require(path, "Category_Code")?;
    let idx_label = file.require(path, "External_Category_Label_English")?;

    let mut results = Vec::new();
    for row in &file.records {
        let Some(classification) = get_string(row, Some(idx_classification)) else {
            continue;
        };
        results.push(CategoryRow {
            classification,
            code: get_field(row, idx_code),
            label: get_field(row, idx_label),
        });
    }
    Ok(results)
}
