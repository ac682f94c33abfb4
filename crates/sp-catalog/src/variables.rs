//! Parser for `Variable.csv`, the variable catalog.

use std::path::Path;

use crate::error::CatalogError;
use crate::reader::{get_field, get_string, read_catalog_file};

/// Variable type code marking geographic variables.
pub const GEOG_TYPE_CODE: &str = "GEOG";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VariableRow {
    pub mnemonic: String,
    pub title: String,
    pub description: String,
    pub type_code: String,
    pub quality_statement: Option<String>,
    pub quality_url: Option<String>,
    pub topic: Option<String>,
}

impl VariableRow {
    pub fn is_geographic(&self) -> bool {
        self.type_code == GEOG_TYPE_CODE
    }
}

pub fn parse_variables_csv(path: &Path) -> Result<Vec<VariableRow>, CatalogError> {
    let file = read_catalog_file(path)?;

    let idx_mnemonic = file.require(path, "Variable_Mnemonic")?;
    let idx_title = file.require(path, "Variable_Title")?;
    let idx_description = file.index("Variable_Description");
    let idx_type = file.index("Variable_Type_Code");
    let idx_quality = file.index("Quality_Statement_Text");
    let idx_quality_url = file.index("Quality_Summary_URL");
    let idx_topic = file.index("Topic_Mnemonic");

    let mut results = Vec::new();
    for row in &file.records {
        let Some(mnemonic) = get_string(row, Some(idx_mnemonic)) else {
            continue;
        };
        results.push(VariableRow {
            mnemonic,
            title: get_field(row, idx_title),
            description: get_string(row, idx_description).unwrap_or_default(),
            type_code: get_string(row, idx_type).unwrap_or_default(),
            quality_statement: get_string(row, idx_quality),
            quality_url: get_string(row, idx_quality_url),
            topic: get_string(row, idx_topic),
        });
    }
    Ok(results)
}
