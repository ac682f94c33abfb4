//! Resolved per-dataset metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{DatasetFamily, ResolvedId};

/// A categorical coding scheme applied to one variable's values.
///
/// Labels are unique within a classification; every label appearing in raw
/// data must be a key of `label_to_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationMapping {
    /// Classification mnemonic, e.g. `ethnic_group_tb_20b`.
    pub mnemonic: String,
    /// Human classification label used for tidy column naming.
    pub label: String,
    pub label_to_code: BTreeMap<String, String>,
}

/// A non-geographic dataset dimension with its resolved descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRef {
    pub mnemonic: String,
    pub title: String,
    pub description: String,
    pub quality_note: Option<String>,
    /// HYPERLINK formula pairing the quality summary URL with its topic text.
    pub quality_url: Option<String>,
    pub classification: ClassificationMapping,
}

/// A geographic aggregation level the dataset is published at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaType {
    pub code: String,
    pub title: String,
    pub description: String,
}

/// Everything the transformer and renderer need for one dataset.
///
/// Built once per dataset per run and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub resolved_id: ResolvedId,
    pub family: DatasetFamily,
    pub title: String,
    pub description: String,
    pub statistical_unit: String,
    pub population: String,
    /// Run-wide statistical disclosure control statement.
    pub sdc_statement: String,
    /// Area types in coarse-to-fine precedence order.
    pub area_types: Vec<AreaType>,
    /// Variables in resolver insertion order; this order is an externally
    /// observable contract of the tidy and metadata outputs.
    pub variables: Vec<VariableRef>,
    /// Ordered identifiers of the extracts merged into this dataset.
    pub provenance: Vec<String>,
}

impl MetadataRecord {
    pub fn dataset_id(&self) -> &str {
        &self.resolved_id.requested
    }

    pub fn variable(&self, mnemonic: &str) -> Option<&VariableRef> {
        self.variables.iter().find(|v| v.mnemonic == mnemonic)
    }
}
