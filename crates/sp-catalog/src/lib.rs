//! Read-only, in-memory lookups over the static reference catalogs.
//!
//! Catalogs load once per run and are shared immutably. Duplicate keys are
//! first-wins for scalar lookups; group lookups preserve insertion order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod classifications;
pub mod commissioned;
pub mod dataset_variables;
pub mod datasets;
pub mod error;
mod reader;
pub mod source;
pub mod variables;

pub use classifications::{CategoryRow, ClassificationRow};
pub use commissioned::CommissionRow;
pub use dataset_variables::DatasetVariableRow;
pub use datasets::DatasetRow;
pub use error::CatalogError;
pub use variables::VariableRow;

/// Locations of the reference tables for one run.
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    /// Directory holding the cantabular export CSVs.
    pub catalog_dir: PathBuf,
    /// CSV export of the commission specification sheet.
    pub commission_spec: PathBuf,
}

impl CatalogPaths {
    fn catalog_file(&self, name: &str) -> PathBuf {
        self.catalog_dir.join(name)
    }
}

/// All reference lookups, loaded once and read-only afterward.
#[derive(Debug)]
pub struct Catalogs {
    /// Dataset catalog keyed by mnemonic (first-wins).
    pub datasets: BTreeMap<String, DatasetRow>,
    /// Variable catalog keyed by mnemonic (first-wins).
    pub variables: BTreeMap<String, VariableRow>,
    /// Classification catalog keyed by mnemonic (first-wins).
    pub classifications: BTreeMap<String, ClassificationRow>,
    /// Category rows grouped by classification mnemonic, insertion order.
    pub categories: BTreeMap<String, Vec<CategoryRow>>,
    /// Join-table rows grouped by dataset mnemonic, insertion order.
    pub dataset_variables: BTreeMap<String, Vec<DatasetVariableRow>>,
    /// Commission spec rows keyed by table number (first-wins).
    pub commissioned: BTreeMap<String, CommissionRow>,
    /// Run-wide statistical disclosure control statement.
    pub sdc_statement: String,
    /// Titles of every geographic variable, keyed by mnemonic.
    pub geog_titles: BTreeMap<String, String>,
}

impl Catalogs {
    pub fn load(paths: &CatalogPaths) -> Result<Self, CatalogError> {
        let datasets = first_wins(
            datasets::parse_datasets_csv(&paths.catalog_file("Dataset.csv"))?,
            |row| row.mnemonic.clone(),
        );
        let variable_rows = variables::parse_variables_csv(&paths.catalog_file("Variable.csv"))?;
        let geog_titles = geog_titles(&variable_rows);
        let variables = first_wins(variable_rows, |row| row.mnemonic.clone());
        let classifications = first_wins(
            classifications::parse_classifications_csv(
                &paths.catalog_file("Classification.csv"),
            )?,
            |row| row.mnemonic.clone(),
        );
        let categories = grouped(
            classifications::parse_categories_csv(&paths.catalog_file("Category.csv"))?,
            |row| row.classification.clone(),
        );
        let dataset_variables = grouped(
            dataset_variables::parse_dataset_variables_csv(
                &paths.catalog_file("Dataset_Variable.csv"),
            )?,
            |row| row.dataset.clone(),
        );
        let commissioned = first_wins(
            commissioned::parse_commission_csv(&paths.commission_spec)?,
            |row| row.table_number.clone(),
        );
        let sdc_statement = source::parse_sdc_statement(&paths.catalog_file("Source.csv"))?;

        Ok(Self {
            datasets,
            variables,
            classifications,
            categories,
            dataset_variables,
            commissioned,
            sdc_statement,
            geog_titles,
        })
    }

    /// Category label→code mapping for one classification, duplicate labels
    /// last-write-wins.
    pub fn label_to_code(&self, classification: &str) -> Option<BTreeMap<String, String>> {
        let rows = self.categories.get(classification)?;
        let mut mapping = BTreeMap::new();
        for row in rows {
            mapping.insert(row.label.clone(), row.code.clone());
        }
        Some(mapping)
    }
}

fn first_wins<T, F>(rows: Vec<T>, key: F) -> BTreeMap<String, T>
where
    F: Fn(&T) -> String,
{
    let mut map = BTreeMap::new();
    for row in rows {
        map.entry(key(&row)).or_insert(row);
    }
    map
}

fn grouped<T, F>(rows: Vec<T>, key: F) -> BTreeMap<String, Vec<T>>
where
    F: Fn(&T) -> String,
{
    let mut map: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for row in rows {
        map.entry(key(&row)).or_default().push(row);
    }
    map
}

fn geog_titles(rows: &[VariableRow]) -> BTreeMap<String, String> {
    let mut titles = BTreeMap::new();
    for row in rows {
        if row.is_geographic() {
            titles
                .entry(row.mnemonic.clone())
                .or_insert_with(|| row.title.clone());
        }
    }
    titles
}

/// Convenience for callers that already know the catalog directory layout.
pub fn load_catalogs(
    catalog_dir: &Path,
    commission_spec: &Path,
) -> Result<Catalogs, CatalogError> {
    Catalogs::load(&CatalogPaths {
        catalog_dir: catalog_dir.to_path_buf(),
        commission_spec: commission_spec.to_path_buf(),
    })
}
