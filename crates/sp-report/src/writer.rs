//! CSV artifact writers for the per-dataset Data and Metadata sheets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use sp_model::TidyTable;

/// Write `<id>_data.csv` and return the path written.
///
/// Rows go out exactly as held in the table. The first data row already
/// duplicates the headers, so the sheet opens with two header lines by
/// contract and downstream styling must not reorder anything.
pub fn write_data_csv(output_dir: &Path, dataset_id: &str, table: &TidyTable) -> Result<PathBuf> {
    let path = output_dir.join(format!("{dataset_id}_data.csv"));
    ensure_parent(&path)?;

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer
        .write_record(&table.headers)
        .with_context(|| format!("failed to write headers to {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    info!(dataset_id, path = %path.display(), rows = table.rows.len(), "data sheet written");
    Ok(path)
}

/// Write `<id>_metadata.csv` from rendered field/value rows.
pub fn write_metadata_csv(
    output_dir: &Path,
    dataset_id: &str,
    rows: &[(String, String)],
) -> Result<PathBuf> {
    let path = output_dir.join(format!("{dataset_id}_metadata.csv"));
    ensure_parent(&path)?;

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for (field, value) in rows {
        writer
            .write_record([field.as_str(), value.as_str()])
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    info!(dataset_id, path = %path.display(), rows = rows.len(), "metadata sheet written");
    Ok(path)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
