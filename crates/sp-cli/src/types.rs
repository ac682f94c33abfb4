use std::path::PathBuf;

use serde::Serialize;

/// Outcome of one full publishing run.
#[derive(Debug, Serialize)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetSummary>,
    pub failures: Vec<StageFailure>,
    /// Path of the machine-readable run report, when written.
    pub report_path: Option<PathBuf>,
    pub dry_run: bool,
}

impl RunResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// One successfully published dataset.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub dataset_id: String,
    pub title: String,
    /// Data rows excluding the duplicated header row.
    pub records: usize,
    /// Extract identifiers merged into this dataset, empty when single-source.
    pub combined_from: Vec<String>,
    pub data_csv: Option<PathBuf>,
    pub metadata_csv: Option<PathBuf>,
}

/// A dataset excluded from the run, tagged with the stage that rejected it.
#[derive(Debug, Serialize)]
pub struct StageFailure {
    pub dataset_id: String,
    pub stage: Stage,
    pub reason: String,
}

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Load,
    Resolve,
    Combine,
    Tidy,
    Render,
    Emit,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Resolve => "resolve",
            Stage::Combine => "combine",
            Stage::Tidy => "tidy",
            Stage::Render => "render",
            Stage::Emit => "emit",
        }
    }
}
