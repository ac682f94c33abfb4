use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("catalog {path} is missing required column {column}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("catalog {path} has no rows")]
    Empty { path: PathBuf },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, error: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: error.to_string(),
        }
    }

    pub(crate) fn missing_column(path: impl Into<PathBuf>, column: &str) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.to_string(),
        }
    }
}
