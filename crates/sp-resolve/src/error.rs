use thiserror::Error;

/// Resolution failures; all are fatal to the affected dataset only.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("dataset {id} not found in {catalog} (tried {tried})")]
    UnresolvedDataset {
        id: String,
        catalog: &'static str,
        tried: String,
    },

    #[error("dataset {dataset}: no {catalog} row for {key}")]
    MissingJoinRow {
        dataset: String,
        catalog: &'static str,
        key: String,
    },

    #[error("dataset {id} matches neither the primary nor the commissioned identifier family")]
    AmbiguousFamily { id: String },

    #[error("dataset {dataset}: variable {variable} carries quality topic {topic:?} with no display text")]
    UnknownTopic {
        dataset: String,
        variable: String,
        topic: String,
    },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
