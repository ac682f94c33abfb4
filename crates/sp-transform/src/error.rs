use thiserror::Error;

/// Combination and tidy failures; all are fatal to the affected dataset or
/// group only.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("group {group}: column signature of {member} does not match {reference}")]
    ColumnSignatureMismatch {
        group: String,
        reference: String,
        member: String,
    },

    #[error("group {group}: member {member} has unrecognized area variant {variant:?}")]
    CombinationOrder {
        group: String,
        member: String,
        variant: String,
    },

    #[error("table {table}: label {label:?} has no code in classification {classification}")]
    LabelNotFound {
        table: String,
        classification: String,
        label: String,
    },

    #[error("table {table}: unknown area-type code {code:?}")]
    UnknownAreaType { table: String, code: String },

    #[error("table {table}: column {column:?} does not name a resolved variable")]
    UnresolvedColumn { table: String, column: String },

    #[error("table {table}: required column {column:?} is missing")]
    MissingColumn { table: String, column: String },

    #[error("table {table}: no raw column for resolved variable {variable}")]
    MissingVariableColumn { table: String, variable: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
