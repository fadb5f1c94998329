use thiserror::Error;

/// Fatal errors. Anything the analysis can recover from (a bad SMILES, a
/// failed image write) is reported as a value instead, see
/// [crate::structure::Skipped] and [crate::chart::SaveOutcome].
#[derive(Debug, Error)]
pub enum MolsimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("compound {0:?} appears more than once in the dataset")]
    DuplicateCompound(String),

    #[error("reference compound {0} not found")]
    UnknownReference(String),

    #[error("invalid structure for reference {name}: {reason}")]
    InvalidReference { name: String, reason: String },

    #[error("no valid compounds processed, check the structure strings")]
    EmptyDataset,

    #[error("compound {name:?} has no normalized value for {descriptor}")]
    NotNormalized { name: String, descriptor: String },
}

pub type Result<T> = std::result::Result<T, MolsimError>;
