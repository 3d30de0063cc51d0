//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed file at line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("Insert failed at line {line}: {source}")]
    Insert {
        line: u64,
        #[source]
        source: shelf_storage::StorageError,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ImportError {
    /// Line of the input file the error refers to, when known
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Parse { line, .. }
            | Self::InvalidRecord { line, .. }
            | Self::Insert { line, .. } => Some(*line),
            Self::Io(_) | Self::Database(_) => None,
        }
    }

    /// Whether the run stopped on an ISBN that is already in the catalog
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Insert { source, .. } if source.is_duplicate())
    }
}
