/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: String, key: String },

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A stored row could not be turned back into a domain value
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a duplicate error
    pub fn duplicate(entity: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Duplicate {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Whether this error came from a uniqueness constraint
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Map a write error, turning unique violations into `Duplicate`
    pub(crate) fn from_write(
        err: sqlx::Error,
        entity: &str,
        key: impl FnOnce() -> String,
    ) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::duplicate(entity, key())
            }
            _ => Self::Database(err),
        }
    }
}
