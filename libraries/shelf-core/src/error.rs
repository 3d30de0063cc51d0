/// Core error types for Shelf
use thiserror::Error;

/// Result type alias using `ShelfError`
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Core error type for Shelf
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShelfError {
    /// Review text below the minimum length
    #[error("Review must be at least {min} characters long")]
    ReviewTooShort {
        /// Required minimum, in characters
        min: usize,
    },

    /// Rating outside the accepted set
    #[error("Rating must be between {min} and {max}")]
    InvalidRating {
        /// Lowest accepted rating
        min: u8,
        /// Highest accepted rating
        max: u8,
    },

    /// Unknown role name read back from storage
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
