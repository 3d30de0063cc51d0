//! Error types for the ratings client.

use thiserror::Error;

/// Reasons a lookup produced no data.
#[derive(Error, Debug)]
pub enum RatingsError {
    /// No API key configured
    #[error("No API key configured")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Service error ({status}): {message}")]
    ServiceError { status: u16, message: String },

    /// Service knows nothing about the ISBN
    #[error("No ratings for isbn {0}")]
    NotFound(String),

    /// Failed to parse service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for ratings operations.
pub type Result<T> = std::result::Result<T, RatingsError>;
