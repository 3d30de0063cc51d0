//! Shelf Ratings
//!
//! Client for the third-party review-aggregation service that reports how
//! many ratings a book has and its average score.
//!
//! The service is an optional collaborator: [`RatingsLookup::lookup`] never
//! fails. Missing API keys, network problems and malformed responses are
//! logged and reported as "no data".
//!
//! # Example
//!
//! ```ignore
//! use shelf_ratings::{GoodreadsClient, RatingsConfig, RatingsLookup};
//!
//! let client = GoodreadsClient::new(RatingsConfig::with_key("my-api-key"))?;
//! let ratings = client.lookup("0380795272").await.unwrap_or_default();
//! println!("{} ratings, average {}", ratings.review_count, ratings.average_score);
//! ```

mod client;
mod error;
mod types;

pub use client::{GoodreadsClient, RatingsLookup};
pub use error::{RatingsError, Result};
pub use types::{RatingsConfig, DEFAULT_ENDPOINT};
