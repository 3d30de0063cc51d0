//! Aggregate review data from the external lookup

use serde::{Deserialize, Serialize};

/// Review count and average rating reported by the third-party service.
///
/// These numbers are independent of the reviews stored in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BookRatings {
    /// Number of ratings the service knows about
    pub review_count: i64,

    /// Average rating on the service's own scale
    pub average_score: f64,
}

impl BookRatings {
    /// Collapse a missing lookup result into zero reviews and a zero rating.
    pub fn or_default(ratings: Option<Self>) -> Self {
        ratings.unwrap_or_default()
    }
}
