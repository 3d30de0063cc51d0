//! Configuration and wire types for the ratings service.

use serde::{Deserialize, Deserializer};

/// Review-count endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://www.goodreads.com/book/review_counts.json";

/// Ratings client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingsConfig {
    /// Review-count endpoint URL
    pub endpoint: String,

    /// API key; lookups are skipped without one
    pub api_key: Option<String>,
}

impl RatingsConfig {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Default endpoint with the given key
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, Some(api_key.into()))
    }
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, None)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewCountsResponse {
    #[serde(default)]
    pub books: Vec<ReviewCounts>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewCounts {
    pub work_ratings_count: i64,
    #[serde(deserialize_with = "number_or_string")]
    pub average_rating: f64,
}

/// The service reports averages as strings ("3.82"); accept plain numbers too.
fn number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
