//! HTTP client for the review-count service.

use crate::error::{RatingsError, Result};
use crate::types::{RatingsConfig, ReviewCountsResponse};
use async_trait::async_trait;
use reqwest::Client;
use shelf_core::BookRatings;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of aggregate review data for a book.
///
/// Implementations swallow every failure: `None` means "no data available".
#[async_trait]
pub trait RatingsLookup: Send + Sync {
    async fn lookup(&self, isbn: &str) -> Option<BookRatings>;
}

/// Client for the Goodreads-style `review_counts` endpoint.
#[derive(Debug, Clone)]
pub struct GoodreadsClient {
    http: Client,
    config: RatingsConfig,
}

impl GoodreadsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RatingsConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("Shelf/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch aggregate ratings, reporting why nothing came back.
    pub async fn fetch(&self, isbn: &str) -> Result<BookRatings> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RatingsError::MissingApiKey)?;

        debug!(isbn = %isbn, "Requesting review counts");

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[("key", api_key), ("isbns", isbn)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RatingsError::NotFound(isbn.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RatingsError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let body: ReviewCountsResponse = response
            .json()
            .await
            .map_err(|e| RatingsError::ParseError(e.to_string()))?;

        let counts = body
            .books
            .into_iter()
            .next()
            .ok_or_else(|| RatingsError::NotFound(isbn.to_string()))?;

        Ok(BookRatings {
            review_count: counts.work_ratings_count,
            average_score: counts.average_rating,
        })
    }
}

#[async_trait]
impl RatingsLookup for GoodreadsClient {
    async fn lookup(&self, isbn: &str) -> Option<BookRatings> {
        match self.fetch(isbn).await {
            Ok(ratings) => Some(ratings),
            Err(RatingsError::MissingApiKey) => {
                debug!("Ratings lookup skipped: no API key configured");
                None
            }
            Err(e) => {
                warn!(isbn = %isbn, error = %e, "Ratings lookup failed");
                None
            }
        }
    }
}
