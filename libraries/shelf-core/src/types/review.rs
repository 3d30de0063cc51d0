//! Review types and the rules a submitted review must satisfy

use crate::error::{Result, ShelfError};
use crate::types::{BookId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ReviewId = i64;

/// Minimum review length, counted in characters after trimming
pub const MIN_REVIEW_LENGTH: usize = 20;

/// A rating from the fixed set 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(self) -> u8 {
        self.0
    }

    /// Every accepted rating, lowest first
    pub fn all() -> impl Iterator<Item = Rating> {
        (Self::MIN..=Self::MAX).map(Rating)
    }

    fn out_of_range() -> ShelfError {
        ShelfError::InvalidRating {
            min: Self::MIN,
            max: Self::MAX,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = ShelfError;

    fn try_from(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(Self::out_of_range())
        }
    }
}

impl TryFrom<i64> for Rating {
    type Error = ShelfError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| Self::out_of_range())
            .and_then(<Rating as TryFrom<u8>>::try_from)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| Self::out_of_range())
            .and_then(<Rating as TryFrom<u8>>::try_from)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review text that satisfies the minimum length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReviewText(String);

impl ReviewText {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_REVIEW_LENGTH {
            return Err(ShelfError::ReviewTooShort {
                min: MIN_REVIEW_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A stored review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    pub review: String,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

/// A review joined with its author's display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: Review,
    pub author_name: String,
}

/// Data for creating a new review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub book_id: BookId,
    pub user_id: UserId,
    pub review: ReviewText,
    pub rating: Rating,
}
