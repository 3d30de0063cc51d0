//! Shelf Core
//!
//! Domain types and error handling shared by every Shelf crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Book`, `Review`, `Rating`, `BookRatings`
//! - **Identity**: the logged-in `Identity` derived from a client session
//! - **Error Handling**: unified `ShelfError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelf_core::types::{Rating, ReviewText};
//!
//! let rating = Rating::try_from(4).unwrap();
//! assert_eq!(rating.value(), 4);
//!
//! assert!(ReviewText::parse("too short").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShelfError};
pub use types::{
    Book, BookId, BookRatings, Identity, NewBook, NewReview, NewUser, Rating, Review, ReviewId,
    ReviewText, ReviewWithAuthor, Role, User, UserId, MIN_REVIEW_LENGTH,
};
