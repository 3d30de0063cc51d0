//! Domain types for the catalog

mod book;
mod ratings;
mod review;
mod user;

pub use book::{Book, BookId, NewBook};
pub use ratings::BookRatings;
pub use review::{
    NewReview, Rating, Review, ReviewId, ReviewText, ReviewWithAuthor, MIN_REVIEW_LENGTH,
};
pub use user::{Identity, NewUser, Role, User, UserId};
