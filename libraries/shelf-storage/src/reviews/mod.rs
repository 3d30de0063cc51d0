//! Reviews left by users on catalog books

use crate::{timestamp_to_datetime, Result, StorageError};
use shelf_core::types::{
    BookId, NewReview, Rating, Review, ReviewId, ReviewWithAuthor, UserId,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn review_from_row(row: &SqliteRow) -> Result<Review> {
    let rating: i64 = row.try_get("rating")?;
    Ok(Review {
        id: row.try_get("id")?,
        book_id: row.try_get("book_id")?,
        user_id: row.try_get("user_id")?,
        review: row.try_get("review")?,
        rating: Rating::try_from(rating).map_err(|e| StorageError::InvalidData(e.to_string()))?,
        created_at: timestamp_to_datetime(row.try_get("created_at")?)?,
    })
}

/// Store a review
///
/// Fails with [`StorageError::Duplicate`] when the user already reviewed the book.
pub async fn create(pool: &SqlitePool, review: NewReview) -> Result<Review> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO reviews (book_id, user_id, review, rating, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(review.book_id)
    .bind(review.user_id)
    .bind(review.review.as_str())
    .bind(i64::from(review.rating.value()))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        StorageError::from_write(e, "review", || {
            format!("book {} by user {}", review.book_id, review.user_id)
        })
    })?;

    let id = result.last_insert_rowid();
    tracing::debug!(
        review_id = id,
        book_id = review.book_id,
        user_id = review.user_id,
        "Stored review"
    );

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Review", id))
}

pub async fn get_by_id(pool: &SqlitePool, id: ReviewId) -> Result<Option<Review>> {
    let row = sqlx::query(
        "SELECT id, book_id, user_id, review, rating, created_at FROM reviews WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(review_from_row).transpose()
}

/// Whether `user_id` has already reviewed `book_id`
pub async fn exists_for(pool: &SqlitePool, book_id: BookId, user_id: UserId) -> Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE book_id = ? AND user_id = ?")
            .bind(book_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

/// All reviews of a book with their authors' display names, newest first
pub async fn for_book(pool: &SqlitePool, book_id: BookId) -> Result<Vec<ReviewWithAuthor>> {
    let rows = sqlx::query(
        "SELECT r.id, r.book_id, r.user_id, r.review, r.rating, r.created_at,
                u.name AS author_name
         FROM reviews r
         INNER JOIN users u ON u.id = r.user_id
         WHERE r.book_id = ?
         ORDER BY r.created_at DESC, r.id DESC",
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(ReviewWithAuthor {
                review: review_from_row(row)?,
                author_name: row.try_get("author_name")?,
            })
        })
        .collect()
}
