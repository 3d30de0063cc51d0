/// Public JSON lookup by ISBN
use crate::{
    error::{Result, ServerError},
    messages,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shelf_core::BookRatings;
use shelf_storage::books;

#[derive(Debug, Serialize)]
pub struct BookLookupResponse {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub review_count: i64,
    pub average_score: f64,
}

/// GET /api/:isbn
pub async fn lookup_isbn(
    State(app_state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookLookupResponse>> {
    let book = books::find_by_isbn(app_state.db.pool(), &isbn)
        .await?
        .ok_or_else(|| ServerError::NotFound(messages::nothing_found_for_isbn(&isbn)))?;

    let ratings = BookRatings::or_default(app_state.ratings.lookup(&book.isbn).await);

    Ok(Json(BookLookupResponse {
        title: book.title,
        author: book.author,
        year: book.year,
        isbn: book.isbn,
        review_count: ratings.review_count,
        average_score: ratings.average_score,
    }))
}
