/// Catalog pages: search, book detail and review submission
use crate::{
    error::Result,
    messages,
    middleware::Session,
    state::AppState,
    views::{self, BookPage},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use shelf_core::{Book, BookId, BookRatings, Identity, NewReview, Rating, ReviewText};
use shelf_storage::{books, reviews};

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    /// `None` when no search was submitted
    pub criteria: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub rating: String,
}

/// GET /books
pub async fn search_page(
    State(app_state): State<AppState>,
    session: Session,
    Query(form): Query<SearchForm>,
) -> Result<Html<String>> {
    search(&app_state, &session, form).await
}

/// POST /books
pub async fn search_submit(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    search(&app_state, &session, form).await
}

async fn search(app_state: &AppState, session: &Session, form: SearchForm) -> Result<Html<String>> {
    let Some(identity) = session.identity().await? else {
        return Ok(Html(views::not_logged_in()));
    };

    let Some(criteria) = form.criteria else {
        return Ok(Html(views::search(&identity, "", None, None)));
    };

    let criteria = criteria.trim();
    if criteria.is_empty() {
        return Ok(Html(views::search(
            &identity,
            "",
            None,
            Some(messages::EMPTY_CRITERIA),
        )));
    }

    let results = books::search(app_state.db.pool(), criteria).await?;
    tracing::debug!(matches = results.len(), "Catalog search for {:?}", criteria);

    Ok(Html(views::search(&identity, criteria, Some(results.as_slice()), None)))
}

/// GET|POST /viewbook/:book_id
pub async fn view_book(
    State(app_state): State<AppState>,
    session: Session,
    Path(book_id): Path<String>,
) -> Result<Response> {
    let Some(identity) = session.identity().await? else {
        return Ok(Html(views::not_logged_in()).into_response());
    };

    match load_book(&app_state, &book_id).await? {
        Some(book) => render_book(&app_state, &identity, &book, None).await,
        None => Ok(book_not_found(&identity, &book_id)),
    }
}

/// POST /add_review/:book_id
pub async fn add_review(
    State(app_state): State<AppState>,
    session: Session,
    Path(book_id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Response> {
    let Some(identity) = session.identity().await? else {
        return Ok(Html(views::not_logged_in()).into_response());
    };

    let Some(book) = load_book(&app_state, &book_id).await? else {
        return Ok(book_not_found(&identity, &book_id));
    };

    let message = submit_review(&app_state, &identity, &book, &form).await?;
    render_book(&app_state, &identity, &book, Some(message.as_str())).await
}

/// Apply the review rules in order and store the review; returns the message to show
async fn submit_review(
    app_state: &AppState,
    identity: &Identity,
    book: &Book,
    form: &ReviewForm,
) -> Result<String> {
    let review = match ReviewText::parse(&form.review) {
        Ok(review) => review,
        Err(e) => return Ok(e.to_string()),
    };

    let rating = match form.rating.parse::<Rating>() {
        Ok(rating) => rating,
        Err(e) => return Ok(e.to_string()),
    };

    let pool = app_state.db.pool();
    if reviews::exists_for(pool, book.id, identity.user_id).await? {
        return Ok(messages::REVIEW_ALREADY_SUBMITTED.to_string());
    }

    let new_review = NewReview {
        book_id: book.id,
        user_id: identity.user_id,
        review,
        rating,
    };

    let message = match reviews::create(pool, new_review).await {
        Ok(review) => {
            tracing::info!(
                review_id = review.id,
                book_id = book.id,
                user_id = identity.user_id,
                "Review saved"
            );
            messages::REVIEW_SAVED
        }
        Err(e) if e.is_duplicate() => messages::REVIEW_ALREADY_SUBMITTED,
        Err(e) => {
            tracing::error!("Failed to save review for book {}: {}", book.id, e);
            messages::TRY_AGAIN_LATER
        }
    };

    Ok(message.to_string())
}

/// Book for a raw path id; ids that are not integers match nothing
async fn load_book(app_state: &AppState, raw_id: &str) -> Result<Option<Book>> {
    let Ok(id) = raw_id.parse::<BookId>() else {
        return Ok(None);
    };
    Ok(books::get_by_id(app_state.db.pool(), id).await?)
}

async fn render_book(
    app_state: &AppState,
    identity: &Identity,
    book: &Book,
    message: Option<&str>,
) -> Result<Response> {
    let pool = app_state.db.pool();
    let book_reviews = reviews::for_book(pool, book.id).await?;
    let already_reviewed = reviews::exists_for(pool, book.id, identity.user_id).await?;
    let ratings = BookRatings::or_default(app_state.ratings.lookup(&book.isbn).await);

    let page = BookPage {
        identity,
        book,
        reviews: &book_reviews,
        ratings,
        already_reviewed,
        message,
    };

    Ok(Html(views::book_detail(&page)).into_response())
}

fn book_not_found(identity: &Identity, raw_id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::book_not_found(identity, raw_id)),
    )
        .into_response()
}
