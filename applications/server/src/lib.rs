//! Shelf Server Library
//!
//! Library-catalog web application: accounts, catalog search, book pages with
//! reviews, and a public JSON lookup by ISBN.
//!
//! This library exposes the router and its components for the binary and for tests.

pub mod api;
pub mod config;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod services;
pub mod state;
pub mod views;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

/// Build the application router
///
/// HTML pages run behind the session layer; the JSON lookup and the health
/// check are public and never start a session.
pub fn create_router(app_state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(api::auth::index))
        .route("/login", post(api::auth::login))
        .route("/logout", get(api::auth::logout))
        .route(
            "/create_account",
            get(api::auth::create_account_form).post(api::auth::create_account),
        )
        .route(
            "/books",
            get(api::books::search_page).post(api::books::search_submit),
        )
        .route(
            "/viewbook/:book_id",
            get(api::books::view_book).post(api::books::view_book),
        )
        .route("/add_review/:book_id", post(api::books::add_review))
        .route_layer(middleware::session_layer(app_state.session_timeout));

    let public = Router::new()
        .route("/health", get(api::health::health))
        .route("/api/:isbn", get(api::lookup::lookup_isbn));

    Router::new()
        .merge(pages)
        .merge(public)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(app_state)
}
