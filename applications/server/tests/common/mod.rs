//! Common test utilities and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use shelf_core::{BookId, BookRatings, NewBook};
use shelf_ratings::RatingsLookup;
use shelf_server::{create_router, AppState, AuthService};
use shelf_storage::Database;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Ratings source returning a fixed answer without touching the network
pub struct StubRatings(pub Option<BookRatings>);

#[async_trait]
impl RatingsLookup for StubRatings {
    async fn lookup(&self, _isbn: &str) -> Option<BookRatings> {
        self.0
    }
}

/// Router over a fresh temp-file database
pub struct TestApp {
    pub router: Router,
    pub db: Database,
    _temp_dir: TempDir,
}

/// What a test needs from a response
pub struct TestResponse {
    pub status: StatusCode,
    /// `name=value` part of the `Set-Cookie` header, if one was sent
    pub cookie: Option<String>,
    pub body: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None, chrono::Duration::seconds(600)).await
    }

    pub async fn with_ratings(ratings: BookRatings) -> Self {
        Self::build(Some(ratings), chrono::Duration::seconds(600)).await
    }

    pub async fn with_session_timeout(timeout: chrono::Duration) -> Self {
        Self::build(None, timeout).await
    }

    async fn build(ratings: Option<BookRatings>, session_timeout: chrono::Duration) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = Database::connect(&url).await.unwrap();

        let app_state = AppState::new(
            db.clone(),
            // Lowest bcrypt cost keeps the suite fast
            Arc::new(AuthService::new(4)),
            Arc::new(StubRatings(ratings)),
            session_timeout,
        );

        Self {
            router: create_router(app_state),
            db,
            _temp_dir: temp_dir,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let body = form
            .iter()
            .map(|(name, value)| format!("{}={}", name, encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body)).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            cookie,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn add_book(&self, isbn: &str, title: &str, author: &str, year: i32) -> BookId {
        let book = NewBook {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            year,
        };
        shelf_storage::books::create(self.db.pool(), &book).await.unwrap()
    }

    /// Run raw SQL against the app's database, e.g. to install a trigger
    pub async fn execute(&self, sql: &str) {
        sqlx::query(sql).execute(self.db.pool()).await.unwrap();
    }

    /// Create an account through the sign-up page
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/create_account",
            &[
                ("name", name),
                ("email", email),
                ("password", password),
                ("password_check", password),
            ],
            None,
        )
        .await
    }

    /// Log in and return the session cookie to send with later requests
    pub async fn log_in(&self, email: &str, password: &str) -> String {
        let response = self
            .post_form("/login", &[("email", email), ("password", password)], None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.cookie.expect("login should start a session")
    }

    /// Sign up a fresh account and log it in
    pub async fn logged_in_user(&self, name: &str, email: &str) -> String {
        self.sign_up(name, email, fixtures::PASSWORD).await;
        self.log_in(email, fixtures::PASSWORD).await
    }
}

/// Minimal `application/x-www-form-urlencoded` encoding for test input
fn encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'*' => {
                encoded.push(byte as char);
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Test user credentials
pub mod fixtures {
    pub const NAME: &str = "Test Reader";
    pub const EMAIL: &str = "reader@example.com";
    pub const PASSWORD: &str = "TestPassword123!";

    pub const REVIEW: &str = "A thoroughly enjoyable read from start to finish.";
}
