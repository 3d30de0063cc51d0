/// Shared application state
use crate::services::AuthService;
use shelf_ratings::RatingsLookup;
use shelf_storage::Database;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_service: Arc<AuthService>,
    pub ratings: Arc<dyn RatingsLookup>,
    /// Inactivity window applied on every session validation
    pub session_timeout: chrono::Duration,
}

impl AppState {
    pub fn new(
        db: Database,
        auth_service: Arc<AuthService>,
        ratings: Arc<dyn RatingsLookup>,
        session_timeout: chrono::Duration,
    ) -> Self {
        Self {
            db,
            auth_service,
            ratings,
            session_timeout,
        }
    }
}
