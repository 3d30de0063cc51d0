/// Server services
pub mod auth;
pub mod sessions;

pub use auth::AuthService;
pub use sessions::{validate_session, SessionData, SESSION_DATA_KEY};
