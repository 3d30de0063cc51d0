/// HTTP middleware
pub mod session;

pub use session::{session_layer, Session, SESSION_COOKIE};
