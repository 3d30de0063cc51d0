//! Per-client session state and the inactivity-timeout validator
//!
//! A session is created empty on a client's first request, populated on
//! login, and cleared on logout or when the validator finds it expired. The
//! session is the only source of truth for who is logged in.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shelf_core::{Identity, UserId};

/// Key the payload is stored under in the client's session record
pub const SESSION_DATA_KEY: &str = "shelf.session";

/// State stored for one client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Option<UserId>,
    pub user_name: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionData {
    /// Populate the session after a successful login
    pub fn log_in(&mut self, identity: &Identity, now: DateTime<Utc>, window: Duration) {
        self.user_id = Some(identity.user_id);
        self.user_name = Some(identity.name.clone());
        self.expires_at = Some(now + window);
    }

    /// Drop identity, id and expiry
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.user_name.is_none() && self.expires_at.is_none()
    }
}

/// Derive the logged-in identity from a session.
///
/// Checks, in order:
/// 1. no session: not logged in
/// 2. no stored display name: not logged in, stored id cleared
/// 3. no stored expiry: not logged in, identity cleared
/// 4. `now` past the expiry: not logged in, identity cleared
/// 5. otherwise the expiry slides to `now + window` and the identity is returned
pub fn validate_session(
    session: Option<&mut SessionData>,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<Identity> {
    let session = session?;

    if session.user_name.is_none() {
        session.user_id = None;
        return None;
    }

    let Some(expires_at) = session.expires_at else {
        session.clear();
        return None;
    };

    if now > expires_at {
        tracing::debug!(expired_at = %expires_at, "Session expired");
        session.clear();
        return None;
    }

    let (Some(user_id), Some(name)) = (session.user_id, session.user_name.clone()) else {
        session.clear();
        return None;
    };

    session.expires_at = Some(now + window);
    Some(Identity { user_id, name })
}
