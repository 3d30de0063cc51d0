/// Session layer and extractor
use crate::{
    error::ServerError,
    services::sessions::{validate_session, SessionData, SESSION_DATA_KEY},
    state::AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use shelf_core::Identity;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "shelf_session";

/// Session manager for the HTML pages, backed by an in-process store
///
/// Records idle for longer than `window` expire in the store, so a client that
/// stops sending requests loses its session without a sweep.
pub fn session_layer(window: Duration) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE)
        .with_path("/")
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(
            window.num_seconds(),
        )))
}

/// Handle to the current client's session
///
/// Wraps the record managed by [`session_layer`] and keeps the typed
/// [`SessionData`] payload in it.
#[derive(Debug, Clone)]
pub struct Session {
    inner: tower_sessions::Session,
    window: Duration,
}

impl Session {
    pub fn new(inner: tower_sessions::Session, window: Duration) -> Self {
        Self { inner, window }
    }

    /// Validate the session and return the logged-in identity, if any
    ///
    /// The payload is written back on every call, which starts the session on
    /// first contact and persists a slid or cleared expiry.
    pub async fn identity(&self) -> Result<Option<Identity>, ServerError> {
        let mut data = self.data().await?;
        let identity = validate_session(data.as_mut(), Utc::now(), self.window);
        self.inner
            .insert(SESSION_DATA_KEY, data.unwrap_or_default())
            .await?;
        Ok(identity)
    }

    /// Store the identity under a freshly issued session id
    pub async fn log_in(&self, identity: &Identity) -> Result<(), ServerError> {
        self.inner.cycle_id().await?;

        let mut data = SessionData::default();
        data.log_in(identity, Utc::now(), self.window);
        self.inner.insert(SESSION_DATA_KEY, data).await?;
        Ok(())
    }

    /// Drop the identity but keep the session
    pub async fn clear(&self) -> Result<(), ServerError> {
        self.inner
            .insert(SESSION_DATA_KEY, SessionData::default())
            .await?;
        Ok(())
    }

    /// Delete the session record and expire the cookie
    pub async fn destroy(&self) -> Result<(), ServerError> {
        self.inner.flush().await?;
        Ok(())
    }

    pub async fn data(&self) -> Result<Option<SessionData>, ServerError> {
        Ok(self.inner.get::<SessionData>(SESSION_DATA_KEY).await?)
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let inner = tower_sessions::Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| ServerError::Internal(msg.to_string()))?;
        Ok(Self::new(inner, state.session_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn session(window: Duration) -> Session {
        let store = Arc::new(MemoryStore::default());
        Session::new(tower_sessions::Session::new(None, store, None), window)
    }

    fn grace() -> Identity {
        Identity {
            user_id: 7,
            name: "Grace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_identity_check_starts_empty_session() {
        let session = session(Duration::seconds(600));

        assert!(session.identity().await.unwrap().is_none());
        assert_eq!(session.data().await.unwrap(), Some(SessionData::default()));
    }

    #[tokio::test]
    async fn test_login_then_clear() {
        let session = session(Duration::seconds(600));

        session.log_in(&grace()).await.unwrap();
        assert_eq!(
            session.identity().await.unwrap().map(|i| i.user_id),
            Some(7)
        );

        session.clear().await.unwrap();
        assert!(session.identity().await.unwrap().is_none());
        assert!(session.data().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_payload_is_cleared_in_place() {
        let session = session(Duration::seconds(-1));

        session.log_in(&grace()).await.unwrap();
        assert!(session.identity().await.unwrap().is_none());
        assert!(session.data().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_drops_payload() {
        let session = session(Duration::seconds(600));

        session.log_in(&grace()).await.unwrap();
        session.destroy().await.unwrap();
        assert_eq!(session.data().await.unwrap(), None);
    }
}
