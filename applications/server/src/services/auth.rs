/// Authentication service - password hashing and verification
use crate::error::{Result, ServerError};

#[derive(Debug, Clone)]
pub struct AuthService {
    cost: u32,
}

impl AuthService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Verify a login attempt, treating an unreadable stored hash as a mismatch
    pub fn credentials_match(&self, password: &str, hash: &str) -> bool {
        self.verify_password(password, hash).unwrap_or_else(|e| {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        })
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
