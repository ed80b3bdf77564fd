//! User model for Gazette.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Credential presented in the `Authorization` header.
    pub api_key: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// New user for registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Credential to store.
    pub api_key: String,
}

impl NewUser {
    /// Create a new user with a freshly generated API key.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_key: generate_api_key(),
        }
    }

    /// Use a specific API key instead of a generated one.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// Generate an API key: hex-encoded SHA-256 of 32 random bytes.
pub fn generate_api_key() -> String {
    let seed: [u8; 32] = rand::rng().random();
    let digest = Sha256::digest(seed);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
