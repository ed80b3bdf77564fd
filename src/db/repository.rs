//! User repository for Gazette.

use chrono::Utc;
use uuid::Uuid;

use super::user::{NewUser, User};
use super::DbPool;
use crate::{GazetteError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, api_key, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, name, api_key, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.api_key)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by API key.
    pub async fn get_by_api_key(&self, api_key: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, api_key, created_at, updated_at FROM users WHERE api_key = ?",
        )
        .bind(api_key)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by API key, failing when none matches.
    pub async fn require_by_api_key(&self, api_key: &str) -> Result<User> {
        self.get_by_api_key(api_key)
            .await?
            .ok_or_else(|| GazetteError::Auth("invalid API key".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_create_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("Bob")).await.unwrap();
        assert_eq!(user.name, "Bob");
        assert_eq!(user.api_key.len(), 64);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_get_by_api_key() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let created = repo
            .create(&NewUser::new("Alice").with_api_key("alice-key"))
            .await
            .unwrap();

        let found = repo.get_by_api_key("alice-key").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.get_by_api_key("other-key").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_require_by_api_key_unknown() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let result = repo.require_by_api_key("nope").await;
        assert!(matches!(result, Err(GazetteError::Auth(_))));
    }

    #[tokio::test]
    async fn test_duplicate_api_key_is_conflict() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("A").with_api_key("same"))
            .await
            .unwrap();
        let result = repo.create(&NewUser::new("B").with_api_key("same")).await;
        assert!(matches!(result, Err(GazetteError::Conflict(_))));
    }
}
