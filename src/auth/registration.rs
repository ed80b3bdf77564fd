//! User registration for Gazette.

use tracing::info;

use crate::db::{Database, NewUser, User, UserRepository};
use crate::{GazetteError, Result};

/// Maximum display name length in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Register a new user with a freshly generated API key.
///
/// # Errors
///
/// - `Validation` if the name is blank or too long
/// - `Database` if the user cannot be stored
pub async fn register(db: &Database, name: &str) -> Result<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GazetteError::Validation("name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(GazetteError::Validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    let user = UserRepository::new(db.pool())
        .create(&NewUser::new(name))
        .await?;
    info!("User registered: {} ({})", user.name, user.id);
    Ok(user)
}
