//! API key authentication.

use tracing::debug;

use crate::db::{Database, User, UserRepository};
use crate::{GazetteError, Result};

/// Extract the credential from an `Authorization` header value.
///
/// The value must be exactly two parts separated by a single space,
/// `<scheme> <token>`. The scheme word is not checked.
pub fn parse_authorization(header: &str) -> Result<&str> {
    let parts: Vec<&str> = header.split(' ').collect();
    match parts.as_slice() {
        [_scheme, token] if !token.is_empty() => Ok(token),
        _ => Err(GazetteError::Auth(
            "malformed authorization header".to_string(),
        )),
    }
}

/// Resolve the user presenting `header`.
///
/// # Errors
///
/// Returns `GazetteError::Auth` if the header is missing, malformed or
/// carries an unknown key.
pub async fn authenticate(db: &Database, header: Option<&str>) -> Result<User> {
    let header =
        header.ok_or_else(|| GazetteError::Auth("missing authorization header".to_string()))?;
    let api_key = parse_authorization(header)?;

    let user = UserRepository::new(db.pool())
        .require_by_api_key(api_key)
        .await?;
    debug!("Authenticated user {}", user.id);
    Ok(user)
}
