//! API key authentication extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

use crate::auth::authenticate;
use crate::db::User;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Extractor for authenticated users.
///
/// Reads `Authorization: <scheme> <api key>` and loads the matching user.
/// Any failure rejects the request with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| ApiError::unauthorized("malformed authorization header"))?,
            ),
            None => None,
        };

        let user = authenticate(&state.db, header).await.map_err(|e| {
            tracing::debug!("Authentication failed: {}", e);
            ApiError::from(e)
        })?;

        Ok(AuthUser(user))
    }
}
