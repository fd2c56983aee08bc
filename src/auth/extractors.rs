use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{auth::repo_types::User, error::ApiError, state::AppState};

/// Scheme is matched case-insensitively; the token itself must be non-empty.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Validates the bearer token and resolves it to a stored user.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                warn!("missing Authorization header");
                ApiError::Unauthenticated
            })?;

        let token = bearer_token(auth).ok_or_else(|| {
            warn!("invalid auth scheme");
            ApiError::Unauthenticated
        })?;

        let claims = state.jwt.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::Unauthenticated
        })?;

        let user = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| {
                warn!(sub = %claims.sub, "token subject has no user");
                ApiError::Unauthenticated
            })?;

        Ok(CurrentUser(user))
    }
}
