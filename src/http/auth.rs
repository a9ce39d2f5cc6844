//! Bearer-token extractor.

use super::error::ApiError;
use super::state::{AppClock, SharedState};
use crate::identity::domain::{AccessToken, User};
use crate::persistence::Store;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

const BEARER_PREFIX: &str = "Bearer ";

/// The account behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S, C> FromRequestParts<SharedState<S, C>> for AuthenticatedUser
where
    S: Store,
    C: AppClock,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState<S, C>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_owned()))?;
        let user = state.auth.authenticate(&token).await?;
        Ok(Self(user))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<AccessToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| AccessToken::from_presented(token))
}
