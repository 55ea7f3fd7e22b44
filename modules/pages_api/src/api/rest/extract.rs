use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::api::rest::error::ApiError;
use crate::contract::model::User;
use crate::domain::service::Service;

/// Authenticated identity for the current request.
///
/// Extracting this enforces the bearer-token gate: the Authorization header
/// must be present with a non-empty `Bearer` credential, the token must
/// verify, and its subject must resolve to an existing user. Every failure is
/// unauthenticated; ownership checks happen later in the domain service.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Arc<Service>>()
            .cloned()
            .ok_or_else(ApiError::internal)?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthenticated("Authorization header missing"))?
            .to_str()
            .map_err(|_| ApiError::unauthenticated("Invalid auth header"))?;

        let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(ApiError::unauthenticated("Invalid auth header"));
        }

        let user = service.authenticate_token(token).await?;
        Ok(CurrentUser(user))
    }
}
