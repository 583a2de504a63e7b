//! Session token authentication.
//!
//! Clients send the token issued by `/connect` in the `X-Token` header.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthService;
use crate::web::error::ApiError;
use crate::FilesError;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// The session token of a request, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Extractor for authenticated users.
///
/// Rejects the request with 401 unless the token resolves to a live session.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<Arc<AuthService>>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Session auth not configured"))?;

        let user_id = auth
            .resolve_session(token_from_headers(&parts.headers))
            .await?;
        Ok(SessionUser(user_id))
    }
}

/// Optional authentication extractor.
///
/// Similar to SessionUser but yields `None` for a missing, unknown or
/// expired token. Store failures still reject the request.
#[derive(Debug, Clone, Copy)]
pub struct OptionalSessionUser(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = match token_from_headers(&parts.headers) {
            Some(token) => token,
            None => return Ok(OptionalSessionUser(None)),
        };

        let auth = parts
            .extensions
            .get::<Arc<AuthService>>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Session auth not configured"))?;

        match auth.resolve_session(Some(token)).await {
            Ok(user_id) => Ok(OptionalSessionUser(Some(user_id))),
            Err(FilesError::Auth(_)) => Ok(OptionalSessionUser(None)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Middleware function to inject the auth service into request extensions.
pub async fn session_auth(
    auth: Arc<AuthService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(auth);
    next.run(request).await
}
