//! Session handlers.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::TokenResponse;
use crate::web::error::ApiError;
use crate::web::middleware::token_from_headers;

/// GET /connect - Exchange Basic credentials for a session token.
#[utoipa::path(
    get,
    path = "/connect",
    tag = "auth",
    responses(
        (status = 200, description = "Session token", body = TokenResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn connect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = state.auth.login(authorization).await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /disconnect - End the current session.
#[utoipa::path(
    get,
    path = "/disconnect",
    tag = "auth",
    responses(
        (status = 204, description = "Session closed"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.auth.logout(token_from_headers(&headers)).await?;
    Ok(StatusCode::NO_CONTENT)
}
