//! User handlers.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::db::UserView;
use crate::web::dto::{ApiJson, CreateUserRequest};
use crate::web::error::ApiError;
use crate::web::middleware::token_from_headers;

/// POST /users - Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Missing email, missing password or already exist")
    )
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    let user = state.auth.register(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/me - The user owning the session token.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user", body = UserView),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserView>, ApiError> {
    let user = state.auth.current_user(token_from_headers(&headers)).await?;
    Ok(Json(user))
}
