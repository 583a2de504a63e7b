//! Service status handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::web::dto::{StatsResponse, StatusResponse};
use crate::web::error::ApiError;

/// GET /status - Liveness of the stores.
#[utoipa::path(
    get,
    path = "/status",
    tag = "app",
    responses(
        (status = 200, description = "Store liveness", body = StatusResponse)
    )
)]
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (db, cache) = tokio::join!(
        state.stores.users.is_alive(),
        state.stores.cache.is_alive()
    );
    Json(StatusResponse { db, cache })
}

/// GET /stats - Number of users and file entries.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "app",
    responses(
        (status = 200, description = "Record counts", body = StatsResponse),
        (status = 500, description = "Store unavailable")
    )
)]
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let users = state.stores.users.count().await?;
    let files = state.stores.files.count().await?;
    Ok(Json(StatsResponse { users, files }))
}
