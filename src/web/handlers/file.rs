//! File entry handlers.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::file::{parse_page, FileView, ParentId};
use crate::web::dto::{ApiJson, CreateFileRequest, FileDataQuery, ListFilesQuery};
use crate::web::error::ApiError;
use crate::web::middleware::{OptionalSessionUser, SessionUser};

/// POST /files - Create a folder, file or image.
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    request_body = CreateFileRequest,
    responses(
        (status = 201, description = "Entry created", body = FileView),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Storage unavailable")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    ApiJson(req): ApiJson<CreateFileRequest>,
) -> Result<(StatusCode, Json<FileView>), ApiError> {
    let view = state.files.create(user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /files/:id - Get one of the caller's entries.
#[utoipa::path(
    get,
    path = "/files/{id}",
    tag = "files",
    params(
        ("id" = String, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry", body = FileView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    Path(file_id): Path<String>,
) -> Result<Json<FileView>, ApiError> {
    Ok(Json(state.files.get(user_id, &file_id).await?))
}

/// GET /files - List the caller's entries under a parent, 20 per page.
#[utoipa::path(
    get,
    path = "/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "Entries", body = Vec<FileView>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileView>>, ApiError> {
    let parent = ParentId::parse_lenient(query.parent_id.as_deref());
    let page = parse_page(query.page.as_deref());

    Ok(Json(state.files.list(user_id, parent, page).await?))
}

/// PUT /files/:id/publish - Make an entry public.
#[utoipa::path(
    put,
    path = "/files/{id}/publish",
    tag = "files",
    params(
        ("id" = String, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Updated entry", body = FileView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    Path(file_id): Path<String>,
) -> Result<Json<FileView>, ApiError> {
    Ok(Json(state.files.publish(user_id, &file_id).await?))
}

/// PUT /files/:id/unpublish - Make an entry private.
#[utoipa::path(
    put,
    path = "/files/{id}/unpublish",
    tag = "files",
    params(
        ("id" = String, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Updated entry", body = FileView),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(
        ("token_auth" = [])
    )
)]
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    SessionUser(user_id): SessionUser,
    Path(file_id): Path<String>,
) -> Result<Json<FileView>, ApiError> {
    Ok(Json(state.files.unpublish(user_id, &file_id).await?))
}

/// GET /files/:id/data - Raw content of an entry.
///
/// Public entries need no token.
#[utoipa::path(
    get,
    path = "/files/{id}/data",
    tag = "files",
    params(
        ("id" = String, Path, description = "Entry ID"),
        FileDataQuery
    ),
    responses(
        (status = 200, description = "Raw bytes with a content type guessed from the name"),
        (status = 404, description = "Not found")
    )
)]
pub async fn file_data(
    State(state): State<Arc<AppState>>,
    OptionalSessionUser(user_id): OptionalSessionUser,
    Path(file_id): Path<String>,
    Query(query): Query<FileDataQuery>,
) -> Result<Response, ApiError> {
    let content = state
        .files
        .read_content(user_id, &file_id, query.size.as_deref())
        .await?;

    Ok(([(header::CONTENT_TYPE, content.content_type)], content.bytes).into_response())
}
