//! OpenAPI document for the HTTP API.

use axum::Json;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use super::dto::{
    CreateFileRequest, CreateUserRequest, StatsResponse, StatusResponse, TokenResponse,
};
use super::error::ErrorBody;
use super::handlers;
use crate::db::UserView;
use crate::file::{FileType, FileView};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::app::status,
        handlers::app::stats,
        handlers::user::create_user,
        handlers::user::me,
        handlers::auth::connect,
        handlers::auth::disconnect,
        handlers::file::upload_file,
        handlers::file::get_file,
        handlers::file::list_files,
        handlers::file::publish_file,
        handlers::file::unpublish_file,
        handlers::file::file_data,
    ),
    components(schemas(
        CreateUserRequest,
        CreateFileRequest,
        UserView,
        FileView,
        FileType,
        TokenResponse,
        StatusResponse,
        StatsResponse,
        ErrorBody,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "app", description = "Service status"),
        (name = "auth", description = "Session tokens"),
        (name = "users", description = "User accounts"),
        (name = "files", description = "Folders, files and images")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
            );
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Token"))),
            );
        }
    }
}

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
