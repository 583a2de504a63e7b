//! Router configuration for the HTTP API.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    connect, create_user, disconnect, file_data, get_file, list_files, me, publish_file, stats,
    status, unpublish_file, upload_file, AppState,
};
use super::middleware::{create_cors_layer, session_auth};
use super::openapi::openapi_json;

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let app_routes = Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats));

    let auth_routes = Router::new()
        .route("/connect", get(connect))
        .route("/disconnect", get(disconnect));

    let user_routes = Router::new()
        .route("/users", post(create_user))
        .route("/users/me", get(me));

    let file_routes = Router::new()
        .route("/files", post(upload_file).get(list_files))
        .route("/files/:id", get(get_file))
        .route("/files/:id/publish", put(publish_file))
        .route("/files/:id/unpublish", put(unpublish_file))
        .route("/files/:id/data", get(file_data));

    let auth = app_state.auth.clone();

    Router::new()
        .merge(app_routes)
        .merge(auth_routes)
        .merge(user_routes)
        .merge(file_routes)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let auth = auth.clone();
                    session_auth(auth, req, next)
                })),
        )
        .with_state(app_state)
}
