//! Web API Status Tests
//!
//! Integration tests for /status, /stats and the OpenAPI document.

mod common;

use common::{create_folder, create_test_app, register, register_and_connect, upload_text};
use serde_json::{json, Value};

#[tokio::test]
async fn test_status() {
    let app = create_test_app();

    let response = app.server.get("/status").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "db": true, "cache": true }));
}

#[tokio::test]
async fn test_stats_empty() {
    let app = create_test_app();

    let response = app.server.get("/stats").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "users": 0, "files": 0 }));
}

#[tokio::test]
async fn test_stats_counts_users_and_entries() {
    let app = create_test_app();
    let token = register_and_connect(&app.server, "bob@dylan.com").await;
    register(&app.server, "joan@baez.com", "secret").await;

    let folder = create_folder(&app.server, &token, "docs", None).await;
    upload_text(&app.server, &token, "a.txt", "aGVsbG8=").await;
    create_folder(&app.server, &token, "nested", Some(&folder)).await;

    let response = app.server.get("/stats").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "users": 2, "files": 3 }));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = create_test_app();

    let response = app.server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let doc: Value = response.json();
    assert!(doc["paths"]["/files/{id}/data"].is_object());
    assert!(doc["paths"]["/connect"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app();

    let response = app.server.get("/nope").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
