//! Test helpers for Web API integration tests.
//!
//! Builds the full router over in-memory stores and a temporary storage
//! root, and wraps the register/connect/upload round trips.

#![allow(dead_code)]

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderName;
use axum_test::{TestResponse, TestServer};
use base64::{engine::general_purpose::STANDARD, Engine};
use files_manager::db::Stores;
use files_manager::file::ContentStore;
use files_manager::queue::{self, JobReceiver};
use files_manager::web::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Header carrying the session token.
pub const X_TOKEN: HeaderName = HeaderName::from_static("x-token");

/// A router under test plus the resources it depends on.
pub struct TestApp {
    pub server: TestServer,
    pub stores: Stores,
    pub jobs: JobReceiver,
    pub storage: TempDir,
}

/// Create a test server with in-memory stores.
pub fn create_test_app() -> TestApp {
    create_test_app_with_stores(Stores::in_memory())
}

/// Create a test server over the given stores.
pub fn create_test_app_with_stores(stores: Stores) -> TestApp {
    let storage = TempDir::new().expect("Failed to create storage dir");
    let (dispatcher, jobs) = queue::channel(64);

    let app_state = Arc::new(AppState::new(
        stores.clone(),
        ContentStore::new(storage.path()),
        dispatcher,
        24 * 60 * 60,
    ));

    let router = create_router(app_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        stores,
        jobs,
        storage,
    }
}

/// `Basic <base64(email:password)>`
pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{password}")))
}

/// Register a user and return the response body.
pub async fn register(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log a user in and return the session token.
pub async fn connect(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .get("/connect")
        .add_header(AUTHORIZATION, basic_auth(email, password))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"]
        .as_str()
        .expect("token missing")
        .to_string()
}

/// Register and log in, returning the session token.
pub async fn register_and_connect(server: &TestServer, email: &str) -> String {
    register(server, email, "secret").await;
    connect(server, email, "secret").await
}

/// POST /files with the given body.
pub async fn post_file(server: &TestServer, token: &str, body: Value) -> TestResponse {
    server
        .post("/files")
        .add_header(X_TOKEN, token.to_string())
        .json(&body)
        .await
}

/// Upload a `file` entry at the root and return its ID.
pub async fn upload_text(server: &TestServer, token: &str, name: &str, data: &str) -> String {
    let response = post_file(
        server,
        token,
        json!({ "name": name, "type": "file", "data": data }),
    )
    .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .expect("id missing")
        .to_string()
}

/// Create a folder and return its ID.
pub async fn create_folder(
    server: &TestServer,
    token: &str,
    name: &str,
    parent_id: Option<&str>,
) -> String {
    let mut body = json!({ "name": name, "type": "folder" });
    if let Some(parent_id) = parent_id {
        body["parentId"] = json!(parent_id);
    }

    let response = post_file(server, token, body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .expect("id missing")
        .to_string()
}
