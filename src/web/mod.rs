//! HTTP API for files-manager.
//!
//! Routes, extractors and error mapping over the auth service and the
//! file registry.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::create_router;
pub use server::WebServer;
