//! Middleware for the HTTP API.

pub mod auth;
pub mod cors;

pub use auth::{session_auth, token_from_headers, OptionalSessionUser, SessionUser, TOKEN_HEADER};
pub use cors::create_cors_layer;
