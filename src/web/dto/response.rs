//! Response DTOs for the HTTP API.

use serde::Serialize;
use utoipa::ToSchema;

/// Liveness of the backing stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Document store reachable.
    pub db: bool,
    /// Session cache reachable.
    pub cache: bool,
}

/// Record counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Registered users.
    pub users: u64,
    /// File entries.
    pub files: u64,
}

/// Session token issued by `/connect`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Value to send in the `X-Token` header.
    pub token: String,
}
