//! Authentication module for files-manager.
//!
//! This module provides password hashing, Basic credential parsing,
//! user registration and token sessions.

mod basic;
mod password;
mod registration;
mod session;

pub use basic::{parse_basic_auth, BasicCredentials};
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::RegistrationRequest;
pub use session::{session_key, AuthService, DEFAULT_SESSION_TTL_SECS, SESSION_KEY_PREFIX};
