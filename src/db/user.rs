//! User model for files-manager.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: Uuid,
    /// Login email (unique).
    pub email: String,
    /// Password digest (Argon2 PHC string).
    pub password: String,
}

impl User {
    /// The public projection of this user, without the digest.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Password digest (already hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new user with the given email and password digest.
    pub fn new(email: impl Into<String>, password_digest: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password_digest.into(),
        }
    }
}

/// Sanitized user record returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserView {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
}
