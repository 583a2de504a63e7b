//! User repository for files-manager.
//!
//! SQLite implementation of [`UserStore`].

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::traits::UserStore;
use super::user::{NewUser, User};
use crate::{FilesError, Result};

/// Repository for user records.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new UserRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn insert(&self, new_user: &NewUser) -> Result<User> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, email, password) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(&new_user.email)
            .bind(&new_user.password)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    FilesError::Conflict("Already exist".to_string())
                }
                e => FilesError::Database(e.to_string()),
            })?;

        Ok(User {
            id,
            email: new_user.email.clone(),
            password: new_user.password.clone(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, email, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(user)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(count as u64)
    }

    async fn is_alive(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
