//! SQLite-backed key-value cache used for session tokens.
//!
//! Each row carries an absolute expiry in epoch milliseconds. Expired rows
//! are invisible to reads and are removed by [`SessionCache::purge_expired`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::traits::SessionCache;
use crate::{FilesError, Result};

/// Repository for the `cache` table.
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new SessionRepository over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[async_trait]
impl SessionCache for SessionRepository {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let ttl_millis = i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX);
        let expires_at = now_millis().saturating_add(ttl_millis);

        sqlx::query(
            "INSERT INTO cache (key, value, expires_at) VALUES ($1, $2, $3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, expires_at = excluded.expires_at",
        )
        .bind(key)
        .bind(value)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM cache WHERE key = $1 AND expires_at > $2")
                .bind(key)
                .bind(now_millis())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(value)
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cache WHERE key = $1 AND expires_at > $2")
            .bind(key)
            .bind(now_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_alive(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cache WHERE expires_at <= $1")
            .bind(now_millis())
            .execute(&self.pool)
            .await
            .map_err(|e| FilesError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
