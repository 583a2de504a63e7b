//! Store traits for files-manager.
//!
//! The services never talk to a database directly: they hold `Arc<dyn …>`
//! handles to these traits, which are implemented both over SQLite and in
//! process memory.

use async_trait::async_trait;
use uuid::Uuid;

use super::user::{NewUser, User};
use crate::file::{FileEntry, NewFileEntry, ParentId};
use crate::Result;

/// Persistent user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with `Conflict("Already exist")` if the email is taken.
    async fn insert(&self, new_user: &NewUser) -> Result<User>;

    /// Find a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Number of registered users.
    async fn count(&self) -> Result<u64>;

    /// Liveness probe.
    async fn is_alive(&self) -> bool;
}

/// Persistent file entry records.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Insert a new entry and return it with its assigned ID.
    async fn insert(&self, new_entry: &NewFileEntry) -> Result<FileEntry>;

    /// Find an entry by ID regardless of owner.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileEntry>>;

    /// Find an entry by ID only if it belongs to `owner`.
    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<FileEntry>>;

    /// Entries of `owner` directly under `parent`, in insertion order,
    /// skipping `skip` and returning at most `limit`.
    async fn list_children(
        &self,
        owner: Uuid,
        parent: ParentId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>>;

    /// Set the visibility flag. Returns false if the entry does not exist.
    async fn set_public(&self, id: Uuid, is_public: bool) -> Result<bool>;

    /// Total number of entries.
    async fn count(&self) -> Result<u64>;
}

/// Key-value cache with per-key time-to-live.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Store `value` under `key` for `ttl_secs` seconds, replacing any
    /// previous value.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Get the live value for `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Delete `key`. Returns false if no live value was stored.
    async fn del(&self, key: &str) -> Result<bool>;

    /// Liveness probe.
    async fn is_alive(&self) -> bool;

    /// Drop expired keys and return how many were removed.
    async fn purge_expired(&self) -> Result<u64>;
}
