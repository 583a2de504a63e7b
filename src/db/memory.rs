//! In-memory store implementations.
//!
//! Used for tests and for running without a database file. The cache
//! measures time with `tokio::time::Instant`, so a paused test clock drives
//! expiry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use uuid::Uuid;

use super::traits::{FileStore, SessionCache, UserStore};
use super::user::{NewUser, User};
use crate::file::{FileEntry, NewFileEntry, ParentId};
use crate::{FilesError, Result};

/// User records kept in a vector.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(FilesError::Conflict("Already exist".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.clone(),
            password: new_user.password.clone(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }

    async fn is_alive(&self) -> bool {
        true
    }
}

/// File entries kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    entries: RwLock<Vec<FileEntry>>,
}

impl MemoryFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn insert(&self, new_entry: &NewFileEntry) -> Result<FileEntry> {
        let entry = FileEntry {
            id: Uuid::new_v4(),
            user_id: new_entry.user_id,
            name: new_entry.name.clone(),
            file_type: new_entry.file_type,
            is_public: new_entry.is_public,
            parent_id: new_entry.parent_id,
            local_path: new_entry.local_path.clone(),
        };
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn find_owned(&self, id: Uuid, owner: Uuid) -> Result<Option<FileEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .find(|e| e.id == id && e.user_id == owner)
            .cloned())
    }

    async fn list_children(
        &self,
        owner: Uuid,
        parent: ParentId,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<FileEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| e.user_id == owner && e.parent_id == parent)
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn set_public(&self, id: Uuid, is_public: bool) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.is_public = is_public;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.entries.read().await.len() as u64)
    }
}

/// Key-value cache with per-key deadlines.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for MemoryCache {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let now = Instant::now();
        let deadline = now
            .checked_add(Duration::from_secs(ttl_secs))
            .unwrap_or_else(|| now + Duration::from_secs(u32::MAX as u64));
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().await;
        match entries.remove(key) {
            Some((_, deadline)) => Ok(deadline > Instant::now()),
            None => Ok(false),
        }
    }

    async fn is_alive(&self) -> bool {
        true
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (_, deadline)| *deadline > now);
        Ok((before - entries.len()) as u64)
    }
}
