//! File registry for files-manager.
//!
//! Enforces the entry lifecycle rules:
//! - validation order on create (name, type, data, parent)
//! - owner-scoped lookups that answer "Not found" for foreign entries
//! - visibility checks and size variants on content reads

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::{debug, info};
use uuid::Uuid;

use super::entry::{FileEntry, FileType, FileView, NewFileEntry, ParentId};
use super::storage::ContentStore;
use crate::db::FileStore;
use crate::queue::{Dispatcher, Job, THUMBNAIL_WIDTHS};
use crate::{FilesError, Result};

/// Entries returned per listing page.
pub const PAGE_SIZE: u64 = 20;

/// Request data for creating an entry.
///
/// Fields are kept as the client sent them; [`FileRegistry::create`]
/// validates them.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Display name.
    pub name: Option<String>,
    /// One of `folder`, `file`, `image`.
    pub file_type: Option<String>,
    /// Initial visibility.
    pub is_public: bool,
    /// Parent folder ID; absent, `""` or `"0"` for the root.
    pub parent_id: Option<String>,
    /// Base64 content; required unless the entry is a folder.
    pub data: Option<String>,
}

impl UploadRequest {
    /// Create a request for an entry at the root.
    pub fn new(name: impl Into<String>, file_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            file_type: Some(file_type.into()),
            ..Self::default()
        }
    }

    /// Set the base64 payload.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the initial visibility.
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Bytes of an entry together with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// MIME type guessed from the entry name.
    pub content_type: String,
}

/// Parse a listing page number. Non-numeric or negative input is page 0.
pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .and_then(|p| u64::try_from(p).ok())
        .unwrap_or(0)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| FilesError::not_found())
}

fn validation(msg: &str) -> FilesError {
    FilesError::Validation(msg.to_string())
}

/// File registry service.
#[derive(Clone)]
pub struct FileRegistry {
    files: Arc<dyn FileStore>,
    content: ContentStore,
    dispatcher: Dispatcher,
}

impl FileRegistry {
    /// Create a new FileRegistry.
    pub fn new(files: Arc<dyn FileStore>, content: ContentStore, dispatcher: Dispatcher) -> Self {
        Self {
            files,
            content,
            dispatcher,
        }
    }

    /// Create a folder, file or image entry owned by `owner`.
    ///
    /// Nothing is written until every check has passed. Images get a
    /// thumbnail job once stored.
    pub async fn create(&self, owner: Uuid, request: UploadRequest) -> Result<FileView> {
        let name = request
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| validation("Missing name"))?;

        let file_type: FileType = request
            .file_type
            .as_deref()
            .ok_or_else(|| validation("Missing type"))?
            .parse()?;

        let content = if file_type.has_content() {
            Some(decode_data(request.data.as_deref())?)
        } else {
            None
        };

        let parent_id = self.resolve_parent(owner, request.parent_id.as_deref()).await?;

        let local_path = match content {
            Some(bytes) => Some(self.content.write(&bytes).await?),
            None => None,
        };

        let entry = self
            .files
            .insert(&NewFileEntry {
                user_id: owner,
                name,
                file_type,
                is_public: request.is_public,
                parent_id,
                local_path,
            })
            .await?;

        info!(user_id = %owner, file_id = %entry.id, file_type = %file_type, "File entry created");

        if file_type == FileType::Image {
            self.dispatcher.enqueue(Job::Thumbnail {
                user_id: owner,
                file_id: entry.id,
            });
        }

        Ok(entry.view())
    }

    /// Get an entry owned by `owner`.
    pub async fn get(&self, owner: Uuid, file_id: &str) -> Result<FileView> {
        self.find_owned(owner, file_id).await.map(|e| e.view())
    }

    /// List `owner`'s entries under `parent`, [`PAGE_SIZE`] per page.
    pub async fn list(&self, owner: Uuid, parent: ParentId, page: u64) -> Result<Vec<FileView>> {
        let skip = page.saturating_mul(PAGE_SIZE);
        let entries = self
            .files
            .list_children(owner, parent, skip, PAGE_SIZE)
            .await?;

        debug!(user_id = %owner, page, count = entries.len(), "Listed entries");
        Ok(entries.iter().map(FileEntry::view).collect())
    }

    /// Make an entry public.
    pub async fn publish(&self, owner: Uuid, file_id: &str) -> Result<FileView> {
        self.set_visibility(owner, file_id, true).await
    }

    /// Make an entry private.
    pub async fn unpublish(&self, owner: Uuid, file_id: &str) -> Result<FileView> {
        self.set_visibility(owner, file_id, false).await
    }

    /// Set the visibility of an entry owned by `owner`.
    pub async fn set_visibility(
        &self,
        owner: Uuid,
        file_id: &str,
        is_public: bool,
    ) -> Result<FileView> {
        let mut entry = self.find_owned(owner, file_id).await?;

        if !self.files.set_public(entry.id, is_public).await? {
            return Err(FilesError::not_found());
        }
        entry.is_public = is_public;

        info!(user_id = %owner, file_id = %entry.id, is_public, "Visibility updated");
        Ok(entry.view())
    }

    /// Read the content of an entry.
    ///
    /// Private entries are only visible to their owner. `size` selects an
    /// image rendition (100, 250 or 500) and is ignored for other types.
    pub async fn read_content(
        &self,
        requester: Option<Uuid>,
        file_id: &str,
        size: Option<&str>,
    ) -> Result<FileContent> {
        let id = parse_id(file_id)?;
        let entry = self
            .files
            .find_by_id(id)
            .await?
            .ok_or_else(FilesError::not_found)?;

        if !entry.is_public && requester != Some(entry.user_id) {
            return Err(FilesError::not_found());
        }

        if entry.file_type == FileType::Folder {
            return Err(FilesError::NotFound(
                "A folder doesn't have content".to_string(),
            ));
        }

        let base = entry.local_path.as_deref().ok_or_else(FilesError::not_found)?;
        let location = match size.filter(|s| !s.is_empty()) {
            Some(size) if entry.file_type == FileType::Image => {
                let width = size
                    .parse::<u32>()
                    .ok()
                    .filter(|w| THUMBNAIL_WIDTHS.contains(w))
                    .ok_or_else(FilesError::not_found)?;
                ContentStore::variant_location(base, width)
            }
            _ => base.to_string(),
        };

        if !self.content.exists(&location).await? {
            return Err(FilesError::not_found());
        }
        let bytes = self.content.read(&location).await?;

        let content_type = mime_guess::from_path(&entry.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(FileContent {
            bytes,
            content_type,
        })
    }

    async fn find_owned(&self, owner: Uuid, file_id: &str) -> Result<FileEntry> {
        let id = parse_id(file_id)?;
        self.files
            .find_owned(id, owner)
            .await?
            .ok_or_else(FilesError::not_found)
    }

    async fn resolve_parent(&self, owner: Uuid, raw: Option<&str>) -> Result<ParentId> {
        let parent = match raw {
            None => return Ok(ParentId::Root),
            Some(raw) => ParentId::parse(raw).ok_or_else(|| validation("Parent not found"))?,
        };

        if let ParentId::Folder(id) = parent {
            let folder = self
                .files
                .find_owned(id, owner)
                .await?
                .ok_or_else(|| validation("Parent not found"))?;
            if folder.file_type != FileType::Folder {
                return Err(validation("Parent is not a folder"));
            }
        }

        Ok(parent)
    }
}

fn decode_data(data: Option<&str>) -> Result<Vec<u8>> {
    let data = data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| validation("Missing data"))?;
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|_| validation("Invalid data"))?;
    if bytes.is_empty() {
        return Err(validation("Missing data"));
    }
    Ok(bytes)
}
