//! Content storage for files-manager.
//!
//! Raw bytes live in a flat directory under freshly generated UUID names:
//! ```text
//! {root}/
//! ├── 0b5c1f0e-5a0e-4b8e-9d3c-3f1f4bb0d7a1
//! ├── 0b5c1f0e-5a0e-4b8e-9d3c-3f1f4bb0d7a1_500   (image rendition)
//! └── ...
//! ```
//! The location reference handed back by [`ContentStore::write`] is the full
//! path of the written file.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::error;
use uuid::Uuid;

use crate::{FilesError, Result};

/// Disk-backed byte storage.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a ContentStore rooted at `root`.
    ///
    /// The directory is not touched until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `content` under a new random name and return its location.
    pub async fn write(&self, content: &[u8]) -> Result<String> {
        let path = self.root.join(Uuid::new_v4().to_string());
        let location = path.to_string_lossy().into_owned();
        self.write_at(&location, content).await?;
        Ok(location)
    }

    /// Create or replace the content at `location`.
    ///
    /// Used for image renditions, whose location derives from the original.
    pub async fn write_at(&self, location: &str, content: &[u8]) -> Result<()> {
        self.ensure_root().await?;
        fs::write(location, content).await?;
        Ok(())
    }

    /// Read the content at `location`.
    pub async fn read(&self, location: &str) -> Result<Vec<u8>> {
        match fs::read(location).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FilesError::not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether content exists at `location`.
    ///
    /// A missing file is `Ok(false)`; any other I/O fault is an error.
    pub async fn exists(&self, location: &str) -> Result<bool> {
        Ok(fs::try_exists(location).await?)
    }

    /// Location of the `size` rendition of the content at `location`.
    pub fn variant_location(location: &str, size: u32) -> String {
        format!("{location}_{size}")
    }

    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            error!(root = %self.root.display(), "failed to create storage root: {}", e);
            FilesError::Storage("Unable to locate folder".to_string())
        })
    }
}
