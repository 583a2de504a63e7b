//! File management module for files-manager.
//!
//! This module provides:
//! - File entry model (folders, files, images) and its SQLite repository
//! - Content storage with UUID naming
//! - The registry enforcing hierarchy, ownership and visibility rules

mod entry;
mod metadata;
mod service;
mod storage;

pub use entry::{FileEntry, FileType, FileView, NewFileEntry, ParentId};
pub use metadata::FileRepository;
pub use service::{parse_page, FileContent, FileRegistry, UploadRequest, PAGE_SIZE};
pub use storage::ContentStore;
