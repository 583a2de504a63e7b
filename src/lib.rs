//! files-manager - minimal file storage backend
//!
//! Users register with an email and password, exchange Basic credentials for
//! a session token, and manage a tree of folders, files and images whose
//! content lives on local disk. Image uploads are followed by background
//! thumbnail jobs.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod queue;
pub mod web;

pub use auth::{AuthService, RegistrationRequest};
pub use config::Config;
pub use db::{Database, FileStore, SessionCache, Stores, User, UserStore, UserView};
pub use error::{FilesError, Result};
pub use file::{ContentStore, FileEntry, FileRegistry, FileType, FileView, ParentId};
pub use queue::{Dispatcher, Job, PostUploadHandler, Worker};
pub use web::{AppState, WebServer};
