//! API handlers for the HTTP surface.

pub mod app;
pub mod auth;
pub mod file;
pub mod user;

pub use app::*;
pub use auth::*;
pub use file::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::AuthService;
use crate::db::Stores;
use crate::file::{ContentStore, FileRegistry};
use crate::queue::Dispatcher;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and sessions.
    pub auth: Arc<AuthService>,
    /// File entry lifecycle.
    pub files: FileRegistry,
    /// Raw stores, for status and stats.
    pub stores: Stores,
}

impl AppState {
    /// Wire the services over `stores`.
    pub fn new(
        stores: Stores,
        content: ContentStore,
        dispatcher: Dispatcher,
        session_ttl_secs: u64,
    ) -> Self {
        let auth = AuthService::new(
            stores.users.clone(),
            stores.cache.clone(),
            dispatcher.clone(),
        )
        .with_session_ttl(session_ttl_secs);
        let files = FileRegistry::new(stores.files.clone(), content, dispatcher);

        Self {
            auth: Arc::new(auth),
            files,
            stores,
        }
    }
}
