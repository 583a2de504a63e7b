//! Token sessions for files-manager.
//!
//! A successful login stores `auth_<token> -> user id` in the session cache
//! with a fixed time-to-live. Lookups never extend it.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::basic::parse_basic_auth;
use super::password::verify_password;
use crate::db::{SessionCache, UserStore, UserView};
use crate::queue::Dispatcher;
use crate::{FilesError, Result};

/// Default session duration (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Prefix of session keys in the cache.
pub const SESSION_KEY_PREFIX: &str = "auth_";

/// Cache key for a session token.
pub fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

/// Authentication service: registration, login, logout and session lookup.
#[derive(Clone)]
pub struct AuthService {
    pub(super) users: Arc<dyn UserStore>,
    cache: Arc<dyn SessionCache>,
    pub(super) dispatcher: Dispatcher,
    session_ttl_secs: u64,
}

impl AuthService {
    /// Create a new AuthService with the default session lifetime.
    pub fn new(
        users: Arc<dyn UserStore>,
        cache: Arc<dyn SessionCache>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            users,
            cache,
            dispatcher,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    /// Set the session lifetime.
    pub fn with_session_ttl(mut self, ttl_secs: u64) -> Self {
        self.session_ttl_secs = ttl_secs;
        self
    }

    /// The session lifetime in seconds.
    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl_secs
    }

    /// Exchange a Basic authorization header for a session token.
    ///
    /// Every failure is reported as the same `Unauthorized` error.
    pub async fn login(&self, authorization: Option<&str>) -> Result<String> {
        let creds = authorization
            .and_then(parse_basic_auth)
            .ok_or_else(FilesError::unauthorized)?;

        let user = match self.users.find_by_email(&creds.email).await? {
            Some(user) => user,
            None => {
                debug!("login for unknown email");
                return Err(FilesError::unauthorized());
            }
        };

        if verify_password(&creds.password, &user.password).is_err() {
            warn!(user_id = %user.id, "login with wrong password");
            return Err(FilesError::unauthorized());
        }

        let token = Uuid::new_v4().to_string();
        self.cache
            .set(&session_key(&token), &user.id.to_string(), self.session_ttl_secs)
            .await?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// End the session identified by `token`.
    ///
    /// A token that is unknown, expired or already logged out is
    /// `Unauthorized`.
    pub async fn logout(&self, token: Option<&str>) -> Result<()> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(FilesError::unauthorized)?;

        if !self.cache.del(&session_key(token)).await? {
            return Err(FilesError::unauthorized());
        }

        debug!("Session closed");
        Ok(())
    }

    /// Resolve a session token to its user ID.
    pub async fn resolve_session(&self, token: Option<&str>) -> Result<Uuid> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(FilesError::unauthorized)?;

        let value = self
            .cache
            .get(&session_key(token))
            .await?
            .ok_or_else(FilesError::unauthorized)?;

        Uuid::parse_str(&value).map_err(|_| FilesError::unauthorized())
    }

    /// The sanitized record of the user owning `token`.
    pub async fn current_user(&self, token: Option<&str>) -> Result<UserView> {
        let user_id = self.resolve_session(token).await?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(FilesError::unauthorized)?;

        Ok(user.view())
    }
}
