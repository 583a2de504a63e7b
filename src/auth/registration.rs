//! User registration for files-manager.

use tracing::info;

use super::password::hash_password;
use super::session::AuthService;
use crate::db::{NewUser, UserView};
use crate::queue::Job;
use crate::{FilesError, Result};

/// Registration request data, as sent by the client.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    /// Login email.
    pub email: Option<String>,
    /// Clear-text password.
    pub password: Option<String>,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

impl AuthService {
    /// Register a new user and enqueue its welcome job.
    ///
    /// Fails with `Missing email`, `Missing password` or, for a taken
    /// email, `Already exist`.
    pub async fn register(&self, request: RegistrationRequest) -> Result<UserView> {
        let email = request
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| FilesError::Validation("Missing email".to_string()))?;
        let password = request
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| FilesError::Validation("Missing password".to_string()))?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(FilesError::Conflict("Already exist".to_string()));
        }

        let digest = hash_password(&password)?;
        let user = self.users.insert(&NewUser::new(email, digest)).await?;

        info!(user_id = %user.id, "User registered");
        self.dispatcher.enqueue(Job::Welcome { user_id: user.id });

        Ok(user.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryCache, MemoryUserStore, UserStore};
    use crate::queue::{channel, JobReceiver};
    use std::sync::Arc;

    fn setup() -> (AuthService, Arc<MemoryUserStore>, JobReceiver) {
        let users = Arc::new(MemoryUserStore::new());
        let (dispatcher, jobs) = channel(4);
        let service = AuthService::new(users.clone(), Arc::new(MemoryCache::new()), dispatcher);
        (service, users, jobs)
    }

    fn message(err: FilesError) -> String {
        match err {
            FilesError::Validation(msg) | FilesError::Conflict(msg) => msg,
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let (service, users, mut jobs) = setup();

        let view = service
            .register(RegistrationRequest::new("bob@dylan.com", "toto1234!"))
            .await
            .unwrap();
        assert_eq!(view.email, "bob@dylan.com");

        let stored = users.find_by_id(view.id).await.unwrap().unwrap();
        assert_ne!(stored.password, "toto1234!");
        assert!(stored.password.starts_with("$argon2id$"));

        assert_eq!(jobs.try_recv(), Some(Job::Welcome { user_id: view.id }));
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let (service, users, _jobs) = setup();

        service
            .register(RegistrationRequest::new("bob@dylan.com", "toto1234!"))
            .await
            .unwrap();
        let err = service
            .register(RegistrationRequest::new("bob@dylan.com", "other"))
            .await
            .unwrap_err();

        assert!(matches!(err, FilesError::Conflict(_)));
        assert_eq!(message(err), "Already exist");
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let (service, _, _jobs) = setup();

        let err = service
            .register(RegistrationRequest::default())
            .await
            .unwrap_err();
        assert_eq!(message(err), "Missing email");

        let err = service
            .register(RegistrationRequest {
                email: Some("bob@dylan.com".to_string()),
                password: None,
            })
            .await
            .unwrap_err();
        assert_eq!(message(err), "Missing password");

        let err = service
            .register(RegistrationRequest::new("", "pw"))
            .await
            .unwrap_err();
        assert_eq!(message(err), "Missing email");
    }

    #[tokio::test]
    async fn test_register_with_closed_queue() {
        let (service, _, jobs) = setup();
        drop(jobs);

        assert!(service
            .register(RegistrationRequest::new("bob@dylan.com", "toto1234!"))
            .await
            .is_ok());
    }
}
