//! Authentication collaborator.
//!
//! The catalog only needs to know whether someone is signed in. Session
//! changes are published on a `watch` channel so UI shells can switch
//! between the admin and public views.

use std::collections::HashMap;

use async_trait::async_trait;
use catalog_core::search::Audience;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{event, instrument, Level};

use crate::BackendError;

/// Sign-in credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

/// Authentication provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any.
    async fn current_identity(&self) -> Option<Identity>;

    /// Sign in with email and password.
    async fn sign_in(&self, credentials: Credentials) -> Result<Identity, BackendError>;

    /// End the session. Signing out while signed out is not an error.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Receive session changes.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

/// Which catalog audience the current session maps to.
pub async fn audience_for<A: AuthProvider + ?Sized>(auth: &A) -> Audience {
    Audience::from_authenticated(auth.current_identity().await.is_some())
}

struct Account {
    password: String,
    identity: Identity,
}

/// In-memory accounts and a single session.
pub struct MemoryAuth {
    accounts: HashMap<String, Account>,
    session: watch::Sender<Option<Identity>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: HashMap::new(),
            session,
        }
    }

    /// Register an account. Emails are matched case-insensitively.
    pub fn with_account(mut self, email: &str, password: &str) -> Self {
        let key = email.trim().to_lowercase();
        let identity = Identity {
            user_id: format!("user-{}", self.accounts.len() + 1),
            email: key.clone(),
        };
        self.accounts.insert(
            key,
            Account {
                password: password.to_string(),
                identity,
            },
        );
        self
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn current_identity(&self) -> Option<Identity> {
        self.session.borrow().clone()
    }

    #[instrument(skip(self))]
    async fn sign_in(&self, credentials: Credentials) -> Result<Identity, BackendError> {
        let key = credentials.email.trim().to_lowercase();
        let account = self
            .accounts
            .get(&key)
            .filter(|a| a.password == credentials.password)
            .ok_or_else(|| {
                event!(Level::WARN, email = %key, "sign-in rejected");
                BackendError::InvalidCredentials
            })?;

        self.session.send_replace(Some(account.identity.clone()));
        event!(Level::INFO, user_id = %account.identity.user_id, "signed in");
        Ok(account.identity.clone())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        if self.session.send_replace(None).is_some() {
            event!(Level::INFO, "signed out");
        }
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> MemoryAuth {
        MemoryAuth::new().with_account("Admin@Example.com", "hunter22")
    }

    #[tokio::test]
    async fn test_sign_in_switches_audience() {
        let auth = auth();
        assert_eq!(audience_for(&auth).await, Audience::Public);

        let identity = auth
            .sign_in(Credentials::new("admin@example.com", "hunter22"))
            .await
            .unwrap();
        assert_eq!(identity.email, "admin@example.com");
        assert_eq!(audience_for(&auth).await, Audience::Admin);

        auth.sign_out().await.unwrap();
        assert_eq!(audience_for(&auth).await, Audience::Public);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let auth = auth();
        let err = auth
            .sign_in(Credentials::new("admin@example.com", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidCredentials));
        assert!(auth.current_identity().await.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_session_changes() {
        let auth = auth();
        let mut rx = auth.subscribe();
        assert!(rx.borrow().is_none());

        auth.sign_in(Credentials::new("admin@example.com", "hunter22"))
            .await
            .unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());

        auth.sign_out().await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("a@b.c", "secret"));
        assert!(!debug.contains("secret"));
    }
}
