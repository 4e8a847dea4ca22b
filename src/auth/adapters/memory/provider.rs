//! In-memory authentication provider for tests and local demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

use crate::auth::{
    domain::{AuthError, Credentials, Session, UserId},
    ports::{AuthProvider, AuthResult},
};

/// Thread-safe in-memory account registry with session notifications.
#[derive(Debug, Clone)]
pub struct InMemoryAuthProvider {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    sessions: Arc<watch::Sender<Option<Session>>>,
}

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no accounts and no open session.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            sessions: Arc::new(sender),
        }
    }

    /// Returns the session currently published to subscribers.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.borrow().clone()
    }
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(err: impl ToString) -> AuthError {
    AuthError::provider(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        let accounts = self.accounts.read().map_err(poisoned)?;
        let account = accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::new(account.user_id, credentials.email());
        self.sessions.send_replace(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<()> {
        let mut accounts = self.accounts.write().map_err(poisoned)?;
        if accounts.contains_key(credentials.email()) {
            return Err(AuthError::AccountExists(credentials.email().to_owned()));
        }
        accounts.insert(
            credentials.email().to_owned(),
            Account {
                user_id: UserId::new(),
                password: credentials.password().to_owned(),
            },
        );
        Ok(())
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.sessions.send_replace(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}
