//! Authentication provider port.

use crate::auth::domain::{AuthError, Credentials, Session};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::watch;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Hosted authentication service contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Opens a session for the given credentials.
    ///
    /// A successful sign-in also publishes the session to subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected.
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Registers a new account. Does not open a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountExists`] when the email is taken.
    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<()>;

    /// Closes the current session, if any, and publishes `None`.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Subscribes to session-change notifications.
    ///
    /// The receiver observes the current session immediately and every
    /// change after that. It ends when the provider is dropped.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}
