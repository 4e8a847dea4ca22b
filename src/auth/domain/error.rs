//! Error types for sign-in, sign-up and sign-out.

use std::sync::Arc;
use thiserror::Error;

/// Errors returned by credential validation and authentication providers.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email address is empty after trimming.
    #[error("email address is required")]
    MissingEmail,

    /// The password is empty.
    #[error("password is required")]
    MissingPassword,

    /// The email and password pair was rejected.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account is already registered for the email address.
    #[error("an account already exists for {0}")]
    AccountExists(String),

    /// Authentication service failure.
    #[error("authentication provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a failure reported by the authentication service.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
