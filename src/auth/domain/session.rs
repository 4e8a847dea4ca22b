//! Authenticated session value.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Session established by the authentication service for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    email: String,
}

impl Session {
    /// Creates a session for the given user.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the email address the session was opened with.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}
