//! Email and password pair submitted to the authentication service.

use super::AuthError;
use std::fmt;

/// Validated sign-in or sign-up credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials after required-field checks.
    ///
    /// The email is trimmed; the password is kept verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingEmail`] when the email is blank or
    /// [`AuthError::MissingPassword`] when the password is empty.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, AuthError> {
        let raw_email = email.into();
        let trimmed = raw_email.trim();
        if trimmed.is_empty() {
            return Err(AuthError::MissingEmail);
        }

        let secret = password.into();
        if secret.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        Ok(Self {
            email: trimmed.to_owned(),
            password: secret,
        })
    }

    /// Returns the trimmed email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
