//! Auth data models.

use serde::{Deserialize, Serialize};

/// Email and password, as sent to the auth API.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,

    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Pair an email with a password.
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
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthToken {
    /// Session token.
    pub token: String,

    /// User id, returned by registration only.
    #[serde(default)]
    pub id: Option<u64>,
}
