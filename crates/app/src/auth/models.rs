//! Auth data models.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use zeroize::Zeroizing;

/// Username and plaintext secret as submitted by the login form.
///
/// The secret is wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub secret: Zeroizing<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
