//! User Models

use std::fmt::{Debug, Formatter, Result as FmtResult};

/// User Model
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,

    /// PHC-encoded password hash.
    pub secret: String,

    pub wallet: i64,
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("wallet", &self.wallet)
            .finish()
    }
}

/// New User Model
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub secret: String,
    pub wallet: i64,
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .field("wallet", &self.wallet)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_hash() {
        let user = User {
            username: "alice".to_string(),
            secret: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            wallet: 100,
        };

        let debug = format!("{user:?}");

        assert!(debug.contains("alice"));
        assert!(!debug.contains("argon2id"));
    }
}
