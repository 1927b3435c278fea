//! Auth service errors.

use argon2::password_hash::Error as HashError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("No such user with Username: {0}")]
    NoSuchUser(String),

    #[error("username or secret is incorrect")]
    BadCredentials,

    #[error("session is not bound to this user")]
    SessionMismatch,

    #[error("password hashing error")]
    Hash(#[source] HashError),

    #[error("password hashing task failed")]
    HashTask(#[from] JoinError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            _ => Self::Sql(error),
        }
    }
}

impl From<HashError> for AuthServiceError {
    fn from(error: HashError) -> Self {
        Self::Hash(error)
    }
}
