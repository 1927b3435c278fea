//! Password hashing.
//!
//! Secrets are stored as PHC strings produced by Argon2id with a random salt.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{Error as HashError, SaltString, rand_core::OsRng},
};

/// Hash a plaintext secret into a PHC string.
///
/// # Errors
///
/// Returns an error if Argon2 rejects its parameters or the input.
pub fn hash_secret(secret: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(secret.as_bytes(), &salt)?
        .to_string())
}

/// Check a plaintext secret against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only malformed hashes are errors.
///
/// # Errors
///
/// Returns an error if `hash` is not a valid PHC string.
pub fn verify_secret(secret: &str, hash: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(error) => Err(error),
    }
}
