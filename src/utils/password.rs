//! Password hashing with Argon2id.
//!
//! Hashes are stored as PHC strings, so the salt and parameters travel with
//! the hash and verification needs nothing else.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::LazyLock;

/// Upper bound on accepted password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password is empty")]
    Empty,
    #[error("password exceeds {0} bytes")]
    TooLong(usize),
    #[error("failed to hash password")]
    Hashing,
    #[error("stored password hash is malformed")]
    InvalidHash,
}

/// Hash of a throwaway password, verified against when no account matches so
/// that unknown emails cost the same time as wrong passwords.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash("wecare-dummy-password").unwrap_or_default());

/// Hashes a password with a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::Empty`] or [`PasswordError::TooLong`] for
/// unacceptable input, [`PasswordError::Hashing`] if Argon2 fails.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    check_length(password)?;

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| PasswordError::Hashing)
}

/// Verifies a password against a stored PHC hash.
///
/// # Errors
///
/// Returns [`PasswordError::InvalidHash`] if the stored hash cannot be parsed.
pub fn verify(password: &str, hashed: &str) -> Result<bool, PasswordError> {
    check_length(password)?;

    let parsed = PasswordHash::new(hashed).map_err(|_| PasswordError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Runs a full verification against [`DUMMY_HASH`] and discards the result.
pub fn burn_verification(password: &str) {
    let _ = verify(password, &DUMMY_HASH);
}

fn check_length(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong(MAX_PASSWORD_LENGTH));
    }
    Ok(())
}
