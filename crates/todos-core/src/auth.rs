//! Password hashing and verification.
//!
//! Passwords are stored as Argon2id PHC strings and never compared in
//! plaintext. Verification is a one-way check: a wrong password is a normal
//! `Ok(false)`, only a malformed stored hash or a hashing failure is an
//! error.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{Result, TodoError};

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string to store in the `users` table.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TodoError::Crypto(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| TodoError::Crypto(format!("Invalid stored password hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(TodoError::Crypto(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}
