//! Link password hashing and verification.
//!
//! The rest of the crate treats this as an opaque capability: link passwords
//! go in as plaintext, come out as an opaque hash string, and are checked via
//! [`verify_password`]. The hash format is an internal detail.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Hashes a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::internal("Failed to process password", json!({}))
        })
}

/// Verifies a submitted plaintext password against a stored hash.
///
/// An unparseable stored hash counts as a mismatch; it is logged because it
/// indicates corrupt or foreign data in the store, not a user mistake.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is not parseable");
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
