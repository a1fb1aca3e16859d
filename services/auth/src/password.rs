//! Password hashing and verification
//!
//! Wraps the argon2 primitive. Hashes are salted PHC strings, so two
//! hashes of the same password never match each other; verification is
//! delegated entirely to the vetted implementation.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a password with a fresh random salt
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Check a candidate password against a stored digest
pub fn verify(stored_hash: &str, candidate: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(candidate.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}
