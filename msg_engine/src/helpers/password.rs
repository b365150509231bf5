//! Argon2 password hashing. Hashes are stored as PHC strings, so the parameters travel with the hash.
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
    PasswordHash,
    PasswordVerifier,
};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not hash password: {0}")]
    HashingFailed(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Password does not match")]
    Mismatch,
}

pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
    Argon2::default().verify_password(password.as_bytes(), &parsed).map_err(|_| PasswordError::Mismatch)
}
