//! Credential hashing with Argon2id.
//!
//! Hashes are stored in PHC string format, so the parameters travel with the
//! hash and verification works across parameter changes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length, in characters.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Error type for credential operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Password must be between {min} and {max} characters")]
    PolicyViolation { min: usize, max: usize },
}

// 19 MiB, 2 passes, single lane.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Invalid Argon2 params: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Checks a plaintext password against the length policy.
pub fn check_password_policy(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
        Ok(())
    } else {
        Err(PasswordError::PolicyViolation {
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
        })
    }
}

/// Hashes a password and returns the PHC-formatted string.
///
/// ```
/// use shared::password::hash_password;
///
/// let hash = hash_password("correct horse battery").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_uses_argon2id_parameters() {
        let hash = hash_password("member123!").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same secret").unwrap();
        let second = hash_password("same secret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("alumni-pass-2019").unwrap();
        assert!(verify_password("alumni-pass-2019", &hash).unwrap());
        assert!(!verify_password("alumni-pass-2020", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let result = verify_password("whatever", "sha256:abcdef");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_password_policy() {
        assert!(check_password_policy("12345678").is_ok());
        assert!(check_password_policy("short").is_err());
        assert!(check_password_policy(&"x".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        // counts characters, not bytes
        assert!(check_password_policy("пароль12").is_ok());
    }
}
