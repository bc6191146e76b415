//! Access token utilities (HS256).
//!
//! Tokens carry only the user id; the caller's role and status are read from
//! storage on every request so a role change takes effect immediately.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Secrets shorter than this are rejected at startup.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Access token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
}

/// An issued token together with its identifier and lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_in: i64,
}

/// Signing and validation settings.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    pub access_token_expiry_secs: i64,
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("keys", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Builds a config from a shared HMAC secret.
    pub fn new(
        secret: &str,
        access_token_expiry_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(JwtError::InvalidKey(format!(
                "secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry_secs,
            leeway_secs,
        })
    }

    /// Issues an access token for the given user.
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_in: self.access_token_expiry_secs,
        })
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

/// Extracts the user id from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

    fn config() -> JwtConfig {
        JwtConfig::new(SECRET, 900, 0).unwrap()
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = JwtConfig::new("too-short", 900, 0);
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_issue_and_validate() {
        let config = config();
        let user_id = Uuid::new_v4();

        let issued = config.issue_access_token(user_id).unwrap();
        let claims = config.validate_token(&issued.token).unwrap();

        assert_eq!(extract_user_id(&claims).unwrap(), user_id);
        assert_eq!(claims.jti, issued.jti);
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(issued.expires_in, 900);
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig::new(SECRET, -120, 0).unwrap();
        let issued = config.issue_access_token(Uuid::new_v4()).unwrap();

        let result = config.validate_token(&issued.token);
        assert!(matches!(result, Err(JwtError::TokenExpired)), "{:?}", result);
    }

    #[test]
    fn test_token_signed_with_other_secret() {
        let other = JwtConfig::new("another-secret-that-is-long-enough-too", 900, 0).unwrap();
        let issued = other.issue_access_token(Uuid::new_v4()).unwrap();

        let result = config().validate_token(&issued.token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token() {
        assert!(config().validate_token("not_a_jwt").is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let debug = format!("{:?}", config());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(SECRET));
    }
}
