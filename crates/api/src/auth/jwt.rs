//! Session token generation, validation and hashing.
//!
//! Session tokens are HS512-signed JWTs carrying a [`Claims`] payload. The
//! signed string goes to the client; only its SHA-256 hash is stored in
//! `session_tokens`, so a database leak does not expose usable tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use spooky_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal id.
    pub sub: DbId,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Unique token id; keeps token strings distinct within one second.
    pub jti: String,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA512 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifespan in minutes (default: 60).
    pub token_lifespan_mins: i64,
}

/// Default token lifespan in minutes.
const DEFAULT_TOKEN_LIFESPAN_MINS: i64 = 60;

impl JwtConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `JWT_SECRET`          | **yes**  | --      |
    /// | `TOKEN_LIFESPAN_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or the lifespan is not a
    /// positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_lifespan_mins: i64 = std::env::var("TOKEN_LIFESPAN_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_LIFESPAN_MINS.to_string())
            .parse()
            .expect("TOKEN_LIFESPAN_MINS must be a valid i64");
        assert!(token_lifespan_mins > 0, "TOKEN_LIFESPAN_MINS must be positive");

        Self {
            secret,
            token_lifespan_mins,
        }
    }

    /// How long an issued or refreshed session stays valid.
    pub fn token_lifespan(&self) -> Duration {
        Duration::minutes(self.token_lifespan_mins)
    }

    /// Age after which a moderation lock is considered abandoned.
    ///
    /// Deliberately the same value as the session lifespan.
    pub fn lock_window(&self) -> Duration {
        self.token_lifespan()
    }
}

/// A freshly signed token and the instant it stops being valid.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Sign a new session token for `user_id`.
pub fn generate_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let expires_at = issued_at + config.token_lifespan();

    let claims = Claims {
        sub: user_id,
        iat: issued_at.timestamp(),
        exp: expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedToken { token, expires_at })
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Checks the HS512 signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(Algorithm::HS512),
    )?;
    Ok(token_data.claims)
}

/// SHA-256 hex digest of a token string, as stored in `session_tokens`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_lifespan_mins: 60,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let issued = generate_token(user_id, &config).expect("token generation should succeed");

        let claims = validate_token(&issued.token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let a = generate_token(user_id, &config).unwrap();
        let b = generate_token(user_id, &config).unwrap();
        assert_ne!(a.token, b.token);
        assert_ne!(hash_token(&a.token), hash_token(&b.token));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well past the default 60-second leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 600,
            exp: now - 300,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_hs256_token_is_rejected() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 300,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };

        let issued = generate_token(Uuid::new_v4(), &config_a).unwrap();
        assert!(validate_token(&issued.token, &config_b).is_err());
    }

    #[test]
    fn test_hash_is_stable_hex() {
        let hash = hash_token("abc");
        assert_eq!(hash, hash_token("abc"));
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_lock_window_matches_lifespan() {
        let config = test_config();
        assert_eq!(config.lock_window(), Duration::minutes(60));
    }
}
