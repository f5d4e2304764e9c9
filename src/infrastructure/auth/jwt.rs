//! JWT token issuance and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user email)
    pub sub: String,
    /// User ID
    pub user_id: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_minutes: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::minutes(expiration_minutes as i64);

        Self {
            sub: user.email().to_string(),
            user_id: user.id().as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

/// Configuration for JWT signing
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Symmetric secret for HS256 signing
    pub secret: String,
    /// Token expiration time in minutes
    pub expiration_minutes: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_minutes: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_minutes: 30,
        }
    }
}

/// Trait for token operations
pub trait TokenIssuer: Send + Sync + Debug {
    /// Generate a token for a user
    fn generate(&self, user: &User) -> Result<String, DomainError>;

    /// Validate a token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;

    /// Token lifetime in minutes
    fn expiration_minutes(&self) -> u64;
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_minutes", &self.config.expiration_minutes)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenIssuer for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_minutes);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::invalid_credentials(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }

    fn expiration_minutes(&self) -> u64 {
        self.config.expiration_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    fn create_test_user() -> User {
        User::new(UserId::new("user-1"), "a@x.com", "alice", "hashed").unwrap()
    }

    fn create_service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret-key-12345", 30))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = create_service();
        let user = create_test_user();

        let token = service.generate(&user).unwrap();
        assert!(!token.is_empty());

        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.user_id(), "user-1");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token() {
        let service = create_service();

        assert!(service.validate("invalid-token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret-1", 30));
        let service2 = JwtService::new(JwtConfig::new("secret-2", 30));

        let token = service1.generate(&create_test_user()).unwrap();

        assert!(service2.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_service();
        let user = create_test_user();

        let past = Utc::now() - Duration::hours(2);
        let claims = JwtClaims {
            sub: user.email().to_string(),
            user_id: user.id().as_str().to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::hours(1)).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key-12345"),
        )
        .unwrap();

        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_expiration_minutes() {
        let service = JwtService::new(JwtConfig::new("secret", 60));
        assert_eq!(service.expiration_minutes(), 60);
    }
}
