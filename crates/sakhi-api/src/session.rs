//! Session management with JWT tokens
//!
//! The platform's real credential check lives upstream; this layer only
//! issues and validates HS256 bearer tokens carrying the principal's
//! identifier and role.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session management error
#[derive(Debug, Error)]
pub enum SessionError {
    /// JWT encoding failed
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// Token expired
    #[error("Session token expired")]
    TokenExpired,

    /// Invalid token
    #[error("Invalid session token")]
    InvalidToken,
}

/// Role of an authenticated principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular contributor: may create content and read own records
    User,

    /// Administrator: full access including review, deletion, and feedback
    Admin,
}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Principal identifier
    pub sub: String,

    /// Principal role
    pub role: Role,

    /// Token expiration timestamp (Unix epoch)
    pub exp: u64,

    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Handles JWT token generation and validation
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

impl SessionManager {
    /// Create a new session manager with the given JWT secret and expiry
    pub fn new(jwt_secret: &str, token_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
        }
    }

    /// Token lifetime in seconds
    pub fn token_expiry_secs(&self) -> u64 {
        self.token_expiry_secs
    }

    /// Generate a new session token for the given principal
    pub fn generate_token(&self, user_id: &str, role: Role) -> Result<String, SessionError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = SessionClaims {
            sub: user_id.to_string(),
            role,
            exp: now + self.token_expiry_secs,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let validation = Validation::default();
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
                _ => SessionError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}
