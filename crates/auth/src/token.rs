//! JWT issue and validation (HS256).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, DomainResult, UserId};

use crate::user::Role;

/// JWT claims carried by every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: UserId,

    /// Role granted at issue time.
    pub role: Role,

    /// Issued-at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issues and validates HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
    ttl: Duration,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        TokenManager {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issue a token for the given user.
    pub fn issue(&self, user_id: UserId, role: Role) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::backend(format!("token encoding failed: {e}")))
    }

    /// Validate signature and expiry, returning the decoded claims.
    pub fn validate(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| DomainError::Unauthorized)
    }
}
