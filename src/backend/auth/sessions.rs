/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for parent and
 * child sessions. Besides the account id, each token carries the account's
 * role and the producer identity its location traffic belongs to: a parent's
 * own id, or the id of the parent a child is linked to.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::shared::ProducerId;

/// Tokens expire after 30 days
const TOKEN_LIFETIME_SECS: u64 = 30 * 24 * 60 * 60;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Child => f.write_str("child"),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    pub role: Role,
    /// Producer identity the account reports to or watches
    pub producer: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn producer_id(&self) -> ProducerId {
        ProducerId::new(self.producer.clone())
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Create a JWT token for an account
///
/// # Arguments
/// * `secret` - HMAC secret
/// * `account_id` - Parent or child ID
/// * `role` - Account role
/// * `producer` - Producer identity (parent ID)
pub fn create_token(
    secret: &str,
    account_id: Uuid,
    role: Role,
    producer: &ProducerId,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = now_secs();
    let claims = Claims {
        sub: account_id.to_string(),
        role,
        producer: producer.as_str().to_string(),
        exp: now + TOKEN_LIFETIME_SECS,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
