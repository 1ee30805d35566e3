//! Signed authentication tokens for the `Authorization: JWT` header.
//!
//! A new token is signed for every request; nothing is cached between calls.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::error::TokenError;

/// Token lifetime in days
pub const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "VK1881Identity")]
    pub identity: String,
    pub iss: String,
    pub aud: String,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Not before, unix seconds
    pub nbf: i64,
}

impl Claims {
    pub fn new(config: &Configuration, now: DateTime<Utc>) -> Self {
        Self {
            identity: config.username().to_string(),
            iss: config.issuer_id().to_string(),
            aud: config.audience_id().to_string(),
            exp: (now + Duration::days(TOKEN_LIFETIME_DAYS)).timestamp(),
            nbf: now.timestamp(),
        }
    }
}

/// Sign a fresh claim set issued at `now` with the configured secret
pub fn sign(config: &Configuration, now: DateTime<Utc>) -> Result<String, TokenError> {
    let claims = Claims::new(config, now);
    let key = EncodingKey::from_secret(config.secret().as_bytes());
    let token = encode(&Header::new(config.algorithm()), &claims, &key)?;

    tracing::trace!(exp = claims.exp, nbf = claims.nbf, "Signed request token");

    Ok(token)
}
