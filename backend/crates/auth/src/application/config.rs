//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use chrono::Utc;
use platform::token::{AccessClaims, DEFAULT_TOKEN_TTL_MS, TokenCodec};

use crate::domain::entity::user::User;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (2 hours)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_millis(DEFAULT_TOKEN_TTL_MS as u64),
        }
    }
}

impl AuthConfig {
    /// Create config from an arbitrary-length secret string
    pub fn from_secret_str(secret: &str) -> Self {
        Self {
            token_secret: platform::crypto::sha256(secret.as_bytes()),
            ..Default::default()
        }
    }

    /// Create config with a random secret (for development)
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut token_secret = [0u8; 32];
        token_secret.copy_from_slice(&bytes);
        Self {
            token_secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get the token codec for this config
    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(self.token_secret)
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }

    /// Issue an access token for a user
    pub fn issue_token(&self, user: &User) -> String {
        let claims = AccessClaims {
            id: user.user_id.to_string(),
            email: user.email.as_str().to_string(),
            expires_at_ms: Utc::now().timestamp_millis() + self.token_ttl_ms(),
        };
        self.token_codec().issue(&claims)
    }
}
