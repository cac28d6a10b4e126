//! Application Configuration
//!
//! Configuration for the QnA application layer. Token verification uses
//! the same secret the auth context signs with; both are injected from
//! process configuration at startup.

use platform::token::TokenCodec;

/// QnA application configuration
#[derive(Debug, Clone)]
pub struct QnaConfig {
    /// Secret key for access-token verification (32 bytes)
    pub token_secret: [u8; 32],
}

impl Default for QnaConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
        }
    }
}

impl QnaConfig {
    /// Create config from an arbitrary-length secret string
    pub fn from_secret_str(secret: &str) -> Self {
        Self {
            token_secret: platform::crypto::sha256(secret.as_bytes()),
        }
    }

    /// Create config with a random secret (for development)
    pub fn with_random_secret() -> Self {
        let bytes = platform::crypto::random_bytes(32);
        let mut token_secret = [0u8; 32];
        token_secret.copy_from_slice(&bytes);
        Self { token_secret }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Get the token codec for this config
    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(self.token_secret)
    }
}
