//! Signed Access Tokens
//!
//! A signed, time-limited credential carrying the holder's id and email.
//! Format: `base64url(json claims) . base64url(hmac-sha256 signature)`,
//! signed over the encoded payload with a process-wide secret.
//!
//! Also provides the transport lookup: clients may present the token via
//! `Authorization: Bearer`, the `x-access-token` header, a `token` header,
//! a `token` cookie, or a `token` body field - checked in that order.

use axum::http::{HeaderMap, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cookie::extract_cookie;
use crate::crypto::{constant_time_eq, from_base64url, hmac_sha256, sha256, to_base64url};

/// Default token lifetime: 2 hours
pub const DEFAULT_TOKEN_TTL_MS: i64 = 2 * 3600 * 1000;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Holder's user id (UUID string)
    pub id: String,
    /// Holder's email
    pub email: String,
    /// Expiry as unix milliseconds
    pub expires_at_ms: i64,
}

/// Token verification errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Token is not two base64url parts joined by a dot, or the payload
    /// is not valid claims JSON
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the payload
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token is past its expiry
    #[error("Token expired")]
    Expired,
}

/// Issues and verifies signed access tokens
#[derive(Clone)]
pub struct TokenCodec {
    secret: [u8; 32],
}

impl TokenCodec {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Derive the signing key from an arbitrary-length secret string
    pub fn from_secret_str(secret: &str) -> Self {
        Self {
            secret: sha256(secret.as_bytes()),
        }
    }

    /// Sign claims into a token string
    pub fn issue(&self, claims: &AccessClaims) -> String {
        let payload = serde_json::to_vec(claims).expect("claims serialize to JSON");
        let encoded = to_base64url(&payload);
        let signature = hmac_sha256(&self.secret, encoded.as_bytes());
        format!("{}.{}", encoded, to_base64url(&signature))
    }

    /// Verify a token and return its claims
    ///
    /// `now_ms` is passed in by the caller so verification stays a pure
    /// function of its inputs.
    pub fn verify(&self, token: &str, now_ms: i64) -> Result<AccessClaims, TokenError> {
        let (encoded, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let signature = from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;
        let expected = hmac_sha256(&self.secret, encoded.as_bytes());
        if !constant_time_eq(&signature, &expected) {
            return Err(TokenError::InvalidSignature);
        }

        let payload = from_base64url(encoded).map_err(|_| TokenError::Malformed)?;
        let claims: AccessClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

        if claims.expires_at_ms <= now_ms {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("secret", &"[SECRET]")
            .finish()
    }
}

// ============================================================================
// Transport lookup
// ============================================================================

/// Find the access token in a request
///
/// Checked in precedence order:
/// 1. `Authorization` header (`Bearer <token>`, or the raw header value)
/// 2. `x-access-token` header
/// 3. `token` header
/// 4. `token` cookie
/// 5. `token` body field (passed in by the handler when the route has a body)
pub fn extract_token(headers: &HeaderMap, body_token: Option<&str>) -> Option<String> {
    if let Some(value) = header_str(headers, header::AUTHORIZATION.as_str()) {
        let token = match value.split_once(' ') {
            Some((_, bearer)) if !bearer.is_empty() => bearer,
            _ => value,
        };
        return Some(token.to_string());
    }

    if let Some(value) = header_str(headers, "x-access-token") {
        return Some(value.to_string());
    }

    if let Some(value) = header_str(headers, "token") {
        return Some(value.to_string());
    }

    if let Some(value) = extract_cookie(headers, "token") {
        return Some(value);
    }

    body_token.map(|t| t.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn codec() -> TokenCodec {
        TokenCodec::from_secret_str("test-secret")
    }

    fn claims(expires_at_ms: i64) -> AccessClaims {
        AccessClaims {
            id: "0f0e8a9e-9cb4-4f3a-a2c9-8b3f9be2d001".to_string(),
            email: "daylay10@yahoo.com".to_string(),
            expires_at_ms,
        }
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let codec = codec();
        let claims = claims(10_000);
        let token = codec.issue(&claims);

        let verified = codec.verify(&token, 5_000).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_expired_token_rejected() {
        let codec = codec();
        let token = codec.issue(&claims(10_000));
        assert_eq!(codec.verify(&token, 10_000), Err(TokenError::Expired));
        assert_eq!(codec.verify(&token, 20_000), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = codec();
        let token = codec.issue(&claims(10_000));
        let (_, signature) = token.split_once('.').unwrap();

        let forged_payload = to_base64url(
            br#"{"id":"0f0e8a9e-9cb4-4f3a-a2c9-8b3f9be2d001","email":"evil@x.com","expires_at_ms":99999}"#,
        );
        let forged = format!("{}.{}", forged_payload, signature);
        assert_eq!(
            codec.verify(&forged, 0),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = codec().issue(&claims(10_000));
        let other = TokenCodec::from_secret_str("other-secret");
        assert_eq!(other.verify(&token, 0), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let codec = codec();
        assert_eq!(codec.verify("gyudfgufgiyegi3747", 0), Err(TokenError::Malformed));
        assert_eq!(codec.verify("", 0), Err(TokenError::Malformed));
        assert_eq!(codec.verify("a.b.c", 0), Err(TokenError::Malformed));
    }

    #[test]
    fn test_extract_token_bearer_first() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer aaa"),
        );
        headers.insert("x-access-token", HeaderValue::from_static("bbb"));
        assert_eq!(extract_token(&headers, Some("eee")), Some("aaa".to_string()));
    }

    #[test]
    fn test_extract_token_bare_authorization_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("aaa"));
        assert_eq!(extract_token(&headers, None), Some("aaa".to_string()));
    }

    #[test]
    fn test_extract_token_precedence_chain() {
        let mut headers = HeaderMap::new();
        headers.insert("token", HeaderValue::from_static("ccc"));
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("token=ddd; other=x"),
        );
        assert_eq!(extract_token(&headers, Some("eee")), Some("ccc".to_string()));

        headers.remove("token");
        assert_eq!(extract_token(&headers, Some("eee")), Some("ddd".to_string()));

        headers.remove(header::COOKIE);
        assert_eq!(extract_token(&headers, Some("eee")), Some("eee".to_string()));

        assert_eq!(extract_token(&headers, None), None);
    }
}
