//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC, base64url)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Signed access tokens and their HTTP transport lookup
//! - Cookie parsing

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
