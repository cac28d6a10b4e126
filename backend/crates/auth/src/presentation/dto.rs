//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// Sign up request
///
/// Fields default to empty so missing keys surface as validation labels
/// rather than deserialization failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated user response: public profile plus a fresh token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub token: String,
}

impl AuthUserResponse {
    pub fn new(user: &User, token: String) -> Self {
        Self {
            id: user.user_id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            token,
        }
    }
}

// ============================================================================
// User listing/detail
// ============================================================================

/// Public user profile - the password hash never crosses this boundary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Listing query parameters; everything stays a raw string so defaults
/// apply to non-numeric values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// First/last name search ("ayo" or "ayodele Aki")
    pub name: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
}
