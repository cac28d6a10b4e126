//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Generic message for failures whose detail must not leak
pub const GENERIC_FAILURE: &str = "Some error occurred, try again";

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed schema validation; carries the first
    /// violation's human-readable label
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("A user with your email already exists")]
    EmailTaken,

    /// Unknown email, wrong password, or missing credentials
    #[error("Invalid email/password")]
    InvalidCredentials,

    /// Path id is not a well-formed identifier
    #[error("Invalid user Id")]
    InvalidUserId,

    /// No user with the given id
    #[error("A user with the id provided was not found")]
    UserNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::InvalidUserId => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidUserId => ErrorKind::BadRequest,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures are flattened to a fixed generic message so
    /// no internal detail reaches the response body.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::new(kind, GENERIC_FAILURE)
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AuthError::Validation("label".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_do_not_leak_detail() {
        let err = AuthError::Internal("connection pool exhausted".into());
        assert_eq!(err.to_app_error().message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = AuthError::EmailTaken;
        assert_eq!(
            err.to_app_error().message(),
            "A user with your email already exists"
        );
    }
}
