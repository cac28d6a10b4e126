//! QnA Error Types
//!
//! This module provides QnA-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Generic message for failures whose detail must not leak
pub const GENERIC_FAILURE: &str = "Some error occurred, try again";

/// QnA-specific result type alias
pub type QnaResult<T> = Result<T, QnaError>;

/// QnA-specific error variants
#[derive(Debug, Error)]
pub enum QnaError {
    /// Request body failed schema validation; carries the first
    /// violation's human-readable label
    #[error("{0}")]
    Validation(String),

    /// No token in any of the accepted transports
    #[error("Access denied, Token required")]
    MissingToken,

    /// Token present but malformed, tampered, or expired
    #[error("Invalid Token")]
    InvalidToken,

    /// Path id is not a well-formed question identifier
    #[error("Invalid question Id")]
    InvalidQuestionId,

    /// No question with the given id
    #[error("A question with the id provided was not found")]
    QuestionNotFound,

    /// Path id is not a well-formed answer identifier
    #[error("Invalid answer Id")]
    InvalidAnswerId,

    /// No answer with the given id
    #[error("An answer with the id provided was not found")]
    AnswerNotFound,

    /// A concurrent vote bumped the question's version between the
    /// snapshot read and the save; the in-memory mutation was discarded
    #[error("Concurrent vote update, request must be retried")]
    VoteContention,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QnaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            QnaError::Validation(_)
            | QnaError::InvalidQuestionId
            | QnaError::InvalidAnswerId => StatusCode::BAD_REQUEST,
            QnaError::MissingToken | QnaError::InvalidToken => StatusCode::UNAUTHORIZED,
            QnaError::QuestionNotFound | QnaError::AnswerNotFound => StatusCode::NOT_FOUND,
            QnaError::VoteContention | QnaError::Database(_) | QnaError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            QnaError::Validation(_)
            | QnaError::InvalidQuestionId
            | QnaError::InvalidAnswerId => ErrorKind::BadRequest,
            QnaError::MissingToken | QnaError::InvalidToken => ErrorKind::Unauthorized,
            QnaError::QuestionNotFound | QnaError::AnswerNotFound => ErrorKind::NotFound,
            QnaError::VoteContention | QnaError::Database(_) | QnaError::Internal(_) => {
                ErrorKind::InternalServerError
            }
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
            QnaError::Database(e) => {
                tracing::error!(error = %e, "QnA database error");
            }
            QnaError::Internal(msg) => {
                tracing::error!(message = %msg, "QnA internal error");
            }
            QnaError::VoteContention => {
                tracing::warn!("Concurrent vote update detected");
            }
            _ => {
                tracing::debug!(error = %self, "QnA error");
            }
        }
    }
}

impl IntoResponse for QnaError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for QnaError {
    fn from(err: AppError) -> Self {
        QnaError::Internal(err.to_string())
    }
}
