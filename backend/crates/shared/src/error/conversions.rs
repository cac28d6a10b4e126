//! Error conversions - HTTP rendering for [`AppError`]
//!
//! Maps [`AppError`] to the API's uniform failure envelope.
//! Every handled failure, regardless of origin, serializes as:
//!
//! ```json
//! { "status": "fail", "error": { "message": "...", "errors": null } }
//! ```

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "status": "fail",
            "error": {
                "message": self.message(),
                "errors": self.errors(),
            },
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use crate::error::app_error::AppError;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_code_mapping() {
        let response = AppError::not_found("A question with the id provided was not found")
            .into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_mapping() {
        let response = AppError::conflict("A user with your email already exists").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
    }
}
