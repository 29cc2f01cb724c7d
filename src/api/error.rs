//! API error taxonomy.
//!
//! Each error kind maps to exactly one status code. Unknown email and wrong
//! password both map to 401 so a login failure never reveals which part was
//! wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    InvalidCredentials,
    DuplicateEmail,
    DuplicateTitle,
    AccessDenied,
    ValidationFailed(&'static str),
    NotFound(&'static str),
    Internal(anyhow::Error),
}

impl ApiError {
    /// Wrap any store or hashing fault as an internal error.
    pub fn internal<E: Into<anyhow::Error>>(e: E) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            ApiError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "An account with the email specified exists",
            ),
            ApiError::DuplicateTitle => (
                StatusCode::CONFLICT,
                "A post with that title already exists, Please choose another title",
            ),
            ApiError::AccessDenied => (StatusCode::FORBIDDEN, "Unauthorized access"),
            ApiError::ValidationFailed(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(e) => {
                error!("Internal fault: {e:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        };

        (
            status,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}
