//! HTTP error responses.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;

/// Errors surfaced by handlers, rendered as `{"message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    /// 404 with the message shown to the client.
    NotFound(String),
    /// 400 for malformed query parameters.
    BadRequest(String),
    /// 500; details are logged, not returned.
    Internal(AppError),
}

impl ApiError {
    /// The 404 returned for paths no route matches.
    pub fn no_route() -> Self {
        Self::NotFound(
            "The requested URL was not found on the server. If you entered the URL manually \
             please check your spelling and try again."
                .to_string(),
        )
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        if err.is_not_found() {
            Self::NotFound(err.to_string())
        } else {
            Self::Internal(err)
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(err) => {
                if err.is_programming_error() {
                    tracing::error!(error = %err, "programming error while handling request");
                } else {
                    tracing::error!(error = %err, "request failed");
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
