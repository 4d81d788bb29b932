// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::gate::AuthErrorKind;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized (all authorization failures, with a distinct kind each)
    Auth(AuthErrorKind),

    // 404 Not Found
    NotFound,

    // 422 Unprocessable Entity (malformed or semantically invalid input, or a failed write)
    Unprocessable,

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Auth(_) => 401,
            ApiError::NotFound => 404,
            ApiError::Unprocessable => 422,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Auth(kind) => kind.message(),
            ApiError::NotFound => "resource not found",
            ApiError::Unprocessable => "unprocessable",
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Auth(kind) => kind.code(),
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Unprocessable => "UNPROCESSABLE",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code(),
            "message": self.message(),
            "code": self.error_code(),
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AuthErrorKind> for ApiError {
    fn from(kind: AuthErrorKind) -> Self {
        ApiError::Auth(kind)
    }
}

impl From<crate::store::StoreError> for ApiError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::NotFound(_) => ApiError::NotFound,
            crate::store::StoreError::Write(msg) => {
                // Log the real error but return the generic 422 the clients expect
                tracing::error!("store write error: {}", msg);
                ApiError::Unprocessable
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

/// Handler result alias; errors render through `IntoResponse` above
pub type ApiResult<T> = Result<T, ApiError>;
