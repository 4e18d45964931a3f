//! Hub error types with HTTP status code mapping.
//!
//! [`HubError`] is the central error type for the API. Each variant maps
//! to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2003,
///     "message": "No featured guide found"
///   },
///   "detail": "No featured guide found"
/// }
/// ```
///
/// `detail` repeats the message at the top level; the web frontend reads it.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
    /// Human-readable message, duplicated from `error.message`.
    pub detail: String,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                     |
/// |-----------|-----------------|---------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request / 422           |
/// | 2000–2999 | Not Found       | 404 Not Found                   |
/// | 3000–3999 | Server          | 500 / 503                       |
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The supplied address is not a valid email.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The email is already on the newsletter list.
    #[error("Email already subscribed")]
    AlreadySubscribed,

    /// Guide with the given ID was not found.
    #[error("guide not found: {0}")]
    GuideNotFound(uuid::Uuid),

    /// Category with the given ID was not found.
    #[error("category not found: {0}")]
    CategoryNotFound(uuid::Uuid),

    /// No guide is flagged as featured.
    #[error("No featured guide found")]
    NoFeaturedGuide,

    /// Storage backend failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// A dependency (usually the database) is not reachable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HubError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidEmail(_) => 1002,
            Self::AlreadySubscribed => 1003,
            Self::GuideNotFound(_) => 2001,
            Self::CategoryNotFound(_) => 2002,
            Self::NoFeaturedGuide => 2003,
            Self::Internal(_) => 3000,
            Self::Storage(_) => 3001,
            Self::Unavailable(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::AlreadySubscribed => StatusCode::BAD_REQUEST,
            Self::InvalidEmail(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::GuideNotFound(_) | Self::CategoryNotFound(_) | Self::NoFeaturedGuide => {
                StatusCode::NOT_FOUND
            }
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<sqlx::Error> for HubError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<mongodb::error::Error> for HubError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for HubError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let message = self.to_string();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: message.clone(),
            },
            detail: message,
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
