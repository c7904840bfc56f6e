//! Error types for the Mesto API service.
//!
//! Every failure leaves a handler as an [`ApiError`], which picks the status
//! code and renders a `{ "message": ... }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use mesto_auth_core::{AuthError, ErrorKind};

/// Message for every guard rejection, whatever the reason
pub const AUTH_REQUIRED_MESSAGE: &str = "Authorization required";

/// Message for every internal failure
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body or field failed boundary checks
    #[error("{0}")]
    Validation(String),

    /// Path identifier is not a UUID
    #[error("Invalid identifier")]
    InvalidId,

    /// No route matched
    #[error("Requested resource not found")]
    RouteNotFound,

    /// Route exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Handler exceeded the request timeout
    #[error("Request timed out")]
    Timeout,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Failure category
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidId => ErrorKind::Validation,
            Self::RouteNotFound => ErrorKind::NotFound,
            Self::MethodNotAllowed | Self::Timeout => ErrorKind::Validation,
            Self::Auth(err) => err.kind(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => return StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => return StatusCode::REQUEST_TIMEOUT,
            _ => {}
        }

        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message
    pub fn message(&self) -> String {
        let Self::Auth(err) = self else {
            return self.to_string();
        };

        match err {
            AuthError::InvalidCredentials => "Incorrect email or password",
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                AUTH_REQUIRED_MESSAGE
            }
            AuthError::NotOwner => "Only the owner can modify this card",
            AuthError::UserNotFound => "User not found",
            AuthError::CardNotFound => "Card not found",
            AuthError::EmailTaken => "A user with this email already exists",
            AuthError::Database(_)
            | AuthError::Hashing(_)
            | AuthError::Configuration(_)
            | AuthError::Internal(_) => INTERNAL_MESSAGE,
        }
        .to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.kind() {
            ErrorKind::Internal => tracing::error!(error = %self, "Internal API error"),
            ErrorKind::Authentication => tracing::debug!(reason = %self, "Authentication failed"),
            _ => {}
        }

        let body = ErrorResponse {
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Give the timeout layer's bare 408 the standard error body
pub async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request timed out");
        return ApiError::Timeout.into_response();
    }
    response
}
