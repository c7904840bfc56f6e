//! Auth errors

use thiserror::Error;

/// Failure categories shared by every layer
///
/// Core errors report one of these; the HTTP layer turns it into a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input, caught at the boundary
    Validation,
    /// Missing, invalid or expired token, or bad login credentials
    Authentication,
    /// Authenticated but not allowed (not the owner)
    Authorization,
    /// Identifier does not resolve
    NotFound,
    /// Email already registered
    Conflict,
    /// Unexpected collaborator failure
    Internal,
}

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No Authorization header
    #[error("missing token")]
    MissingToken,

    /// Invalid token (malformed, bad signature, wrong scheme, etc.)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Caller does not own the card
    #[error("not the owner")]
    NotOwner,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Card not found
    #[error("card not found")]
    CardNotFound,

    /// Email already registered
    #[error("email already registered")]
    EmailTaken,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Password hashing failed
    #[error("password hashing error: {0}")]
    Hashing(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCredentials
            | Self::MissingToken
            | Self::InvalidToken
            | Self::TokenExpired => ErrorKind::Authentication,
            Self::NotOwner => ErrorKind::Authorization,
            Self::UserNotFound | Self::CardNotFound => ErrorKind::NotFound,
            Self::EmailTaken => ErrorKind::Conflict,
            Self::Database(_) | Self::Hashing(_) | Self::Configuration(_) | Self::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<mesto_db::DbError> for AuthError {
    fn from(err: mesto_db::DbError) -> Self {
        tracing::error!("Database error: {}", err);
        Self::Database(err.to_string())
    }
}
