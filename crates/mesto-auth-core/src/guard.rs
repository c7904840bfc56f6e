//! Per-request bearer token verification
//!
//! A request moves from unauthenticated to token-presented once an
//! `Authorization` header is found, and then to either verified or rejected.
//! Verification is purely cryptographic; the user record is not re-read.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use mesto_types::UserId;

use crate::{AuthError, TokenCodec};

/// Authenticated caller attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Verifies presented bearer tokens
#[derive(Clone)]
pub struct AuthGuard {
    codec: Arc<dyn TokenCodec>,
}

impl AuthGuard {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    /// Pull the token out of an `Authorization` header value
    ///
    /// The scheme is matched case-insensitively.
    pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
        let header = header.ok_or(AuthError::MissingToken)?;

        let (scheme, token) = header
            .trim()
            .split_once(' ')
            .ok_or(AuthError::InvalidToken)?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::InvalidToken);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(token)
    }

    /// Authenticate a request from its `Authorization` header value
    pub fn authenticate(&self, header: Option<&str>) -> Result<Identity, AuthError> {
        let result = Self::extract_bearer(header).and_then(|token| self.verify_token(token));

        let outcome = match &result {
            Ok(_) => "valid",
            Err(AuthError::MissingToken) => "missing",
            Err(AuthError::TokenExpired) => "expired",
            Err(_) => "invalid",
        };
        metrics::counter!("mesto_token_validations_total", "result" => outcome).increment(1);

        result
    }

    /// Verify a bare token
    pub fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.codec.verify(token)?;

        Ok(Identity {
            user_id: claims.user_id()?,
            expires_at: claims.expires_at()?,
        })
    }
}

impl std::fmt::Debug for AuthGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGuard").finish_non_exhaustive()
    }
}
