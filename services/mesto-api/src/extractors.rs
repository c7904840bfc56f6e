//! Authentication middleware and extractors

use std::ops::Deref;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use mesto_auth_core::{AuthError, Identity};

use crate::error::ApiError;
use crate::state::AppState;

/// Guard for protected routes
///
/// Verifies the bearer token and attaches the caller's [`Identity`] to the
/// request. Rejections never reach the handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let header = request
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::InvalidToken))
            .transpose()?;

        state.guard.authenticate(header).inspect_err(|e| {
            tracing::debug!(
                reason = %e,
                method = %request.method(),
                path = %request.uri().path(),
                "Request rejected by auth guard"
            );
        })?
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Authenticated caller, available on routes behind [`require_auth`]
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl Deref for AuthUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .map(AuthUser)
            .ok_or(ApiError::Auth(AuthError::MissingToken))
    }
}
