//! Account handlers (signup, signin)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mesto_auth_core::NewUser;
use mesto_types::User;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::validation::{
    validate_email, validate_password, validate_text, validate_url, Validate, ValidatedJson,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
}

impl Validate for SignupRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if let Some(name) = &self.name {
            validate_text("name", name)?;
        }
        if let Some(about) = &self.about {
            validate_text("about", about)?;
        }
        if let Some(avatar) = &self.avatar {
            validate_url("avatar", avatar)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl Validate for SigninRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /signup
///
/// Register a new account
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .auth
        .register(NewUser {
            email: req.email,
            password: req.password,
            name: req.name.map(|s| s.trim().to_string()),
            about: req.about.map(|s| s.trim().to_string()),
            avatar: req.avatar,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /signin
///
/// Exchange credentials for a bearer token
pub async fn signin(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(SigninResponse {
        token: session.token,
        expires_at: session.expires_at,
        user: session.user,
    }))
}
