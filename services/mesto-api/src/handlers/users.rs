//! Profile handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use mesto_auth_core::ProfileUpdate;
use mesto_types::{User, UserId};

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;
use crate::validation::{parse_id, validate_text, validate_url, Validate, ValidatedJson};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub about: String,
}

impl Validate for UpdateProfileRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_text("name", &self.name)?;
        validate_text("about", &self.about)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    pub avatar: String,
}

impl Validate for UpdateAvatarRequest {
    fn validate(&self) -> ApiResult<()> {
        validate_url("avatar", &self.avatar)
    }
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.profiles.list().await?))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let user_id: UserId = parse_id(&id)?;
    Ok(Json(state.profiles.get(&user_id).await?))
}

/// GET /users/me
///
/// 404 if the account behind a still-valid token no longer exists
pub async fn get_me(State(state): State<AppState>, auth_user: AuthUser) -> ApiResult<Json<User>> {
    Ok(Json(state.profiles.get(&auth_user.user_id).await?))
}

/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    let user = state
        .profiles
        .update_profile(
            &auth_user,
            ProfileUpdate {
                name: req.name.trim().to_string(),
                about: req.about.trim().to_string(),
            },
        )
        .await?;

    Ok(Json(user))
}

/// PATCH /users/me/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateAvatarRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.profiles.update_avatar(&auth_user, &req.avatar).await?))
}
