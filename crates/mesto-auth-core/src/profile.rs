//! Profile reads and self-service updates

use std::sync::Arc;

use mesto_db::UserRepository;
use mesto_types::{User, UserId};

use crate::{AuthError, Identity};

/// Name and bio update
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
    pub about: String,
}

/// Profile service
///
/// Updates always target the caller's own record, so ownership holds by
/// construction.
pub struct ProfileService<U: UserRepository + ?Sized> {
    users: Arc<U>,
}

impl<U: UserRepository + ?Sized> ProfileService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    /// Get one profile
    pub async fn get(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id.0)
            .await?
            .map(|row| row.to_profile())
            .ok_or(AuthError::UserNotFound)
    }

    /// List all profiles
    pub async fn list(&self) -> Result<Vec<User>, AuthError> {
        let rows = self.users.list().await?;
        Ok(rows.iter().map(|row| row.to_profile()).collect())
    }

    /// Update the caller's name and bio
    pub async fn update_profile(
        &self,
        identity: &Identity,
        update: ProfileUpdate,
    ) -> Result<User, AuthError> {
        let row = self
            .users
            .update_profile(identity.user_id.0, &update.name, &update.about)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %identity.user_id, "Profile updated");
        Ok(row.to_profile())
    }

    /// Update the caller's avatar
    pub async fn update_avatar(&self, identity: &Identity, avatar: &str) -> Result<User, AuthError> {
        let row = self
            .users
            .update_avatar(identity.user_id.0, avatar)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %identity.user_id, "Avatar updated");
        Ok(row.to_profile())
    }
}
