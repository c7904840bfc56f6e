//! Repository traits
//!
//! Define async repository interfaces for database operations.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
///
/// Implementations must enforce email uniqueness (case-insensitive) at the
/// store level so that `create` is atomic with the uniqueness check.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email, ignoring case
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// List all users
    async fn list(&self) -> DbResult<Vec<UserRow>>;

    /// Create a new user
    ///
    /// Fails with `DbError::UniqueViolation` when the email is taken.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Update name and bio, returning the new row
    async fn update_profile(&self, id: Uuid, name: &str, about: &str)
        -> DbResult<Option<UserRow>>;

    /// Update avatar, returning the new row
    async fn update_avatar(&self, id: Uuid, avatar: &str) -> DbResult<Option<UserRow>>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
}

/// Card repository trait
///
/// The like operations must be single atomic set mutations in the store.
#[async_trait]
pub trait CardRepository: Send + Sync {
    /// List all cards, newest first
    async fn list(&self) -> DbResult<Vec<CardRow>>;

    /// Find a card by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CardRow>>;

    /// Create a new card
    async fn create(&self, card: CreateCard) -> DbResult<CardRow>;

    /// Update name and link if the card exists and is owned by `owner_id`
    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateCard,
    ) -> DbResult<Option<CardRow>>;

    /// Delete the card if it exists and is owned by `owner_id`, returning it
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<CardRow>>;

    /// Add a user to the like-set unless already present
    async fn add_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>>;

    /// Remove a user from the like-set
    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>>;
}

/// Create card input
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub id: Uuid,
    pub name: String,
    pub link: String,
    pub owner_id: Uuid,
}

/// Update card input
#[derive(Debug, Clone)]
pub struct UpdateCard {
    pub name: String,
    pub link: String,
}

/// Store liveness check
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Round-trip to the store
    async fn ping(&self) -> DbResult<()>;
}

/// Store handles injected into services at startup
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub cards: Arc<dyn CardRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
