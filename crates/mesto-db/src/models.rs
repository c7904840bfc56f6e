//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use mesto_types::{Card, CardId, User, UserId};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Card row from the database
#[derive(Debug, Clone, FromRow)]
pub struct CardRow {
    pub id: Uuid,
    pub name: String,
    pub link: String,
    pub owner_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Conversion implementations from Row types to mesto-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Public profile without the credential
    pub fn to_profile(&self) -> User {
        User {
            id: self.user_id(),
            email: self.email.clone(),
            name: self.name.clone(),
            about: self.about.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

impl CardRow {
    /// Convert to domain CardId
    pub fn card_id(&self) -> CardId {
        CardId(self.id)
    }

    /// Convert to domain owner UserId
    pub fn owner(&self) -> UserId {
        UserId(self.owner_id)
    }

    /// Convert to the domain card
    pub fn into_card(self) -> Card {
        Card {
            id: self.card_id(),
            owner: self.owner(),
            likes: self.likes.into_iter().map(UserId).collect(),
            name: self.name,
            link: self.link,
            created_at: self.created_at,
        }
    }
}
