//! Card types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::UserId;

/// Unique card identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub Uuid);

impl CardId {
    /// Create a new random card ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a card ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CardId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A shared card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: CardId,
    pub name: String,
    pub link: String,
    /// Creator of the card, fixed for its lifetime
    pub owner: UserId,
    /// Users who liked the card
    pub likes: BTreeSet<UserId>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Check if the given user owns this card
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.owner == *user_id
    }

    /// Check if the given user has liked this card
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.contains(user_id)
    }

    /// Number of likes
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}
