//! Like toggle
//!
//! Each toggle is a single set mutation in the store, so concurrent likes
//! from different users never overwrite one another and repeated toggles
//! are idempotent.

use std::sync::Arc;

use mesto_db::CardRepository;
use mesto_types::{Card, CardId, UserId};

use crate::AuthError;

/// Like service
pub struct LikeService<C: CardRepository + ?Sized> {
    cards: Arc<C>,
}

impl<C: CardRepository + ?Sized> LikeService<C> {
    pub fn new(cards: Arc<C>) -> Self {
        Self { cards }
    }

    /// Add or remove `user_id` from the card's like-set
    ///
    /// Any authenticated user may like any card, including their own.
    pub async fn toggle_like(
        &self,
        card_id: &CardId,
        user_id: &UserId,
        want_liked: bool,
    ) -> Result<Card, AuthError> {
        let row = if want_liked {
            self.cards.add_like(card_id.0, user_id.0).await?
        } else {
            self.cards.remove_like(card_id.0, user_id.0).await?
        };

        let card = row.ok_or(AuthError::CardNotFound)?.into_card();
        let action = if want_liked { "like" } else { "unlike" };
        metrics::counter!("mesto_like_toggles_total", "action" => action).increment(1);
        tracing::debug!(
            card_id = %card_id,
            user_id = %user_id,
            liked = want_liked,
            likes = card.like_count(),
            "Like toggled"
        );
        Ok(card)
    }

    /// Like a card
    pub async fn like(&self, card_id: &CardId, user_id: &UserId) -> Result<Card, AuthError> {
        self.toggle_like(card_id, user_id, true).await
    }

    /// Remove a like
    pub async fn unlike(&self, card_id: &CardId, user_id: &UserId) -> Result<Card, AuthError> {
        self.toggle_like(card_id, user_id, false).await
    }
}
