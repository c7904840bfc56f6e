//! Card creation and owner-gated mutations

use std::sync::Arc;

use mesto_db::{CardRepository, CreateCard, UpdateCard};
use mesto_types::{Card, CardId};

use crate::{AuthError, Identity};

/// New card input
#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub link: String,
}

/// Card name/link update
#[derive(Debug, Clone)]
pub struct CardUpdate {
    pub name: String,
    pub link: String,
}

/// Fail with `NotOwner` unless `identity` created `card`
pub fn ensure_owner(card: &Card, identity: &Identity) -> Result<(), AuthError> {
    if card.is_owned_by(&identity.user_id) {
        Ok(())
    } else {
        Err(AuthError::NotOwner)
    }
}

/// Card service
///
/// Mutations first resolve the card (404 beats 403), then check ownership,
/// then run a store operation that is itself conditioned on the owner. A card
/// deleted between the check and the write surfaces as `CardNotFound`.
pub struct CardService<C: CardRepository + ?Sized> {
    cards: Arc<C>,
}

impl<C: CardRepository + ?Sized> CardService<C> {
    pub fn new(cards: Arc<C>) -> Self {
        Self { cards }
    }

    /// All cards, newest first
    pub async fn list_cards(&self) -> Result<Vec<Card>, AuthError> {
        let rows = self.cards.list().await?;
        Ok(rows.into_iter().map(|row| row.into_card()).collect())
    }

    pub async fn get_card(&self, card_id: &CardId) -> Result<Card, AuthError> {
        self.cards
            .find_by_id(card_id.0)
            .await?
            .map(|row| row.into_card())
            .ok_or(AuthError::CardNotFound)
    }

    /// Create a card owned by the caller with an empty like-set
    pub async fn create_card(&self, identity: &Identity, card: NewCard) -> Result<Card, AuthError> {
        let row = self
            .cards
            .create(CreateCard {
                id: uuid::Uuid::new_v4(),
                name: card.name,
                link: card.link,
                owner_id: identity.user_id.0,
            })
            .await?;

        tracing::info!(card_id = %row.id, owner = %identity.user_id, "Card created");
        Ok(row.into_card())
    }

    /// Change name and link of a card the caller owns
    pub async fn update_card(
        &self,
        identity: &Identity,
        card_id: &CardId,
        update: CardUpdate,
    ) -> Result<Card, AuthError> {
        let card = self.get_card(card_id).await?;
        self.check_owner(&card, identity)?;

        let row = self
            .cards
            .update_owned(
                card_id.0,
                identity.user_id.0,
                UpdateCard {
                    name: update.name,
                    link: update.link,
                },
            )
            .await?
            .ok_or(AuthError::CardNotFound)?;

        tracing::info!(card_id = %card_id, "Card updated");
        Ok(row.into_card())
    }

    /// Delete a card the caller owns, returning it
    pub async fn delete_card(&self, identity: &Identity, card_id: &CardId) -> Result<Card, AuthError> {
        let card = self.get_card(card_id).await?;
        self.check_owner(&card, identity)?;

        let row = self
            .cards
            .delete_owned(card_id.0, identity.user_id.0)
            .await?
            .ok_or(AuthError::CardNotFound)?;

        tracing::info!(card_id = %card_id, "Card deleted");
        Ok(row.into_card())
    }

    fn check_owner(&self, card: &Card, identity: &Identity) -> Result<(), AuthError> {
        ensure_owner(card, identity).inspect_err(|_| {
            tracing::warn!(
                card_id = %card.id,
                caller = %identity.user_id,
                "Rejected mutation by non-owner"
            );
        })
    }
}
