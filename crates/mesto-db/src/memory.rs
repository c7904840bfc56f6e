//! In-memory store
//!
//! Implements every repository trait over `DashMap`s. Each mutation runs
//! while holding the shard lock of the entry it touches, which gives the
//! same single-record atomicity the Postgres implementation relies on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{CardRow, UserRow};
use crate::repo::{
    CardRepository, CreateCard, CreateUser, HealthCheck, Stores, UpdateCard, UserRepository,
};

/// In-memory users and cards
#[derive(Default, Clone)]
pub struct MemoryStore {
    users: Arc<DashMap<Uuid, UserRow>>,
    /// Lowercased email -> user id; doubles as the unique index
    by_email: Arc<DashMap<String, Uuid>>,
    cards: Arc<DashMap<Uuid, CardRow>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the store were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Number of stored cards
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    fn check_available(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }

    fn mutate_card(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut CardRow),
    ) -> DbResult<Option<CardRow>> {
        self.check_available()?;
        Ok(self.cards.get_mut(&id).map(|mut card| {
            f(card.value_mut());
            card.value().clone()
        }))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.check_available()?;
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.check_available()?;
        Ok(self
            .by_email
            .get(&email.to_lowercase())
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn list(&self) -> DbResult<Vec<UserRow>> {
        self.check_available()?;
        let mut users: Vec<UserRow> = self.users.iter().map(|r| r.value().clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        self.check_available()?;

        // Holding the email entry makes check-and-insert one step
        match self.by_email.entry(user.email.to_lowercase()) {
            Entry::Occupied(_) => Err(DbError::UniqueViolation {
                constraint: "users_email_lower_key".to_string(),
            }),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let row = UserRow {
                    id: user.id,
                    email: user.email,
                    password_hash: user.password_hash,
                    name: user.name,
                    about: user.about,
                    avatar: user.avatar,
                    created_at: now,
                    updated_at: now,
                };
                self.users.insert(row.id, row.clone());
                slot.insert(row.id);
                Ok(row)
            }
        }
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        about: &str,
    ) -> DbResult<Option<UserRow>> {
        self.check_available()?;
        Ok(self.users.get_mut(&id).map(|mut user| {
            user.name = name.to_string();
            user.about = about.to_string();
            user.updated_at = Utc::now();
            user.value().clone()
        }))
    }

    async fn update_avatar(&self, id: Uuid, avatar: &str) -> DbResult<Option<UserRow>> {
        self.check_available()?;
        Ok(self.users.get_mut(&id).map(|mut user| {
            user.avatar = avatar.to_string();
            user.updated_at = Utc::now();
            user.value().clone()
        }))
    }
}

#[async_trait]
impl CardRepository for MemoryStore {
    async fn list(&self) -> DbResult<Vec<CardRow>> {
        self.check_available()?;
        let mut cards: Vec<CardRow> = self.cards.iter().map(|r| r.value().clone()).collect();
        cards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cards)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CardRow>> {
        self.check_available()?;
        Ok(self.cards.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, card: CreateCard) -> DbResult<CardRow> {
        self.check_available()?;
        let row = CardRow {
            id: card.id,
            name: card.name,
            link: card.link,
            owner_id: card.owner_id,
            likes: Vec::new(),
            created_at: Utc::now(),
        };
        self.cards.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateCard,
    ) -> DbResult<Option<CardRow>> {
        self.check_available()?;
        Ok(self
            .cards
            .get_mut(&id)
            .filter(|card| card.owner_id == owner_id)
            .map(|mut card| {
                card.name = update.name;
                card.link = update.link;
                card.value().clone()
            }))
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<CardRow>> {
        self.check_available()?;
        Ok(self
            .cards
            .remove_if(&id, |_, card| card.owner_id == owner_id)
            .map(|(_, card)| card))
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>> {
        self.mutate_card(id, |card| {
            if !card.likes.contains(&user_id) {
                card.likes.push(user_id);
            }
        })
    }

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>> {
        self.mutate_card(id, |card| card.likes.retain(|liker| *liker != user_id))
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> DbResult<()> {
        self.check_available()
    }
}

impl From<MemoryStore> for Stores {
    fn from(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            cards: store.clone(),
            health: store,
        }
    }
}
