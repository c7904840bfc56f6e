//! PostgreSQL card repository implementation
//!
//! Like-set changes are single `UPDATE` statements. Postgres holds the row
//! lock for the duration and re-evaluates the new value against the latest
//! row version, so concurrent likes never overwrite each other.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::CardRow;
use crate::repo::{CardRepository, CreateCard, UpdateCard};

/// PostgreSQL card repository
#[derive(Clone)]
pub struct PgCardRepository {
    pool: PgPool,
}

impl PgCardRepository {
    /// Create a new card repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CardRepository for PgCardRepository {
    async fn list(&self) -> DbResult<Vec<CardRow>> {
        let cards = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT id, name, link, owner_id, likes, created_at
            FROM cards
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CardRow>> {
        let card = sqlx::query_as::<_, CardRow>(
            r#"
            SELECT id, name, link, owner_id, likes, created_at
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    async fn create(&self, card: CreateCard) -> DbResult<CardRow> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            INSERT INTO cards (id, name, link, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, link, owner_id, likes, created_at
            "#,
        )
        .bind(card.id)
        .bind(&card.name)
        .bind(&card.link)
        .bind(card.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: UpdateCard,
    ) -> DbResult<Option<CardRow>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            UPDATE cards SET name = $1, link = $2
            WHERE id = $3 AND owner_id = $4
            RETURNING id, name, link, owner_id, likes, created_at
            "#,
        )
        .bind(&update.name)
        .bind(&update.link)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> DbResult<Option<CardRow>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            DELETE FROM cards
            WHERE id = $1 AND owner_id = $2
            RETURNING id, name, link, owner_id, likes, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            UPDATE cards
            SET likes = CASE
                WHEN $2 = ANY(likes) THEN likes
                ELSE array_append(likes, $2)
            END
            WHERE id = $1
            RETURNING id, name, link, owner_id, likes, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<CardRow>> {
        let row = sqlx::query_as::<_, CardRow>(
            r#"
            UPDATE cards
            SET likes = array_remove(likes, $2)
            WHERE id = $1
            RETURNING id, name, link, owner_id, likes, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
