//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::UserRow;
use crate::repo::{CreateUser, UserRepository};

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, about, avatar, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, about, avatar, created_at, updated_at
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> DbResult<Vec<UserRow>> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, name, about, avatar, created_at, updated_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        // users_email_lower_key turns a duplicate into DbError::UniqueViolation
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, name, about, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, name, about, avatar, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.about)
        .bind(&user.avatar)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: &str,
        about: &str,
    ) -> DbResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET name = $1, about = $2, updated_at = now()
            WHERE id = $3
            RETURNING id, email, password_hash, name, about, avatar, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(about)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_avatar(&self, id: Uuid, avatar: &str) -> DbResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET avatar = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, email, password_hash, name, about, avatar, created_at, updated_at
            "#,
        )
        .bind(avatar)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
