//! PostgreSQL repository implementations

mod card;
mod user;

use std::sync::Arc;

use async_trait::async_trait;

pub use card::PgCardRepository;
pub use user::PgUserRepository;

use crate::error::DbResult;
use crate::repo::{HealthCheck, Stores};
use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub cards: PgCardRepository,
    pool: DbPool,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            cards: PgCardRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl HealthCheck for Repositories {
    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

impl From<Repositories> for Stores {
    fn from(repos: Repositories) -> Self {
        Self {
            users: Arc::new(repos.users.clone()),
            cards: Arc::new(repos.cards.clone()),
            health: Arc::new(repos),
        }
    }
}
