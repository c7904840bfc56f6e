//! Mesto DB - Database abstractions
//!
//! SQLx-based database layer for Mesto services.
//!
//! # Example
//!
//! ```rust,ignore
//! use mesto_db::{create_pool_with_options, PoolOptions, Repositories, Stores};
//!
//! let pool = create_pool_with_options("postgres://localhost/mesto", PoolOptions::default()).await?;
//! let stores = Stores::from(Repositories::new(pool));
//!
//! // Use repositories
//! let user = stores.users.find_by_email("user@example.com").await?;
//! ```
//!
//! With the `memory` feature, [`memory::MemoryStore`] provides the same
//! repository traits without a database.

pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
