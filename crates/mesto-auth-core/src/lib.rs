//! Mesto Auth Core - Authentication and authorization business logic
//!
//! Registration and login, stateless bearer-token verification,
//! owner-scoped card mutations and the atomic like toggle.
//!
//! Every service takes its store handle explicitly, so the same code runs
//! against Postgres in production and `mesto_db::memory::MemoryStore` in
//! tests.

pub mod cards;
pub mod config;
pub mod error;
pub mod guard;
pub mod likes;
pub mod password;
pub mod profile;
pub mod service;
pub mod token;

pub use cards::{ensure_owner, CardService, CardUpdate, NewCard};
pub use config::{AuthConfig, ProfileDefaults};
pub use error::{AuthError, ErrorKind};
pub use guard::{AuthGuard, Identity};
pub use likes::LikeService;
pub use password::{Argon2Hasher, PasswordHasher};
pub use profile::{ProfileService, ProfileUpdate};
pub use service::{AuthService, NewUser, Session};
pub use token::{IssuedToken, JwtCodec, TokenClaims, TokenCodec};
