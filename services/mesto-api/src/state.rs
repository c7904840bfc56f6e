//! Application state

use std::sync::Arc;

use mesto_auth_core::{
    Argon2Hasher, AuthGuard, AuthService, CardService, JwtCodec, LikeService, PasswordHasher,
    ProfileService, TokenCodec,
};
use mesto_db::{CardRepository, Stores, UserRepository};

use crate::config::{Config, ConfigError};

/// Type aliases for the services over injected store handles
pub type AuthServiceImpl = AuthService<dyn UserRepository>;
pub type ProfileServiceImpl = ProfileService<dyn UserRepository>;
pub type CardServiceImpl = CardService<dyn CardRepository>;
pub type LikeServiceImpl = LikeService<dyn CardRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Registration and login
    pub auth: Arc<AuthServiceImpl>,
    /// Profile reads and updates
    pub profiles: Arc<ProfileServiceImpl>,
    /// Card CRUD with ownership checks
    pub cards: Arc<CardServiceImpl>,
    /// Like toggling
    pub likes: Arc<LikeServiceImpl>,
    /// Bearer token verification
    pub guard: AuthGuard,
    /// Store handles (health checks)
    pub stores: Stores,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state with the default password hasher
    pub fn new(stores: Stores, config: Config) -> Result<Self, ConfigError> {
        Self::with_password_hasher(stores, config, Arc::new(Argon2Hasher::new()))
    }

    /// Create new application state with an explicit password hasher
    pub fn with_password_hasher(
        stores: Stores,
        config: Config,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, ConfigError> {
        let codec: Arc<dyn TokenCodec> = Arc::new(JwtCodec::new(&config.auth)?);

        let auth = AuthService::new(
            config.auth.clone(),
            stores.users.clone(),
            codec.clone(),
            hasher,
        );

        Ok(Self {
            auth: Arc::new(auth),
            profiles: Arc::new(ProfileService::new(stores.users.clone())),
            cards: Arc::new(CardService::new(stores.cards.clone())),
            likes: Arc::new(LikeService::new(stores.cards.clone())),
            guard: AuthGuard::new(codec),
            stores,
            config: Arc::new(config),
        })
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}
