//! Common test utilities for mesto-auth-core integration tests

use std::sync::Arc;

use mesto_auth_core::{
    AuthConfig, AuthGuard, AuthService, CardService, Identity, JwtCodec, LikeService, NewCard,
    NewUser, TokenCodec,
};
use mesto_db::memory::MemoryStore;
use mesto_types::Card;

pub const TEST_SECRET: &str = "integration-secret-integration-secret";

/// Services wired against one shared in-memory store
#[allow(dead_code)]
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub codec: Arc<JwtCodec>,
    pub auth: AuthService<MemoryStore>,
    pub guard: AuthGuard,
    pub cards: CardService<MemoryStore>,
    pub likes: LikeService<MemoryStore>,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        let config = AuthConfig::try_new(TEST_SECRET).unwrap();
        let store = Arc::new(MemoryStore::new());
        let codec = Arc::new(JwtCodec::new(&config).unwrap());
        let hasher = Arc::new(mesto_auth_core::Argon2Hasher::with_params(1024, 1, 1).unwrap());

        Self {
            auth: AuthService::new(config, store.clone(), codec.clone(), hasher),
            guard: AuthGuard::new(codec.clone()),
            cards: CardService::new(store.clone()),
            likes: LikeService::new(store.clone()),
            codec,
            store,
        }
    }

    /// Register a user and return an identity as if they had logged in
    pub async fn user(&self, email: &str) -> Identity {
        let user = self.auth.register(new_user(email, "password1")).await.unwrap();
        let issued = self.codec.issue(user.id).unwrap();
        self.guard.verify_token(&issued.token).unwrap()
    }

    pub async fn card(&self, owner: &Identity, name: &str) -> Card {
        self.cards
            .create_card(
                owner,
                NewCard {
                    name: name.to_string(),
                    link: format!("https://example.com/{name}.jpg"),
                },
            )
            .await
            .unwrap()
    }
}

#[allow(dead_code)]
pub fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: password.to_string(),
        name: None,
        about: None,
        avatar: None,
    }
}
