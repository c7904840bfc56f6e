//! Configuration types for auth service

use std::time::Duration;

use crate::AuthError;

/// Minimum signing secret length in bytes (256 bits)
pub const MIN_SECRET_LENGTH: usize = 32;

/// Default token lifetime
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Profile values used when a signup omits them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDefaults {
    pub name: String,
    pub about: String,
    pub avatar: String,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            name: "Jacques-Yves Cousteau".to_string(),
            about: "Explorer".to_string(),
            avatar: "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png"
                .to_string(),
        }
    }
}

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub jwt_secret: String,
    /// How long an issued token stays valid
    pub token_ttl: Duration,
    /// Defaults for optional signup fields
    pub profile_defaults: ProfileDefaults,
}

impl AuthConfig {
    /// Create a new auth config, rejecting secrets shorter than 32 bytes
    pub fn try_new(jwt_secret: impl Into<String>) -> Result<Self, AuthError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            return Err(AuthError::Configuration(format!(
                "JWT secret too short: got {} bytes, need at least {MIN_SECRET_LENGTH}",
                jwt_secret.len()
            )));
        }

        Ok(Self {
            jwt_secret,
            token_ttl: DEFAULT_TOKEN_TTL,
            profile_defaults: ProfileDefaults::default(),
        })
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret_length", &self.jwt_secret.len())
            .field("token_ttl", &self.token_ttl)
            .field("profile_defaults", &self.profile_defaults)
            .finish()
    }
}
