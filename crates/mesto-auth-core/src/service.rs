//! Auth service - registration and login

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use mesto_db::{CreateUser, UserRepository};
use mesto_types::User;

use crate::{AuthConfig, AuthError, PasswordHasher, TokenCodec};

/// Signup input, already shape-checked at the boundary
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub about: Option<String>,
    pub avatar: Option<String>,
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// Authentication service
///
/// Issues tokens for registered users. Token verification on later requests
/// is handled by [`crate::AuthGuard`] and needs no store access.
pub struct AuthService<U: UserRepository + ?Sized> {
    config: AuthConfig,
    users: Arc<U>,
    codec: Arc<dyn TokenCodec>,
    hasher: Arc<dyn PasswordHasher>,
    /// Hash verified against when the email is unknown, so both login
    /// failures cost the same
    dummy_hash: OnceCell<String>,
}

impl<U: UserRepository + ?Sized> AuthService<U> {
    /// Create a new auth service
    pub fn new(
        config: AuthConfig,
        users: Arc<U>,
        codec: Arc<dyn TokenCodec>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            config,
            users,
            codec,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new user
    ///
    /// The store's unique email index decides races between concurrent
    /// signups; the loser gets `EmailTaken` and nothing is written.
    pub async fn register(&self, new_user: NewUser) -> Result<User, AuthError> {
        let email = normalize_email(&new_user.email);
        let password_hash = self.hasher.hash(&new_user.password).await?;
        let defaults = &self.config.profile_defaults;

        let create = CreateUser {
            id: uuid::Uuid::new_v4(),
            email,
            password_hash,
            name: new_user.name.unwrap_or_else(|| defaults.name.clone()),
            about: new_user.about.unwrap_or_else(|| defaults.about.clone()),
            avatar: new_user.avatar.unwrap_or_else(|| defaults.avatar.clone()),
        };

        let row = self.users.create(create).await.map_err(|e| {
            if e.is_unique_violation() {
                tracing::debug!("Signup rejected: email already registered");
                metrics::counter!("mesto_signups_total", "result" => "conflict").increment(1);
                AuthError::EmailTaken
            } else {
                AuthError::from(e)
            }
        })?;

        metrics::counter!("mesto_signups_total", "result" => "created").increment(1);
        tracing::info!(user_id = %row.id, "User registered");
        Ok(row.to_profile())
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let start = Instant::now();
        let result = self.authenticate_credentials(email, password).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(AuthError::InvalidCredentials) => "failure",
            Err(_) => "error",
        };
        metrics::counter!("mesto_logins_total", "result" => outcome).increment(1);
        metrics::histogram!("mesto_login_duration_seconds", "result" => outcome)
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn authenticate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let email = normalize_email(email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            self.burn_verification(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.codec.issue(user.user_id())?;
        tracing::info!(user_id = %user.id, expires_at = %issued.expires_at, "User logged in");

        Ok(Session {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.to_profile(),
        })
    }

    async fn burn_verification(&self, password: &str) -> Result<(), AuthError> {
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| self.hasher.hash("mesto-dummy-password"))
            .await?;
        self.hasher.verify(password, dummy).await?;
        Ok(())
    }
}

/// Emails compare case-insensitively; store them lowercased
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<U: UserRepository + ?Sized> std::fmt::Debug for AuthService<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
