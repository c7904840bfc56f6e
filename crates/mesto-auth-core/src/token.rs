//! Session token signing and verification
//!
//! Tokens are HS256 JWTs carrying `sub`, `iat` and `exp`. Validity depends
//! only on the signature and `exp`; nothing is stored server-side.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use mesto_types::UserId;

use crate::{AuthConfig, AuthError};

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl TokenClaims {
    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Parse the subject as a user ID
    pub fn user_id(&self) -> Result<UserId, AuthError> {
        UserId::parse(&self.sub).map_err(|_| AuthError::InvalidToken)
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Result<DateTime<Utc>, AuthError> {
        DateTime::from_timestamp(self.exp, 0).ok_or(AuthError::InvalidToken)
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens
pub trait TokenCodec: Send + Sync {
    /// Issue a token for `subject` expiring after the configured horizon
    fn issue(&self, subject: UserId) -> Result<IssuedToken, AuthError>;

    /// Check signature and expiry, returning the claims
    ///
    /// Fails with `TokenExpired` for a correctly signed but expired token
    /// and `InvalidToken` for everything else.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// HS256 JWT codec
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl JwtCodec {
    /// Create a codec from the auth config
    pub fn new(config: &AuthConfig) -> Result<Self, AuthError> {
        let ttl = chrono::Duration::from_std(config.token_ttl)
            .map_err(|e| AuthError::Configuration(format!("token ttl out of range: {e}")))?;
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(AuthError::Configuration(
                "token ttl overflows the timestamp range".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Issue a token as if signed at `issued_at`
    pub fn issue_at(
        &self,
        subject: UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign token: {}", e);
                AuthError::Internal("Failed to sign token".to_string())
            })?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, subject: UserId) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })?;

        let claims = token_data.claims;

        // Double check, jsonwebtoken should catch this
        if claims.is_expired() {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
