//! Configuration for the Mesto API service.

use std::time::Duration;

use axum::http::HeaderValue;
use mesto_auth_core::{AuthConfig, AuthError};

/// Mesto API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Auth core configuration
    pub auth: AuthConfig,
    /// Request timeout
    pub request_timeout: Duration,
    /// Database pool size
    pub db_max_connections: u32,
    /// Allowed CORS origins; empty allows any
    pub cors_allowed_origins: Vec<HeaderValue>,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
    /// Expose Prometheus metrics on `/metrics`
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;

        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", true)?;

        // Server
        let http_port = parse_or(&lookup, "HTTP_PORT", 3000)?;

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        // Metrics
        let metrics_enabled = parse_or(&lookup, "METRICS_ENABLED", true)?;

        // Auth
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let token_ttl_days: u64 = parse_or(&lookup, "TOKEN_TTL_DAYS", 7)?;
        if token_ttl_days == 0 {
            return Err(ConfigError::Invalid("TOKEN_TTL_DAYS"));
        }

        let token_ttl_secs = token_ttl_days
            .checked_mul(24 * 60 * 60)
            .ok_or(ConfigError::Invalid("TOKEN_TTL_DAYS"))?;

        let auth =
            AuthConfig::try_new(jwt_secret)?.with_token_ttl(Duration::from_secs(token_ttl_secs));

        // CORS
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGINS"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            http_port,
            database_url,
            auth,
            request_timeout: Duration::from_secs(request_timeout_secs),
            db_max_connections,
            cors_allowed_origins,
            run_migrations,
            metrics_enabled,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid auth configuration: {0}")]
    Auth(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "config-secret-config-secret-config-secret";

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://db"), ("JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(config.http_port, 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(7 * 24 * 3600));
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.run_migrations);
        assert!(config.metrics_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db"),
            ("JWT_SECRET", SECRET),
            ("HTTP_PORT", "8080"),
            ("TOKEN_TTL_DAYS", "1"),
            ("RUN_MIGRATIONS", "false"),
            ("METRICS_ENABLED", "false"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();

        assert_eq!(config.http_port, 8080);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(24 * 3600));
        assert!(!config.run_migrations);
        assert!(!config.metrics_enabled);
        assert_eq!(config.cors_allowed_origins.len(), 2);
    }

    #[test]
    fn test_missing_and_invalid() {
        assert!(matches!(
            load(&[("JWT_SECRET", SECRET)]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            load(&[("DATABASE_URL", "postgres://db")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
        assert!(matches!(
            load(&[
                ("DATABASE_URL", "postgres://db"),
                ("JWT_SECRET", SECRET),
                ("HTTP_PORT", "http")
            ]),
            Err(ConfigError::Invalid("HTTP_PORT"))
        ));
        assert!(matches!(
            load(&[
                ("DATABASE_URL", "postgres://db"),
                ("JWT_SECRET", SECRET),
                ("TOKEN_TTL_DAYS", "0")
            ]),
            Err(ConfigError::Invalid("TOKEN_TTL_DAYS"))
        ));
    }

    #[test]
    fn test_huge_token_ttl_rejected() {
        assert!(matches!(
            load(&[
                ("DATABASE_URL", "postgres://db"),
                ("JWT_SECRET", SECRET),
                ("TOKEN_TTL_DAYS", "300000000000000000")
            ]),
            Err(ConfigError::Invalid("TOKEN_TTL_DAYS"))
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(matches!(
            load(&[("DATABASE_URL", "postgres://db"), ("JWT_SECRET", "short")]),
            Err(ConfigError::Auth(AuthError::Configuration(_)))
        ));
    }
}
