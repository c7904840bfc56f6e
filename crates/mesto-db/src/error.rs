//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// A unique constraint rejected the write
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Migration failure at startup
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Store cannot be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Record not found
    #[error("record not found")]
    NotFound,
}

impl DbError {
    /// Whether this error came from a unique index
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }

        match err {
            sqlx::Error::RowNotFound => Self::NotFound,
            other => Self::Sqlx(other),
        }
    }
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
