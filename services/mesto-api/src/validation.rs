//! Request validation at the HTTP boundary
//!
//! Bodies are deserialized into typed request structs and checked before a
//! handler runs; services only ever see well-formed input.

use std::sync::LazyLock;

use axum::extract::{FromRequest, Request};
use axum::Json;
use regex::Regex;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// Maximum email length (RFC 5321 path limit)
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum password length accepted for hashing
pub const MAX_PASSWORD_LEN: usize = 128;

/// Length bounds for names, bios and card titles
pub const TEXT_MIN_CHARS: usize = 2;
pub const TEXT_MAX_CHARS: usize = 30;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(www\.)?[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*(:\d+)?(/[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]*)?$")
        .expect("url pattern is valid")
});

/// Boundary checks for a request body
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// JSON body that has passed [`Validate`]
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}

pub fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email.trim()) {
        return Err(ApiError::Validation("email must be a valid email address".into()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".into()));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(ApiError::Validation(format!(
            "password too long (max {MAX_PASSWORD_LEN} bytes)"
        )));
    }
    Ok(())
}

/// Check a short text field is 2 to 30 characters after trimming
pub fn validate_text(field: &str, value: &str) -> Result<(), ApiError> {
    let chars = value.trim().chars().count();
    if !(TEXT_MIN_CHARS..=TEXT_MAX_CHARS).contains(&chars) {
        return Err(ApiError::Validation(format!(
            "{field} must be between {TEXT_MIN_CHARS} and {TEXT_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// Check a field is an absolute http(s) URL
pub fn validate_url(field: &str, value: &str) -> Result<(), ApiError> {
    if !URL_RE.is_match(value) {
        return Err(ApiError::Validation(format!("{field} must be a valid http(s) URL")));
    }
    Ok(())
}

/// Parse a path identifier
pub fn parse_id<T: From<Uuid>>(raw: &str) -> Result<T, ApiError> {
    Uuid::parse_str(raw).map(T::from).map_err(|_| ApiError::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesto_types::CardId;
    use proptest::prelude::*;

    #[test]
    fn test_emails() {
        for ok in ["a@x.com", "first.last+tag@mail.example.org"] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
        for bad in ["", "a", "a@", "@x.com", "a@x", "a b@x.com", "a@x..com", "a@@x.com"] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
        assert!(validate_email(&format!("{}@x.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_text_bounds_count_characters() {
        assert!(validate_text("name", "Jo").is_ok());
        assert!(validate_text("name", &"я".repeat(30)).is_ok());
        assert!(validate_text("name", "J").is_err());
        assert!(validate_text("name", "  J  ").is_err());
        assert!(validate_text("name", &"a".repeat(31)).is_err());
    }

    #[test]
    fn test_urls() {
        for ok in [
            "https://example.com",
            "http://www.example.com/a/b.png",
            "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png",
            "https://example.com:8443/x?y=1#z",
        ] {
            assert!(validate_url("link", ok).is_ok(), "{ok}");
        }
        for bad in ["", "example.com", "ftp://example.com", "https://", "https://exa mple.com", "javascript:alert(1)"] {
            assert!(validate_url("link", bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_passwords() {
        assert!(validate_password("x").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_parse_id() {
        let id = uuid::Uuid::new_v4();
        let parsed: CardId = parse_id(&id.to_string()).unwrap();
        assert_eq!(parsed.0, id);
        assert!(matches!(parse_id::<CardId>("123"), Err(ApiError::InvalidId)));
    }

    proptest! {
        /// Any text of 2..=30 non-space characters is accepted, longer is not
        #[test]
        fn prop_text_length_rule(s in "[a-zA-Zа-я0-9]{2,30}", extra in "[a-z]{31,40}") {
            prop_assert!(validate_text("name", &s).is_ok());
            prop_assert!(validate_text("name", &extra).is_err());
        }

        /// Validators never panic on arbitrary input
        #[test]
        fn prop_validators_total(s in ".*") {
            let _ = validate_email(&s);
            let _ = validate_url("link", &s);
            let _ = validate_text("name", &s);
            let _ = parse_id::<CardId>(&s);
        }
    }
}
