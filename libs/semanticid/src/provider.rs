//! Id providers generate and validate the id part of a semantic ID.
//!
//! The provider only owns the last segment. Swapping providers changes what
//! that segment looks like but never the `namespace.collection.id` grammar
//! around it.

use std::fmt;

use thiserror::Error;
use ulid::Ulid;
use uuid::Uuid;

/// Failure reported by an [`IdProvider`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    /// Creates a provider error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ulid::DecodeError> for ProviderError {
    fn from(err: ulid::DecodeError) -> Self {
        Self::new(format!("invalid ULID: {err}"))
    }
}

impl From<uuid::Error> for ProviderError {
    fn from(err: uuid::Error) -> Self {
        Self::new(format!("invalid UUID: {err}"))
    }
}

/// Generates and validates the id part of semantic IDs.
///
/// `validate` must accept every string `generate` can return, and must not
/// have side effects. `generate` must never succeed with an empty string.
pub trait IdProvider: fmt::Debug + Send + Sync {
    /// Generates a fresh id.
    fn generate(&self) -> Result<String, ProviderError>;

    /// Checks that an existing id is acceptable to this provider.
    fn validate(&self, id: &str) -> Result<(), ProviderError>;

    /// Short name shown in configuration output.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Time-seeded, lexicographically sortable ids.
///
/// This is the default provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UlidProvider;

impl UlidProvider {
    pub const fn new() -> Self {
        Self
    }
}

impl IdProvider for UlidProvider {
    fn generate(&self) -> Result<String, ProviderError> {
        Ok(Ulid::new().to_string())
    }

    fn validate(&self, id: &str) -> Result<(), ProviderError> {
        Ulid::from_string(id)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "ulid"
    }
}

/// Random (v4) UUIDs in canonical hyphenated form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidProvider;

impl UuidProvider {
    pub const fn new() -> Self {
        Self
    }
}

impl IdProvider for UuidProvider {
    fn generate(&self) -> Result<String, ProviderError> {
        Ok(Uuid::new_v4().hyphenated().to_string())
    }

    fn validate(&self, id: &str) -> Result<(), ProviderError> {
        Uuid::parse_str(id)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "uuid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulid_generate_validates() {
        let provider = UlidProvider::new();
        let id = provider.generate().unwrap();
        assert_eq!(id.len(), 26);
        assert!(provider.validate(&id).is_ok());
        assert!(Ulid::from_string(&id).is_ok());
    }

    #[test]
    fn test_ulid_rejects_invalid() {
        let provider = UlidProvider::new();
        assert!(provider.validate("1234").is_err());
        assert!(provider.validate("").is_err());
        assert!(provider.validate(&Ulid::new().to_string()).is_ok());
    }

    #[test]
    fn test_ulid_sortable() {
        let provider = UlidProvider::new();
        let first = provider.generate().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = provider.generate().unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_uuid_generate_validates() {
        let provider = UuidProvider::new();
        let id = provider.generate().unwrap();
        assert_eq!(id.len(), 36);
        assert!(id
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert!(provider.validate(&id).is_ok());
    }

    #[test]
    fn test_uuid_rejects_invalid() {
        let provider = UuidProvider::new();
        assert!(provider.validate("1234").is_err());
        assert!(provider.validate("not-a-uuid").is_err());
        assert!(provider.validate(&Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn test_providers_are_not_interchangeable() {
        let ulid = UlidProvider::new().generate().unwrap();
        let uuid = UuidProvider::new().generate().unwrap();
        assert!(UuidProvider::new().validate(&ulid).is_err());
        assert!(UlidProvider::new().validate(&uuid).is_err());
    }

    #[test]
    fn test_provider_error_message() {
        let err = UuidProvider::new().validate("nope").unwrap_err();
        assert!(err.message().starts_with("invalid UUID"));
    }
}
