//! Configuration for creating and parsing semantic IDs.
//!
//! A [`Config`] bundles the default namespace, default collection, id
//! provider and separator. Every operation has a form that takes a `Config`
//! explicitly; the free functions at the crate root read the process-wide
//! configuration held here.
//!
//! The process-wide configuration is an atomically swapped snapshot. Readers
//! always see a complete configuration, but it is meant to be set once at
//! start-up: IDs formatted with one separator can't be parsed after the
//! separator changes.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use thiserror::Error;
use tracing::info;

use crate::error::SidError;
use crate::model::{self, SemanticModel};
use crate::provider::{IdProvider, UlidProvider, UuidProvider};
use crate::sid::{self, SemanticId};

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "namespace";

/// Collection used when none is given.
pub const DEFAULT_COLLECTION: &str = "collection";

/// Separator between the three parts of a semantic ID.
pub const DEFAULT_SEPARATOR: char = '.';

/// Errors that can occur when loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The separator is not exactly one character.
    #[error("separator must be a single character, got '{0}'")]
    InvalidSeparator(String),

    /// The provider name is not known.
    #[error("unknown id provider '{0}' (expected 'ulid' or 'uuid')")]
    UnknownProvider(String),

    /// An environment variable is set but isn't valid unicode.
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}

/// Reads an environment variable; only an unset variable is `None`.
fn env_var(key: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
    }
}

/// Defaults for creating and parsing semantic IDs.
#[derive(Debug, Clone)]
pub struct Config {
    pub namespace: String,
    pub collection: String,
    pub provider: Arc<dyn IdProvider>,
    pub separator: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            provider: Arc::new(UlidProvider::new()),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Config {
    /// Loads configuration from `SID_*` environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(namespace) = env_var("SID_NAMESPACE")? {
            config.namespace = namespace;
        }

        if let Some(collection) = env_var("SID_COLLECTION")? {
            config.collection = collection;
        }

        if let Some(separator) = env_var("SID_SEPARATOR")? {
            config.separator = parse_separator(&separator)?;
        }

        if let Some(provider) = env_var("SID_PROVIDER")? {
            config.provider = provider_by_name(&provider)?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    #[must_use]
    pub fn with_provider(self, provider: impl IdProvider + 'static) -> Self {
        self.with_shared_provider(Arc::new(provider))
    }

    #[must_use]
    pub fn with_shared_provider(mut self, provider: Arc<dyn IdProvider>) -> Self {
        self.provider = provider;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Creates a new ID in the given namespace and collection.
    pub fn new_id(&self, namespace: &str, collection: &str) -> Result<SemanticId, SidError> {
        sid::generate(namespace, collection, self.provider.as_ref(), self.separator)
    }

    /// Creates a new ID in the default namespace and collection.
    pub fn new_default(&self) -> Result<SemanticId, SidError> {
        self.new_id(&self.namespace, &self.collection)
    }

    /// Parses an ID, validating the id part with the provider if `validate`
    /// is set.
    pub fn parse(&self, s: &str, validate: bool) -> Result<SemanticId, SidError> {
        sid::parse(s, self.provider.as_ref(), self.separator, validate)
    }

    /// Parses every string in order, stopping at the first failure.
    pub fn parse_all<S: AsRef<str>>(&self, strings: &[S]) -> Result<Vec<SemanticId>, SidError> {
        strings.iter().map(|s| self.parse(s.as_ref(), true)).collect()
    }

    /// Formats an ID with this configuration's separator.
    #[must_use]
    pub fn format(&self, sid: &SemanticId) -> String {
        sid.to_string_with(self.separator)
    }

    /// Returns the collection declared on field `field` of model `M`.
    pub fn collection_for_model_field<M: SemanticModel + ?Sized>(
        &self,
        field: &str,
    ) -> Result<&'static str, SidError> {
        model::declared_collection::<M>(field, self.separator)
    }

    /// Creates a new ID in the default namespace and the collection declared
    /// on `M`'s id field.
    pub fn new_for_model<M: SemanticModel + ?Sized>(&self) -> Result<SemanticId, SidError> {
        let collection = self.collection_for_model_field::<M>(model::DEFAULT_ID_FIELD)?;
        self.new_id(&self.namespace, collection)
    }
}

/// Looks up a built-in provider by name.
pub fn provider_by_name(name: &str) -> Result<Arc<dyn IdProvider>, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "ulid" => Ok(Arc::new(UlidProvider::new())),
        "uuid" => Ok(Arc::new(UuidProvider::new())),
        _ => Err(ConfigError::UnknownProvider(name.to_string())),
    }
}

/// Parses a separator given as text.
pub fn parse_separator(s: &str) -> Result<char, ConfigError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidSeparator(s.to_string())),
    }
}

static CURRENT: LazyLock<ArcSwap<Config>> =
    LazyLock::new(|| ArcSwap::from_pointee(Config::default()));

/// Returns a snapshot of the process-wide configuration.
pub fn current() -> Arc<Config> {
    CURRENT.load_full()
}

/// Returns the process-wide separator.
pub fn separator() -> char {
    CURRENT.load().separator
}

/// Replaces the process-wide configuration.
pub fn replace(config: Config) {
    info!(
        namespace = %config.namespace,
        collection = %config.collection,
        separator = %config.separator,
        provider = ?config.provider,
        "semantic id configuration replaced"
    );
    CURRENT.store(Arc::new(config));
}

/// Applies `f` to a copy of the process-wide configuration and stores the result.
pub fn update(f: impl FnOnce(&mut Config)) {
    let mut next = Config::clone(&CURRENT.load());
    f(&mut next);
    replace(next);
}

/// Restores the process-wide defaults.
pub fn reset() {
    replace(Config::default());
}

pub fn set_default_namespace(namespace: impl Into<String>) {
    let namespace = namespace.into();
    update(|c| c.namespace = namespace);
}

pub fn set_default_collection(collection: impl Into<String>) {
    let collection = collection.into();
    update(|c| c.collection = collection);
}

pub fn set_default_provider(provider: impl IdProvider + 'static) {
    let provider: Arc<dyn IdProvider> = Arc::new(provider);
    update(|c| c.provider = provider);
}

/// Sets the process-wide separator.
///
/// IDs formatted before the change can no longer be parsed afterwards.
pub fn set_separator(separator: char) {
    update(|c| c.separator = separator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.namespace, "namespace");
        assert_eq!(config.collection, "collection");
        assert_eq!(config.separator, '.');

        let sid = config.new_default().unwrap();
        assert_eq!(sid.namespace(), "namespace");
        assert_eq!(sid.collection(), "collection");
        assert!(!sid.id().is_empty());
        assert!(config.format(&sid).starts_with("namespace.collection."));
    }

    #[test]
    fn test_explicit_config_separator() {
        let config = Config::default().with_separator(':');
        let sid = config.new_default().unwrap();
        let s = config.format(&sid);
        assert!(s.starts_with("namespace:collection:"));
        assert_eq!(config.parse(&s, true).unwrap(), sid);

        let err = config.new_id("a:b", "c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PartContainsSeparator);
    }

    #[test]
    fn test_explicit_config_uuid() {
        let config = Config::default()
            .with_namespace("auth")
            .with_collection("users")
            .with_provider(UuidProvider::new());
        let sid = config.new_default().unwrap();
        assert_eq!(config.format(&sid).len(), "auth.users.".len() + 36);
    }

    #[test]
    fn test_parse_all_stops_at_first_failure() {
        let config = Config::default();
        let a = config.format(&config.new_default().unwrap());
        let b = config.format(&config.new_default().unwrap());

        let parsed = config.parse_all(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(config.format(&parsed[0]), a);

        let err = config
            .parse_all(&[a.as_str(), b.as_str(), "broken"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(":"), Ok(':'));
        assert_eq!(parse_separator("é"), Ok('é'));
        assert!(parse_separator("").is_err());
        assert!(parse_separator("::").is_err());
    }

    #[test]
    fn test_provider_by_name() {
        assert_eq!(provider_by_name("ulid").unwrap().name(), "ulid");
        assert_eq!(provider_by_name("UUID").unwrap().name(), "uuid");
        assert_eq!(Config::default().provider.name(), "ulid");
        assert_eq!(
            provider_by_name("snowflake").unwrap_err(),
            ConfigError::UnknownProvider("snowflake".to_string())
        );
    }
}
