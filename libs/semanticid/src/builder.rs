//! Fluent construction and parsing of semantic IDs.

use std::sync::Arc;

use crate::config::{self, Config};
use crate::error::SidError;
use crate::provider::IdProvider;
use crate::sid::SemanticId;

/// Builds a single semantic ID, either fresh or parsed from a string.
///
/// Starts from the process-wide configuration with validation enabled.
/// When a non-empty source string is set, [`build`](Builder::build) parses it
/// and ignores the namespace and collection overrides.
///
/// ```
/// use semanticid::{Builder, UuidProvider};
///
/// let sid = Builder::new()
///     .with_namespace("auth")
///     .with_collection("users")
///     .with_provider(UuidProvider::new())
///     .build()
///     .unwrap();
/// assert!(sid.is("auth.users"));
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Builder {
    config: Config,
    from: Option<String>,
    validate: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Creates a builder from the process-wide configuration.
    pub fn new() -> Self {
        Self::with_config(Config::clone(&config::current()))
    }

    /// Creates a builder from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            from: None,
            validate: true,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = namespace.into();
        self
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.config.collection = collection.into();
        self
    }

    pub fn with_provider(self, provider: impl IdProvider + 'static) -> Self {
        self.with_shared_provider(Arc::new(provider))
    }

    pub fn with_shared_provider(mut self, provider: Arc<dyn IdProvider>) -> Self {
        self.config.provider = provider;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    /// Parses `s` instead of generating a new ID.
    pub fn from_string(mut self, s: impl Into<String>) -> Self {
        self.from = Some(s.into());
        self
    }

    /// Skips provider validation of the id part when parsing.
    pub fn no_validate(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Creates or parses the ID.
    pub fn build(self) -> Result<SemanticId, SidError> {
        match self.from.as_deref() {
            Some(s) if !s.is_empty() => self.config.parse(s, self.validate),
            _ => self.config.new_default(),
        }
    }
}
