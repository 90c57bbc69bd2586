//! The semantic ID value type and its string grammar.
//!
//! A semantic ID is written `{namespace}{sep}{collection}{sep}{id}` where
//! `sep` is the configured separator (`.` by default). Parsing splits on the
//! separator at most twice, so an id part that itself contains the separator
//! survives intact.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config;
use crate::error::{Part, SidError};
use crate::provider::{IdProvider, ProviderError};

/// A unique identifier for an entity, made of a namespace, a collection and an id.
///
/// The value with all three parts empty is the nil ID ([`SemanticId::NIL`]).
/// It stands for "no ID" and formats to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticId {
    namespace: String,
    collection: String,
    id: String,
}

impl SemanticId {
    /// The nil ID.
    pub const NIL: SemanticId = SemanticId {
        namespace: String::new(),
        collection: String::new(),
        id: String::new(),
    };

    /// Creates a new ID in the given namespace and collection using the
    /// process-wide provider and separator.
    pub fn new(namespace: &str, collection: &str) -> Result<Self, SidError> {
        config::current().new_id(namespace, collection)
    }

    /// Parses an ID using the process-wide provider and separator, validating
    /// the id part.
    pub fn parse(s: &str) -> Result<Self, SidError> {
        config::current().parse(s, true)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Returns the id part.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Splits the ID into `(namespace, collection, id)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, String) {
        (self.namespace, self.collection, self.id)
    }

    /// Returns true if all three parts are empty.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.namespace.is_empty() && self.collection.is_empty() && self.id.is_empty()
    }

    /// Checks the identity of the ID, given as `namespace.collection`.
    ///
    /// The identity always uses a literal `.` regardless of the configured
    /// separator. The nil ID has no identity.
    ///
    /// ```
    /// let sid = semanticid::must(semanticid::new("auth", "users"));
    /// assert!(sid.is("auth.users"));
    /// assert!(!sid.is("auth.groups"));
    /// ```
    #[must_use]
    pub fn is(&self, identity: &str) -> bool {
        if self.is_nil() {
            return false;
        }

        identity
            .strip_prefix(self.namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            == Some(self.collection.as_str())
    }

    /// Formats the ID with an explicit separator.
    #[must_use]
    pub fn to_string_with(&self, separator: char) -> String {
        if self.is_nil() {
            return String::new();
        }

        format!(
            "{}{separator}{}{separator}{}",
            self.namespace, self.collection, self.id
        )
    }
}

/// Generates a new ID. The provider runs before the parts are checked.
pub(crate) fn generate(
    namespace: &str,
    collection: &str,
    provider: &dyn IdProvider,
    separator: char,
) -> Result<SemanticId, SidError> {
    let id = provider.generate().map_err(|err| {
        debug!(error = %err, "id provider failed to generate an id");
        SidError::Provider(err)
    })?;

    if id.is_empty() {
        return Err(SidError::Provider(ProviderError::new(
            "id provider generated an empty id",
        )));
    }

    if namespace.contains(separator) {
        return Err(SidError::contains_separator(
            Part::Namespace,
            namespace,
            separator,
        ));
    }

    if collection.contains(separator) {
        return Err(SidError::contains_separator(
            Part::Collection,
            collection,
            separator,
        ));
    }

    Ok(SemanticId {
        namespace: namespace.to_string(),
        collection: collection.to_string(),
        id,
    })
}

/// Parses `s` into an ID, optionally validating the id part with `provider`.
pub(crate) fn parse(
    s: &str,
    provider: &dyn IdProvider,
    separator: char,
    validate: bool,
) -> Result<SemanticId, SidError> {
    if s.is_empty() {
        return Err(SidError::Empty);
    }

    let mut parts = s.splitn(3, separator);
    let (Some(namespace), Some(collection), Some(id)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(SidError::Malformed {
            input: s.to_string(),
        });
    };

    if validate {
        provider
            .validate(id)
            .map_err(|source| SidError::InvalidIdPart {
                input: s.to_string(),
                source,
            })?;
    }

    Ok(SemanticId {
        namespace: namespace.to_string(),
        collection: collection.to_string(),
        id: id.to_string(),
    })
}

impl fmt::Display for SemanticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            return Ok(());
        }

        let sep = config::separator();
        write!(f, "{}{sep}{}{sep}{}", self.namespace, self.collection, self.id)
    }
}

impl FromStr for SemanticId {
    type Err = SidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
