//! Error types for semantic ID construction, parsing, and model lookup.

use std::fmt;

use thiserror::Error;

use crate::provider::ProviderError;

/// Which caller-supplied segment of a semantic ID an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Namespace,
    Collection,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Namespace => write!(f, "namespace"),
            Part::Collection => write!(f, "collection"),
        }
    }
}

/// Errors that can occur when creating, parsing, or resolving semantic IDs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SidError {
    /// The input string is empty.
    #[error("the given string was empty")]
    Empty,

    /// The input does not have the `namespace.collection.id` shape.
    #[error("'{input}' is not a valid semantic id")]
    Malformed { input: String },

    /// The id part was rejected by the id provider.
    #[error("the id part of '{input}' is invalid: {source}")]
    InvalidIdPart {
        input: String,
        #[source]
        source: ProviderError,
    },

    /// A namespace, collection, or declared collection tag contains the separator.
    #[error("{part} '{value}' can't contain the separator ('{separator}')")]
    PartContainsSeparator {
        part: Part,
        value: String,
        separator: char,
    },

    /// The id provider failed to generate an id.
    #[error("id provider failed: {0}")]
    Provider(#[from] ProviderError),

    /// The requested field is not declared on the model.
    #[error("field '{field}' not found on model '{model}'")]
    FieldNotFound { model: &'static str, field: String },

    /// The field exists but does not declare a collection.
    #[error("field '{field}' on model '{model}' did not declare a collection")]
    MissingTag { model: &'static str, field: String },
}

/// Fieldless classification of [`SidError`] for branching on the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Empty,
    Malformed,
    InvalidIdPart,
    PartContainsSeparator,
    ProviderFailure,
    FieldNotFound,
    MissingTag,
}

impl SidError {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SidError::Empty => ErrorKind::Empty,
            SidError::Malformed { .. } => ErrorKind::Malformed,
            SidError::InvalidIdPart { .. } => ErrorKind::InvalidIdPart,
            SidError::PartContainsSeparator { .. } => ErrorKind::PartContainsSeparator,
            SidError::Provider(_) => ErrorKind::ProviderFailure,
            SidError::FieldNotFound { .. } => ErrorKind::FieldNotFound,
            SidError::MissingTag { .. } => ErrorKind::MissingTag,
        }
    }

    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, SidError::Empty)
    }

    /// Returns true if this error was raised while parsing a string.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            SidError::Empty | SidError::Malformed { .. } | SidError::InvalidIdPart { .. }
        )
    }

    /// Returns true if this error came from a model's declared metadata.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            SidError::FieldNotFound { .. } | SidError::MissingTag { .. }
        )
    }

    pub(crate) fn contains_separator(part: Part, value: &str, separator: char) -> Self {
        SidError::PartContainsSeparator {
            part,
            value: value.to_string(),
            separator,
        }
    }
}
