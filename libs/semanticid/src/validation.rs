//! Field validation rules for use with the `validator` crate.
//!
//! Two rules are provided:
//!
//! - [`validate_collection`]: every ID must be non-nil and belong to the
//!   given collection.
//! - [`validate_pattern`]: every ID must match a [`SidPattern`] such as
//!   `auth.users`, `auth.*`, `*.users` or `users` (collection only).
//!
//! Both accept a single ID, an optional ID, a textual ID, or any slice or
//! `Vec` of those. Wire them to a field with `custom(function = ...)`:
//!
//! ```
//! use semanticid::validation::validate_collection;
//! use semanticid::SemanticId;
//! use validator::{Validate, ValidationError};
//!
//! fn users(id: &SemanticId) -> Result<(), ValidationError> {
//!     validate_collection(id, "users")
//! }
//!
//! #[derive(Validate)]
//! struct Session {
//!     #[validate(custom(function = "users"))]
//!     user: SemanticId,
//! }
//!
//! let session = Session { user: semanticid::must(semanticid::new("auth", "users")) };
//! assert!(session.validate().is_ok());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use validator::ValidationError;

use crate::sid::SemanticId;

/// Something that holds zero or more semantic IDs to validate.
pub trait SidTarget {
    /// Returns true if every contained ID is non-nil and satisfies `check`.
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool;
}

impl SidTarget for SemanticId {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        !self.is_nil() && check(self)
    }
}

impl SidTarget for str {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        SemanticId::parse(self).is_ok_and(|sid| sid.all_ids(check))
    }
}

impl SidTarget for String {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        self.as_str().all_ids(check)
    }
}

impl<T: SidTarget> SidTarget for Option<T> {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        self.as_ref().is_some_and(|inner| inner.all_ids(check))
    }
}

impl<T: SidTarget> SidTarget for [T] {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        self.iter().all(|inner| inner.all_ids(check))
    }
}

impl<T: SidTarget> SidTarget for Vec<T> {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        self.as_slice().all_ids(check)
    }
}

impl<T: SidTarget + ?Sized> SidTarget for &T {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        (**self).all_ids(check)
    }
}

impl<T: SidTarget + ?Sized> SidTarget for Box<T> {
    fn all_ids(&self, check: &dyn Fn(&SemanticId) -> bool) -> bool {
        (**self).all_ids(check)
    }
}

/// Requires every ID in `value` to be non-nil and in `collection`.
pub fn validate_collection<T: SidTarget + ?Sized>(
    value: &T,
    collection: &str,
) -> Result<(), ValidationError> {
    if value.all_ids(&|sid| sid.collection() == collection) {
        return Ok(());
    }

    let mut err = ValidationError::new("sidcol").with_message(Cow::Owned(format!(
        "semantic id must belong to collection '{collection}'"
    )));
    err.add_param(Cow::Borrowed("collection"), &collection);
    Err(err)
}

/// Requires every ID in `value` to be non-nil and match `pattern`.
pub fn validate_pattern<T: SidTarget + ?Sized>(
    value: &T,
    pattern: &SidPattern,
) -> Result<(), ValidationError> {
    if value.all_ids(&|sid| pattern.matches(sid)) {
        return Ok(());
    }

    let mut err = ValidationError::new("sidpattern").with_message(Cow::Owned(format!(
        "semantic id must match '{pattern}'"
    )));
    err.add_param(Cow::Borrowed("pattern"), &pattern.to_string());
    Err(err)
}

/// Errors in a pattern's declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern doesn't have one or two dot-separated parts.
    #[error("pattern '{pattern}' must have 1 or 2 dot-separated parts, got {parts}")]
    WrongPartCount { pattern: String, parts: usize },

    /// One of the parts is empty.
    #[error("pattern '{pattern}' has an empty part")]
    EmptyPart { pattern: String },
}

/// A `namespace.collection` pattern where either side may be `*`.
///
/// A single token without a dot matches the collection in any namespace.
///
/// Patterns written in source should be declared as `const` or `static`
/// items, so a malformed one fails the build:
///
/// ```
/// use semanticid::validation::{validate_pattern, SidPattern};
/// use validator::ValidationError;
///
/// const AUTH_ANY: SidPattern = SidPattern::new("auth.*");
///
/// fn auth_subject(id: &String) -> Result<(), ValidationError> {
///     validate_pattern(id, &AUTH_ANY)
/// }
/// # assert!(auth_subject(&"billing.users.x".to_string()).is_err());
/// ```
///
/// ```compile_fail
/// use semanticid::validation::SidPattern;
///
/// const BROKEN: SidPattern = SidPattern::new("a.b.c");
/// let _ = &BROKEN;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SidPattern {
    namespace: Option<Cow<'static, str>>,
    collection: Option<Cow<'static, str>>,
}

impl SidPattern {
    /// Builds a pattern from a literal.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is malformed. In a `const` or `static`
    /// initializer that panic is a compile error. Use [`SidPattern::parse`]
    /// for patterns that come from configuration.
    pub const fn new(pattern: &'static str) -> Self {
        match split_pattern(pattern) {
            Ok((namespace, collection)) => Self {
                namespace: match namespace {
                    Some(namespace) => borrowed(namespace),
                    None => None,
                },
                collection: borrowed(collection),
            },
            Err(Malformed::EmptyPart) => panic!("invalid semantic id pattern: empty part"),
            Err(Malformed::WrongPartCount(_)) => {
                panic!("invalid semantic id pattern: expected 1 or 2 dot-separated parts")
            }
        }
    }

    /// Parses a pattern, reporting malformed input as an error.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        match split_pattern(pattern) {
            Ok((namespace, collection)) => Ok(Self {
                namespace: namespace.and_then(owned),
                collection: owned(collection),
            }),
            Err(Malformed::EmptyPart) => Err(PatternError::EmptyPart {
                pattern: pattern.to_string(),
            }),
            Err(Malformed::WrongPartCount(parts)) => Err(PatternError::WrongPartCount {
                pattern: pattern.to_string(),
                parts,
            }),
        }
    }

    /// Returns true if `sid` is non-nil and matches this pattern.
    pub fn matches(&self, sid: &SemanticId) -> bool {
        if sid.is_nil() {
            return false;
        }

        let namespace_ok = self.namespace.as_deref().is_none_or(|ns| ns == sid.namespace());
        let collection_ok = self
            .collection
            .as_deref()
            .is_none_or(|col| col == sid.collection());
        namespace_ok && collection_ok
    }
}

#[derive(Debug, Clone, Copy)]
enum Malformed {
    EmptyPart,
    WrongPartCount(usize),
}

/// Splits a pattern into its optional namespace and its collection.
const fn split_pattern(pattern: &str) -> Result<(Option<&str>, &str), Malformed> {
    let bytes = pattern.as_bytes();
    if bytes.is_empty() {
        return Err(Malformed::EmptyPart);
    }

    let mut dot = None;
    let mut parts = 1;
    let mut empty = false;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'.' {
            if dot.is_none() {
                dot = Some(i);
            }
            parts += 1;
            if i == 0 || i + 1 == bytes.len() || bytes[i + 1] == b'.' {
                empty = true;
            }
        }
        i += 1;
    }

    if empty {
        return Err(Malformed::EmptyPart);
    }

    match dot {
        None => Ok((None, pattern)),
        Some(_) if parts > 2 => Err(Malformed::WrongPartCount(parts)),
        Some(at) => {
            let (namespace, rest) = bytes.split_at(at);
            let (_, collection) = rest.split_at(1);
            Ok((Some(ascii_split(namespace)), ascii_split(collection)))
        }
    }
}

// Both halves of a split at an ASCII '.' are valid UTF-8.
const fn ascii_split(bytes: &[u8]) -> &str {
    match std::str::from_utf8(bytes) {
        Ok(part) => part,
        Err(_) => panic!("pattern split inside a character"),
    }
}

const fn is_wildcard(part: &str) -> bool {
    let bytes = part.as_bytes();
    bytes.len() == 1 && bytes[0] == b'*'
}

const fn borrowed(part: &'static str) -> Option<Cow<'static, str>> {
    if is_wildcard(part) {
        None
    } else {
        Some(Cow::Borrowed(part))
    }
}

fn owned(part: &str) -> Option<Cow<'static, str>> {
    (!is_wildcard(part)).then(|| Cow::Owned(part.to_string()))
}

impl fmt::Display for SidPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.namespace.as_deref().unwrap_or("*"),
            self.collection.as_deref().unwrap_or("*")
        )
    }
}

impl FromStr for SidPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
