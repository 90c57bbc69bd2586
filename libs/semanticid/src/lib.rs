//! # semanticid
//!
//! Human-readable, globally unique identifiers made of three parts:
//! a namespace, a collection and an opaque id.
//!
//! ## ID Format
//!
//! `{namespace}.{collection}.{id}`
//!
//! Examples:
//! - `auth.users.01HV4Z2WQXKJNM8GPQY6VBKC3D` (ULID provider, the default)
//! - `billing.invoices.4c7d9a52-6a6e-4c36-9f0e-0f2f5d3b1e7a` (UUID provider)
//!
//! The separator is configurable. Namespace and collection may never
//! contain it; the id part may, since parsing splits at most twice.
//! The empty string is the nil ID.
//!
//! ## Design Principles
//!
//! - IDs are plain immutable values; parse and format are pure
//! - The id part is owned by a pluggable [`IdProvider`]
//! - Every failure is a classified [`SidError`], never a half-built ID
//! - Defaults live in a [`Config`]; the functions at the crate root use the
//!   process-wide one, everything else can take a `Config` explicitly
//!
//! ## Features
//!
//! - `bson` (default): conversions to and from `bson::Bson`. Build with
//!   `default-features = false` to drop the dependency.

mod builder;
mod codec;
pub mod config;
mod error;
mod model;
mod provider;
mod sid;
pub mod validation;

#[cfg(feature = "bson")]
pub mod bson;

pub use builder::Builder;
pub use config::Config;
pub use error::{ErrorKind, Part, SidError};
pub use model::{SemanticModel, SidField, DEFAULT_ID_FIELD};
pub use provider::{IdProvider, ProviderError, UlidProvider, UuidProvider};
pub use sid::SemanticId;

/// Creates a new ID in the given namespace and collection.
pub fn new(namespace: &str, collection: &str) -> Result<SemanticId, SidError> {
    config::current().new_id(namespace, collection)
}

/// Creates a new ID in the default namespace and the given collection.
pub fn new_with_collection(collection: &str) -> Result<SemanticId, SidError> {
    let config = config::current();
    config.new_id(&config.namespace, collection)
}

/// Creates a new ID in the given namespace and the default collection.
pub fn new_with_namespace(namespace: &str) -> Result<SemanticId, SidError> {
    let config = config::current();
    config.new_id(namespace, &config.collection)
}

/// Creates a new ID in the default namespace and collection.
pub fn new_default() -> Result<SemanticId, SidError> {
    config::current().new_default()
}

/// Parses an ID, validating its id part with the default provider.
pub fn parse(s: &str) -> Result<SemanticId, SidError> {
    config::current().parse(s, true)
}

/// Parses every string in order, returning the first error if any fails.
///
/// No partial results are returned on error.
pub fn parse_all<S: AsRef<str>>(strings: &[S]) -> Result<Vec<SemanticId>, SidError> {
    config::current().parse_all(strings)
}

/// Returns a fluent builder starting from the process-wide configuration.
pub fn builder() -> Builder {
    Builder::new()
}

/// Unwraps the result of creating or parsing an ID.
///
/// # Panics
///
/// Panics if `result` is an error. Meant for tests and static
/// initialization, where a failure can't be handled anyway.
#[track_caller]
pub fn must(result: Result<SemanticId, SidError>) -> SemanticId {
    match result {
        Ok(sid) => sid,
        Err(err) => panic!("semantic id error: {err}"),
    }
}

/// Returns the collection declared on `M`'s `id` field.
pub fn collection_for_model<M: SemanticModel + ?Sized>() -> Result<&'static str, SidError> {
    collection_for_model_field::<M>(DEFAULT_ID_FIELD)
}

/// Returns the collection declared on the given field of `M`.
pub fn collection_for_model_field<M: SemanticModel + ?Sized>(
    field: &str,
) -> Result<&'static str, SidError> {
    config::current().collection_for_model_field::<M>(field)
}

/// Returns the collection declared on the `id` field of `model`'s type.
pub fn collection_of<M: SemanticModel>(_model: &M) -> Result<&'static str, SidError> {
    collection_for_model::<M>()
}

/// Creates a new ID in the default namespace and `M`'s declared collection.
pub fn new_for_model<M: SemanticModel + ?Sized>() -> Result<SemanticId, SidError> {
    config::current().new_for_model::<M>()
}
