//! BSON conversions for semantic IDs.
//!
//! The nil ID (and a missing optional ID) is stored as `null`; any other ID
//! as its string form. Reading accepts `null` and `undefined` as the nil ID
//! and parses strings with full validation. The serde impls produce the same
//! shapes through `bson::to_bson`.
//!
//! `Bson::from(&sid)` goes through bson's `From<&T>` impl for cloneable
//! values, so only the owned conversion is implemented here.
//!
//! Enabled by the default `bson` feature.

use ::bson::Bson;
use thiserror::Error;

use crate::error::SidError;
use crate::sid::SemanticId;

/// Errors that can occur when decoding a semantic ID from BSON.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BsonError {
    /// The stored value is neither a string nor null.
    #[error("cannot decode {0} into a semantic id")]
    UnexpectedType(String),

    /// The stored string is not a valid semantic ID.
    #[error(transparent)]
    Sid(#[from] SidError),
}

/// Encodes an ID.
pub fn to_bson(sid: &SemanticId) -> Bson {
    if sid.is_nil() {
        Bson::Null
    } else {
        Bson::String(sid.to_string())
    }
}

/// Encodes an optional ID. `None` and the nil ID are both `null`.
pub fn to_bson_opt(sid: Option<&SemanticId>) -> Bson {
    sid.map_or(Bson::Null, to_bson)
}

/// Decodes an ID.
pub fn from_bson(value: &Bson) -> Result<SemanticId, BsonError> {
    match value {
        Bson::Null | Bson::Undefined => Ok(SemanticId::NIL),
        Bson::String(s) => Ok(SemanticId::parse(s)?),
        other => Err(BsonError::UnexpectedType(format!(
            "{:?}",
            other.element_type()
        ))),
    }
}

/// Decodes an optional ID. `null`, `undefined` and the nil ID become `None`.
pub fn from_bson_opt(value: &Bson) -> Result<Option<SemanticId>, BsonError> {
    let sid = from_bson(value)?;
    Ok((!sid.is_nil()).then_some(sid))
}

impl From<SemanticId> for Bson {
    fn from(sid: SemanticId) -> Self {
        to_bson(&sid)
    }
}

impl TryFrom<Bson> for SemanticId {
    type Error = BsonError;

    fn try_from(value: Bson) -> Result<Self, Self::Error> {
        from_bson(&value)
    }
}

#[cfg(test)]
mod tests {
    use ::bson::doc;

    use super::*;
    use crate::config::Config;
    use crate::error::ErrorKind;

    fn new_sid() -> SemanticId {
        Config::default().new_default().unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let sid = new_sid();
        let value = Bson::from(&sid);
        assert_eq!(value, Bson::String(sid.to_string()));
        assert_eq!(SemanticId::try_from(value).unwrap(), sid);
    }

    #[test]
    fn test_nil_is_null() {
        assert_eq!(to_bson(&SemanticId::NIL), Bson::Null);
        assert_eq!(to_bson_opt(None), Bson::Null);
        assert_eq!(to_bson_opt(Some(&SemanticId::NIL)), Bson::Null);

        assert!(from_bson(&Bson::Null).unwrap().is_nil());
        assert!(from_bson(&Bson::Undefined).unwrap().is_nil());
        assert_eq!(from_bson_opt(&Bson::Null).unwrap(), None);
    }

    #[test]
    fn test_optional_roundtrip() {
        let sid = new_sid();
        let value = to_bson_opt(Some(&sid));
        assert_eq!(from_bson_opt(&value).unwrap(), Some(sid));
    }

    #[test]
    fn test_wrong_type() {
        let err = from_bson(&Bson::Int32(7)).unwrap_err();
        assert!(matches!(err, BsonError::UnexpectedType(_)));
    }

    #[test]
    fn test_invalid_string() {
        match from_bson(&Bson::String("a.b.1234".to_string())).unwrap_err() {
            BsonError::Sid(err) => assert_eq!(err.kind(), ErrorKind::InvalidIdPart),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_serde_matches_manual_encoding() {
        let sid = new_sid();
        assert_eq!(::bson::to_bson(&sid).unwrap(), to_bson(&sid));
        assert_eq!(::bson::to_bson(&SemanticId::NIL).unwrap(), Bson::Null);

        let document = doc! { "id": to_bson(&sid), "owner": Bson::Null };
        assert_eq!(from_bson(document.get("id").unwrap()).unwrap(), sid);
        assert!(from_bson(document.get("owner").unwrap()).unwrap().is_nil());
    }
}
