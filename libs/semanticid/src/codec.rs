//! Serde support.
//!
//! The nil ID serializes as none (`null` in JSON); any other ID as its
//! string form. Deserializing accepts none (or a missing field) as the nil
//! ID and parses strings with full validation against the process-wide
//! configuration.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::sid::SemanticId;

impl Serialize for SemanticId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_nil() {
            serializer.serialize_none()
        } else {
            serializer.collect_str(self)
        }
    }
}

impl<'de> Deserialize<'de> for SemanticId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(SemanticId::NIL),
            Some(s) => SemanticId::parse(&s).map_err(D::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;
    use crate::config::Config;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Record {
        id: SemanticId,
    }

    fn new_sid() -> SemanticId {
        Config::default().new_default().unwrap()
    }

    #[test]
    fn test_json_roundtrip() {
        let sid = new_sid();
        let json = serde_json::to_string(&sid).unwrap();
        assert_eq!(json, format!("\"{}\"", Config::default().format(&sid)));

        let parsed: SemanticId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sid);
    }

    #[test]
    fn test_nil_is_null() {
        assert_eq!(serde_json::to_string(&SemanticId::NIL).unwrap(), "null");

        let parsed: SemanticId = serde_json::from_str("null").unwrap();
        assert!(parsed.is_nil());
    }

    #[test]
    fn test_struct_field() {
        let record = Record { id: new_sid() };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["id"].is_string());
        assert_eq!(serde_json::from_value::<Record>(json).unwrap(), record);

        let empty = Record {
            id: SemanticId::NIL,
        };
        assert_eq!(serde_json::to_string(&empty).unwrap(), r#"{"id":null}"#);
    }

    #[test]
    fn test_missing_field_is_nil() {
        let record: Record = serde_json::from_str("{}").unwrap();
        assert!(record.id.is_nil());
    }

    #[test]
    fn test_invalid_string() {
        let err = serde_json::from_str::<SemanticId>(r#""a.b.not-a-ulid""#).unwrap_err();
        assert!(err.to_string().contains("a.b.not-a-ulid"));

        assert!(serde_json::from_str::<SemanticId>(r#""""#).is_err());
        assert!(serde_json::from_str::<SemanticId>(r#""a.b""#).is_err());
    }

    #[test]
    fn test_wrong_type() {
        assert!(serde_json::from_str::<SemanticId>("42").is_err());
        assert!(serde_json::from_str::<SemanticId>("{}").is_err());
        assert!(serde_json::from_str::<SemanticId>("[]").is_err());
    }
}
