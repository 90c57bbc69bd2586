//! Collection metadata declared on model types.
//!
//! A model declares which collection the IDs in each of its fields belong
//! to. The [`semantic_model!`](crate::semantic_model) macro generates the
//! declaration alongside the struct; the [`SemanticModel`] trait can also be
//! implemented by hand.

use crate::error::{Part, SidError};

/// Field consulted when no field name is given.
pub const DEFAULT_ID_FIELD: &str = "id";

/// A field of a model and the collection it declares, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidField {
    pub name: &'static str,
    pub collection: Option<&'static str>,
}

/// A type whose fields declare semantic ID collections.
pub trait SemanticModel {
    /// Name used in error messages.
    const MODEL_NAME: &'static str;

    /// Every field of the model, tagged or not.
    const SID_FIELDS: &'static [SidField];
}

impl<M: SemanticModel + ?Sized> SemanticModel for &M {
    const MODEL_NAME: &'static str = M::MODEL_NAME;
    const SID_FIELDS: &'static [SidField] = M::SID_FIELDS;
}

impl<M: SemanticModel + ?Sized> SemanticModel for Box<M> {
    const MODEL_NAME: &'static str = M::MODEL_NAME;
    const SID_FIELDS: &'static [SidField] = M::SID_FIELDS;
}

pub(crate) fn declared_collection<M: SemanticModel + ?Sized>(
    field: &str,
    separator: char,
) -> Result<&'static str, SidError> {
    let declared = M::SID_FIELDS
        .iter()
        .find(|f| f.name == field)
        .ok_or_else(|| SidError::FieldNotFound {
            model: M::MODEL_NAME,
            field: field.to_string(),
        })?;

    let collection = declared.collection.ok_or_else(|| SidError::MissingTag {
        model: M::MODEL_NAME,
        field: field.to_string(),
    })?;

    if collection.contains(separator) {
        return Err(SidError::contains_separator(
            Part::Collection,
            collection,
            separator,
        ));
    }

    Ok(collection)
}

/// Declares a struct together with the collections of its ID fields.
///
/// A field followed by `=> "collection"` declares that collection.
///
/// ```
/// use semanticid::{semantic_model, SemanticId};
///
/// semantic_model! {
///     #[derive(Debug, Default)]
///     pub struct Widget {
///         pub id: SemanticId => "widgets",
///         pub owner: SemanticId => "users",
///         pub name: String,
///     }
/// }
///
/// let collection = semanticid::collection_for_model::<Widget>().unwrap();
/// assert_eq!(collection, "widgets");
/// ```
#[macro_export]
macro_rules! semantic_model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $collection:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::SemanticModel for $name {
            const MODEL_NAME: &'static str = stringify!($name);
            const SID_FIELDS: &'static [$crate::SidField] = &[
                $(
                    $crate::SidField {
                        name: stringify!($field),
                        collection: $crate::__sid_collection!($($collection)?),
                    },
                )*
            ];
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sid_collection {
    () => {
        None
    };
    ($collection:literal) => {
        Some($collection)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ErrorKind;
    use crate::semantic_model;
    use crate::sid::SemanticId;

    semantic_model! {
        #[derive(Debug, Default)]
        struct Widget {
            id: SemanticId => "widgets",
            owner: SemanticId => "users",
            /// Free text.
            label: String,
            broken: SemanticId => "bad.tag",
        }
    }

    struct Legacy;

    impl SemanticModel for Legacy {
        const MODEL_NAME: &'static str = "Legacy";
        const SID_FIELDS: &'static [SidField] = &[SidField {
            name: "legacy_id",
            collection: Some("legacy"),
        }];
    }

    #[test]
    fn test_declared_fields() {
        assert_eq!(Widget::MODEL_NAME, "Widget");
        assert_eq!(Widget::SID_FIELDS.len(), 4);
        assert_eq!(Widget::SID_FIELDS[2].collection, None);
        let widget = Widget::default();
        assert!(widget.id.is_nil() && widget.owner.is_nil() && widget.label.is_empty());
    }

    #[test]
    fn test_default_field() {
        let config = Config::default();
        assert_eq!(
            config.collection_for_model_field::<Widget>(DEFAULT_ID_FIELD),
            Ok("widgets")
        );
    }

    #[test]
    fn test_named_field() {
        let config = Config::default();
        assert_eq!(config.collection_for_model_field::<Widget>("owner"), Ok("users"));
        assert_eq!(config.collection_for_model_field::<&Widget>("owner"), Ok("users"));
        assert_eq!(
            config.collection_for_model_field::<Box<Widget>>("owner"),
            Ok("users")
        );
    }

    #[test]
    fn test_field_not_found() {
        let err = Config::default()
            .collection_for_model_field::<Widget>("missing")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);

        let err = Config::default().new_for_model::<Legacy>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldNotFound);
    }

    #[test]
    fn test_missing_tag() {
        let err = Config::default()
            .collection_for_model_field::<Widget>("label")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTag);
    }

    #[test]
    fn test_tag_contains_separator() {
        let config = Config::default();
        let err = config
            .collection_for_model_field::<Widget>("broken")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PartContainsSeparator);

        let colon = config.with_separator(':');
        assert_eq!(
            colon.collection_for_model_field::<Widget>("broken"),
            Ok("bad.tag")
        );
    }

    #[test]
    fn test_new_for_model() {
        let config = Config::default().with_namespace("inventory");
        let sid = config.new_for_model::<Widget>().unwrap();
        assert_eq!(sid.namespace(), "inventory");
        assert_eq!(sid.collection(), "widgets");
        assert!(sid.is("inventory.widgets"));
    }

    #[test]
    fn test_hand_written_model() {
        let config = Config::default();
        assert_eq!(
            config.collection_for_model_field::<Legacy>("legacy_id"),
            Ok("legacy")
        );
    }
}
