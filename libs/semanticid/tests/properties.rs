//! Property tests for the string grammar.
//!
//! These only use explicit configs, never the process-wide one.

use proptest::prelude::*;
use semanticid::{Config, ErrorKind, IdProvider, UlidProvider, UuidProvider};

fn part() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{0,12}"
}

proptest! {
    #[test]
    fn generated_ids_roundtrip(namespace in part(), collection in part(), uuid in any::<bool>()) {
        let config = if uuid {
            Config::default().with_provider(UuidProvider::new())
        } else {
            Config::default().with_provider(UlidProvider::new())
        };

        let sid = config.new_id(&namespace, &collection).unwrap();
        let parsed = config.parse(&config.format(&sid), true).unwrap();

        prop_assert_eq!(parsed.namespace(), namespace.as_str());
        prop_assert_eq!(parsed.collection(), collection.as_str());
        prop_assert!(config.provider.validate(parsed.id()).is_ok());
        prop_assert_eq!(parsed, sid);
    }

    #[test]
    fn id_part_keeps_extra_separators(
        namespace in part(),
        collection in part(),
        id in "[a-z0-9.]{0,24}",
    ) {
        let config = Config::default();
        let input = format!("{namespace}.{collection}.{id}");
        let sid = config.parse(&input, false).unwrap();

        prop_assert_eq!(sid.namespace(), namespace.as_str());
        prop_assert_eq!(sid.collection(), collection.as_str());
        prop_assert_eq!(sid.id(), id.as_str());
    }

    #[test]
    fn fewer_than_two_separators_is_malformed(input in "[a-z0-9]{1,12}(\\.[a-z0-9]{0,12})?") {
        let err = Config::default().parse(&input, false).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn separator_in_part_is_rejected(left in part(), right in part(), other in part()) {
        let config = Config::default();
        let with_separator = format!("{left}.{right}");

        let err = config.new_id(&with_separator, &other).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::PartContainsSeparator);

        let err = config.new_id(&other, &with_separator).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::PartContainsSeparator);
    }

    #[test]
    fn identity_matches_namespace_and_collection(namespace in part(), collection in part()) {
        let sid = Config::default().new_id(&namespace, &collection).unwrap();
        let identity = format!("{namespace}.{collection}");
        let suffixed = format!("{identity}x");

        prop_assert!(sid.is(&identity));
        prop_assert!(!sid.is(&suffixed));
    }
}
