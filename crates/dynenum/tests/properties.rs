use dynenum::{EnumContainer, EnumPolicy, normalize_key};
use proptest::prelude::*;
use serde_json::json;

fn pairs() -> impl Strategy<Value = Vec<(String, i64)>> {
    prop::collection::vec(("[a-zA-Z][a-zA-Z ]{0,10}", any::<i64>()), 0..16)
}

proptest! {
    #[test]
    fn repeated_key_keeps_first_value(
        key in "[a-zA-Z][a-zA-Z ]{0,10}",
        first in any::<i64>(),
        second in any::<i64>()
    ) {
        let mut e = EnumContainer::new();
        e.add(vec![(key.as_str(), first)]).unwrap();
        e.add(vec![(key.as_str(), second)]).unwrap();

        let stored = normalize_key(&key, false);
        prop_assert_eq!(e.value_with_case(&stored, true).unwrap(), &json!(first));
        prop_assert_eq!(e.count(), 1);
    }

    #[test]
    fn stored_keys_are_normalized(entries in pairs(), capitalize in any::<bool>()) {
        let mut e = EnumContainer::with_policy(EnumPolicy::new().with_capitalize(capitalize));
        e.add(entries.clone()).unwrap();

        for key in e.keys() {
            prop_assert!(!key.contains(' '));
            if capitalize {
                prop_assert_eq!(key.to_ascii_uppercase(), key);
            }
        }
        prop_assert!(e.count() <= entries.len());
    }

    #[test]
    fn serialize_round_trip(entries in pairs(), words in prop::collection::vec("[a-z ]{1,6}", 0..8)) {
        let mut e = EnumContainer::new();
        e.add(entries).unwrap();
        e.add(words.iter().map(String::as_str).collect::<Vec<_>>()).unwrap();

        let restored = EnumContainer::from_serialized(&e.serialize().unwrap()).unwrap();
        prop_assert_eq!(restored.values(), e.values());
    }

    #[test]
    fn case_insensitive_lookup_ignores_case(key in "[a-z_]{1,10}", value in any::<i64>()) {
        let mut e = EnumContainer::new();
        e.add(vec![(key.as_str(), value)]).unwrap();

        let upper = key.to_ascii_uppercase();
        prop_assert_eq!(e.value(&key).unwrap(), e.value(&upper).unwrap());
        prop_assert!(e.has(&upper));
    }

    #[test]
    fn reset_always_empties(entries in pairs(), case_sensitive in any::<bool>(), capitalize in any::<bool>()) {
        let mut e = EnumContainer::new();
        e.add(entries).unwrap();
        e.reset_with(case_sensitive, capitalize);

        prop_assert_eq!(e.count(), 0);
        prop_assert_eq!(e.is_case_sensitive(), case_sensitive);
        prop_assert_eq!(e.capitalizes(), capitalize);
    }
}
