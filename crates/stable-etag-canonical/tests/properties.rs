use proptest::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use stable_etag_canonical::{compute_identifier, compute_identifier_from_value, stable_stringify};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        // Quarter steps are exact in binary, so reparsing is lossless.
        (-4000i32..4000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-z\u{e9}\"\\\\\n]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z0-9_]{1,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Serializes entries as a map in exactly the given order.
struct OrderedEntries(Vec<(String, Value)>);

impl Serialize for OrderedEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

proptest! {
    #[test]
    fn entry_order_never_changes_tag(
        entries in prop::collection::btree_map("[a-z]{1,4}", arb_value(), 0..8)
    ) {
        let forward: Vec<(String, Value)> = entries.into_iter().collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = compute_identifier(&OrderedEntries(forward)).unwrap();
        let b = compute_identifier(&OrderedEntries(reversed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn canonical_text_is_valid_json_for_the_same_value(value in arb_value()) {
        let text = stable_stringify(&value).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(&reparsed, &value);
        prop_assert_eq!(stable_stringify(&reparsed).unwrap(), text);
    }

    #[test]
    fn tags_always_have_weak_shape(value in arb_value()) {
        let etag = compute_identifier_from_value(&value).unwrap();
        let s = etag.as_str();
        prop_assert_eq!(s.len(), 48);
        prop_assert!(s.starts_with("W/\""));
        prop_assert!(s.ends_with("=\""));
        prop_assert!(!s.ends_with("==\""));
    }

    #[test]
    fn wrapping_a_value_changes_its_tag(value in arb_value()) {
        let wrapped = Value::Array(vec![value.clone()]);
        prop_assert_ne!(
            compute_identifier_from_value(&value).unwrap(),
            compute_identifier_from_value(&wrapped).unwrap()
        );
    }
}
