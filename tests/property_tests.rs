//! Property-based tests for the codec guarantees: binary round-trip,
//! canonical byte-equality, and text round-trip over generated value trees.

use koda::{decode, encode, from_str, parse, stringify, to_string, KodaMap, Value};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

/// Bounded tree of KODA values. Floats are kept finite so trees compare
/// with ordinary equality; bit-level NaN handling is covered by unit tests.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
        ".{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,8}", inner), 0..6).prop_map(|entries| {
                let mut object = KodaMap::new();
                for (key, value) in entries {
                    object.insert(key, value);
                }
                Value::Object(object)
            }),
        ]
    })
}

/// The same tree with every object's insertion order reversed.
fn reversed(value: &Value) -> Value {
    match value {
        Value::Array(arr) => Value::Array(arr.iter().map(reversed).collect()),
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj
                .iter()
                .map(|(k, v)| (k.clone(), reversed(v)))
                .collect();
            entries.reverse();
            Value::Object(entries.into_iter().collect())
        }
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn prop_binary_roundtrip(value in arb_value()) {
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn prop_canonical_encoding(value in arb_value()) {
        let permuted = reversed(&value);
        prop_assert_eq!(encode(&value).unwrap(), encode(&permuted).unwrap());
    }

    #[test]
    fn prop_text_roundtrip(value in arb_value()) {
        let text = stringify(&value);
        prop_assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_encoding_starts_with_header(value in arb_value()) {
        let bytes = encode(&value).unwrap();
        prop_assert_eq!(&bytes[..5], b"KODA\x01");
    }

    #[test]
    fn prop_trailing_byte_rejected(value in arb_value()) {
        let mut bytes = encode(&value).unwrap();
        bytes.push(0);
        prop_assert!(decode(&bytes).is_err());
    }
}

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Record {
    id: i64,
    label: String,
    ratio: f64,
    active: bool,
    notes: Option<String>,
}

proptest! {
    #[test]
    fn prop_serde_struct_roundtrip(
        id in any::<i64>(),
        label in "[a-zA-Z0-9 ]{0,16}",
        ratio in any::<f64>().prop_filter("finite floats only", |f| f.is_finite()),
        active in any::<bool>(),
        notes in proptest::option::of(".{0,10}"),
    ) {
        let record = Record { id, label, ratio, active, notes };
        let text = to_string(&record).unwrap();
        prop_assert_eq!(from_str::<Record>(&text).unwrap(), record);
    }

    #[test]
    fn prop_serde_vec_roundtrip(values in prop::collection::vec(any::<i64>(), 0..20)) {
        let text = to_string(&values).unwrap();
        prop_assert_eq!(from_str::<Vec<i64>>(&text).unwrap(), values);
    }
}
