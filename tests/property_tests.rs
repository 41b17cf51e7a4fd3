//! Property-based tests for the guarantees the codec makes on every input:
//! exact round-trips for the safe subset, bounded output, and a decoder that
//! reports errors instead of panicking.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_lines::{
    decode, encode, encode_with_options, from_str, to_string, EncodeOptions, LineMap, Value,
};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: i64,
    name: String,
    ok: bool,
    tags: Vec<String>,
    parent: Option<u32>,
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        "\\PC{0,16}".prop_map(Value::from),
        (0i64..4_102_444_800).prop_map(|s| Value::Timestamp(Utc.timestamp_opt(s, 0).unwrap())),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
            prop::collection::vec(("\\PC{0,8}", inner), 0..4)
                .prop_map(|pairs| Value::Mapping(pairs.into_iter().collect())),
        ]
    })
}

fn line() -> impl Strategy<Value = LineMap> {
    prop::collection::vec(("\\PC{0,8}", value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_safe_subset_roundtrips(line in line()) {
        let text = encode(&line);
        let back = decode(&text);
        prop_assert!(back.is_ok(), "failed to decode {:?}", text);
        prop_assert_eq!(back.unwrap(), line);
    }

    #[test]
    fn prop_output_is_a_single_line(line in line()) {
        let text = encode(&line);
        prop_assert!(!text.contains('\n') && !text.contains('\r'));
    }

    #[test]
    fn prop_byte_budget_is_respected(line in line(), max in 0usize..120) {
        let options = EncodeOptions::new().with_max_bytesize(max);
        let text = encode_with_options(&line, &options);
        prop_assert!(text.len() <= max, "{:?} exceeds {}", text, max);
        prop_assert!(decode(&text).is_ok(), "failed to decode {:?}", text);
    }

    #[test]
    fn prop_any_depth_decodes(line in line(), depth in 0usize..4) {
        let options = EncodeOptions::new().with_max_depth(depth);
        let text = encode_with_options(&line, &options);
        prop_assert!(decode(&text).is_ok(), "failed to decode {:?}", text);
    }

    #[test]
    fn prop_decode_never_panics(input in "\\PC{0,40}") {
        let _ = decode(&input);
    }

    #[test]
    fn prop_record(
        id in any::<i64>(),
        name in "\\PC{0,16}",
        ok in any::<bool>(),
        tags in prop::collection::vec("\\PC{0,8}", 0..5),
        parent in proptest::option::of(any::<u32>()),
    ) {
        let record = Record { id, name, ok, tags, parent };
        prop_assert!(roundtrip(&record));
    }
}
