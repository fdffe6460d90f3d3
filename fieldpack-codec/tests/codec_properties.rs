//! Property-based tests for the positional codec.
//!
//! For records built from each field's own value domain:
//! - Round trip: decode(encode(r)) == r, absent fields coming back as nil
//! - Layout: the blob is an array with exactly one element per field
//! - Nil: absent fields encode as nil whatever their transform

use fieldpack_codec::{Engine, EngineOptions, wire};
use fieldpack_model::{FieldSpec, ModelConfig};
use fieldpack_types::{Map, Value};
use proptest::prelude::*;

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ]{0,40}").unwrap()
}

fn bs58_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..32).prop_map(|bytes| bs58::encode(bytes).into_string())
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e9f64..1.0e9).prop_map(Value::Float),
        text_strategy().prop_map(Value::Str),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
    ]
}

fn any_value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..4)
                .prop_map(|entries| entries.into_iter().collect::<Value>()),
        ]
    })
}

fn engine() -> Engine {
    let user = ModelConfig::new()
        .field("name", FieldSpec::of("string"))
        .field("age", FieldSpec::of("integer"));
    let post = ModelConfig::new()
        .field("title", FieldSpec::of("string"))
        .field("meta.key", FieldSpec::of("bs58"))
        .field("tags", FieldSpec::list_of("string"))
        .field("extra", FieldSpec::untyped())
        .field("author", FieldSpec::of("user"));
    Engine::new([("user", user), ("post", post)], EngineOptions::default()).unwrap()
}

/// A user record as decode returns it: every field present, nil when unset.
fn user_strategy() -> impl Strategy<Value = Value> {
    (prop::option::of(text_strategy()), prop::option::of(any::<i64>())).prop_map(|(name, age)| {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from(name));
        map.insert("age".to_string(), Value::from(age));
        Value::Map(map)
    })
}

/// A post record as decode returns it. `meta.key` always creates `meta`.
fn post_strategy() -> impl Strategy<Value = Value> {
    (
        prop::option::of(text_strategy()),
        prop::option::of(bs58_strategy()),
        prop::option::of(prop::collection::vec(text_strategy(), 0..5)),
        prop::option::of(any_value_strategy()),
        prop::option::of(user_strategy()),
    )
        .prop_map(|(title, key, tags, extra, author)| {
            let mut meta = Map::new();
            meta.insert("key".to_string(), Value::from(key));
            let tags = tags.map(|tags| Value::List(tags.into_iter().map(Value::Str).collect()));

            let mut map = Map::new();
            map.insert("title".to_string(), Value::from(title));
            map.insert("meta".to_string(), Value::Map(meta));
            map.insert("tags".to_string(), Value::from(tags));
            map.insert("extra".to_string(), Value::from(extra));
            map.insert("author".to_string(), Value::from(author));
            Value::Map(map)
        })
}

// =============================================================================
// ROUND TRIP
// =============================================================================

proptest! {
    #[test]
    fn user_roundtrips(user in user_strategy()) {
        let engine = engine();
        let blob = engine.encode("user", &user).unwrap();
        prop_assert_eq!(engine.decode_bytes("user", &blob).unwrap(), user);
    }

    #[test]
    fn post_roundtrips(post in post_strategy()) {
        let engine = engine();
        let blob = engine.encode("post", &post).unwrap();
        let decoded = engine.decode("post", &Value::Bytes(blob)).unwrap();
        prop_assert_eq!(decoded, Some(post));
    }

    #[test]
    fn untyped_field_roundtrips_any_value(value in any_value_strategy()) {
        let engine = engine();
        let mut map = Map::new();
        map.insert("extra".to_string(), value.clone());
        let blob = engine.encode("post", &Value::Map(map)).unwrap();
        let decoded = engine.decode_bytes("post", &blob).unwrap();
        prop_assert_eq!(decoded.as_map().unwrap().get("extra"), Some(&value));
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

proptest! {
    #[test]
    fn blob_has_one_element_per_field(post in post_strategy()) {
        let engine = engine();
        let blob = engine.encode("post", &post).unwrap();
        let values = wire::unpack(&blob).unwrap();
        prop_assert_eq!(values.len(), engine.model("post").unwrap().fields().len());
    }

    #[test]
    fn user_blob_is_the_values_in_field_order(name in text_strategy(), age in any::<i64>()) {
        let engine = engine();
        let mut map = Map::new();
        map.insert("age".to_string(), Value::Int(age));
        map.insert("name".to_string(), Value::Str(name.clone()));
        let blob = engine.encode("user", &Value::Map(map)).unwrap();
        prop_assert_eq!(blob, wire::pack(vec![Value::Str(name), Value::Int(age)]).unwrap());
    }

    #[test]
    fn absent_fields_encode_as_nil(user in user_strategy()) {
        let engine = engine();
        let mut post = Map::new();
        post.insert("author".to_string(), user);
        let blob = engine.encode("post", &Value::Map(post)).unwrap();
        let values = wire::unpack(&blob).unwrap();
        prop_assert!(values[..4].iter().all(Value::is_nil));
        prop_assert!(values[4].is_binary());
    }
}
