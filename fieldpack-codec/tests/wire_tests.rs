use fieldpack_codec::{CodecError, wire};
use fieldpack_types::{Map, Value};
use pretty_assertions::assert_eq;

// ── Packing ──────────────────────────────────────────────────────

#[test]
fn empty_sequence_is_empty_array() {
    assert_eq!(wire::pack(Vec::new()).unwrap(), [0x90]);
    assert_eq!(wire::unpack(&[0x90]).unwrap(), Vec::<Value>::new());
}

#[test]
fn string_packs_as_fixstr() {
    let blob = wire::pack(vec![Value::from("testValue")]).unwrap();
    assert_eq!(blob, [145, 169, 116, 101, 115, 116, 86, 97, 108, 117, 101]);
}

#[test]
fn integers_use_compact_forms() {
    assert_eq!(wire::pack(vec![Value::Int(33)]).unwrap(), [0x91, 0x21]);
    assert_eq!(wire::pack(vec![Value::Int(-1)]).unwrap(), [0x91, 0xff]);
    assert_eq!(wire::pack(vec![Value::Int(300)]).unwrap(), [0x91, 0xcd, 0x01, 0x2c]);
}

#[test]
fn bytes_pack_as_binary() {
    let blob = wire::pack(vec![Value::bytes(vec![1u8, 2])]).unwrap();
    assert_eq!(blob, [0x91, 0xc4, 0x02, 0x01, 0x02]);
}

#[test]
fn nil_and_booleans() {
    let blob = wire::pack(vec![Value::Nil, Value::Bool(true), Value::Bool(false)]).unwrap();
    assert_eq!(blob, [0x93, 0xc0, 0xc3, 0xc2]);
}

#[test]
fn floats_pack_as_f64() {
    let blob = wire::pack(vec![Value::Float(1.5)]).unwrap();
    assert_eq!(blob, [0x91, 0xcb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn nested_values_unpack_unchanged() {
    let mut map = Map::new();
    map.insert("a".to_string(), Value::Int(1));
    map.insert("b".to_string(), Value::List(vec![Value::from("x"), Value::Nil]));
    let values = vec![
        Value::Map(map),
        Value::List(vec![Value::bytes(vec![0u8]), Value::Float(-2.25)]),
        Value::from(i64::MIN),
        Value::from(i64::MAX),
    ];
    let blob = wire::pack(values.clone()).unwrap();
    assert_eq!(wire::unpack(&blob).unwrap(), values);
}

#[test]
fn map_keys_pack_in_insertion_order() {
    let mut map = Map::new();
    map.insert("b".to_string(), Value::Int(1));
    map.insert("a".to_string(), Value::Int(2));
    let blob = wire::pack(vec![Value::Map(map)]).unwrap();
    assert_eq!(blob, [0x91, 0x82, 0xa1, b'b', 0x01, 0xa1, b'a', 0x02]);

    let values = wire::unpack(&blob).unwrap();
    let keys: Vec<&String> = values[0].as_map().unwrap().keys().collect();
    assert_eq!(keys, ["b", "a"]);
    assert_eq!(wire::pack(values).unwrap(), blob);
}

// ── Unpacking foreign encoders' output ───────────────────────────

#[test]
fn f32_widens_to_float() {
    assert_eq!(
        wire::unpack(&[0x91, 0xca, 0x3f, 0xc0, 0, 0]).unwrap(),
        vec![Value::Float(1.5)]
    );
}

#[test]
fn wide_unsigned_within_range_is_int() {
    // uint64 holding 1
    let blob = [0x91, 0xcf, 0, 0, 0, 0, 0, 0, 0, 1];
    assert_eq!(wire::unpack(&blob).unwrap(), vec![Value::Int(1)]);
}

// ── Malformed input ──────────────────────────────────────────────

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(wire::unpack(&[]), Err(CodecError::Unpack(_))));
}

#[test]
fn truncated_array_is_an_error() {
    assert!(matches!(wire::unpack(&[0x92, 0x01]), Err(CodecError::Unpack(_))));
}

#[test]
fn trailing_bytes_are_rejected() {
    let err = wire::unpack(&[0x90, 0x00]).unwrap_err();
    assert!(matches!(err, CodecError::Malformed(msg) if msg.contains("trailing")));
}

#[test]
fn top_level_must_be_array() {
    for blob in [&[0xa1, b'a'][..], &[0x01][..], &[0x80][..]] {
        assert!(matches!(wire::unpack(blob), Err(CodecError::Malformed(_))));
    }
}

#[test]
fn integer_above_i64_is_out_of_range() {
    let blob = [0x91, 0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff];
    assert!(matches!(
        wire::unpack(&blob),
        Err(CodecError::IntegerOutOfRange(u64::MAX))
    ));
}

#[test]
fn extension_types_are_rejected() {
    // fixext1, type 1, one data byte
    let blob = [0x91, 0xd4, 0x01, 0x00];
    assert!(matches!(wire::unpack(&blob), Err(CodecError::Malformed(_))));
}

#[test]
fn non_string_map_keys_are_rejected() {
    let blob = [0x91, 0x81, 0x01, 0x02];
    let err = wire::unpack(&blob).unwrap_err();
    assert!(matches!(err, CodecError::Malformed(msg) if msg.contains("map key")));
}

#[test]
fn invalid_utf8_string_is_rejected() {
    let blob = [0x91, 0xa1, 0xff];
    assert!(matches!(wire::unpack(&blob), Err(CodecError::Malformed(_))));
}
