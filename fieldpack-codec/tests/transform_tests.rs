use fieldpack_codec::{Bs58Transform, CodecError, CodecResult, FieldTransform, IdentityTransform};
use fieldpack_model::ScalarKind;
use fieldpack_types::Value;
use pretty_assertions::assert_eq;

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn identity_passes_values_through() {
    let identity = IdentityTransform::new(ScalarKind::String);
    let v = Value::from("testValue");
    assert_eq!(identity.encode(&v).unwrap(), v);
    assert_eq!(identity.decode(v.clone()).unwrap(), v);
}

#[test]
fn identity_kind_names() {
    assert_eq!(IdentityTransform::new(ScalarKind::Number).kind(), "number");
    assert_eq!(IdentityTransform::any().kind(), "any");
    assert_eq!(IdentityTransform::default().scalar_kind(), ScalarKind::Any);
}

#[test]
fn identity_validity_follows_scalar_kind() {
    let number = IdentityTransform::new(ScalarKind::Number);
    assert!(number.is_valid(&Value::Int(1)));
    assert!(number.is_valid(&Value::Float(1.5)));
    assert!(!number.is_valid(&Value::from("1")));

    let any = IdentityTransform::any();
    assert!(any.is_valid(&Value::from("1")));
    assert!(any.is_valid(&Value::map()));
}

// ── Base-58 ──────────────────────────────────────────────────────

#[test]
fn bs58_encodes_text_to_bytes() {
    let wire = Bs58Transform.encode(&Value::from("StV1DL6CwTryKyV")).unwrap();
    assert_eq!(wire, Value::bytes(b"hello world".to_vec()));
}

#[test]
fn bs58_decodes_bytes_to_text() {
    let logical = Bs58Transform.decode(Value::bytes(b"hello world".to_vec())).unwrap();
    assert_eq!(logical, Value::from("StV1DL6CwTryKyV"));
}

#[test]
fn bs58_keeps_leading_zero_bytes() {
    let wire = Bs58Transform.encode(&Value::from("112")).unwrap();
    assert_eq!(wire, Value::bytes(vec![0u8, 0, 1]));
    assert_eq!(Bs58Transform.decode(wire).unwrap(), Value::from("112"));
}

#[test]
fn bs58_empty_text_is_empty_bytes() {
    assert_eq!(Bs58Transform.encode(&Value::from("")).unwrap(), Value::bytes(Vec::new()));
}

#[test]
fn bs58_rejects_characters_outside_alphabet() {
    for bad in ["0", "O", "I", "l", "abc!"] {
        let err = Bs58Transform.encode(&Value::from(bad)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidBase58(_)), "input {bad}");
    }
}

#[test]
fn bs58_rejects_wrong_variants() {
    assert!(matches!(
        Bs58Transform.encode(&Value::Int(5)),
        Err(CodecError::TypeMismatch { found: "integer", .. })
    ));
    assert!(matches!(
        Bs58Transform.decode(Value::from("text")),
        Err(CodecError::TypeMismatch { found: "string", .. })
    ));
}

#[test]
fn bs58_validity() {
    assert!(Bs58Transform.is_valid(&Value::from("2g")));
    assert!(!Bs58Transform.is_valid(&Value::Int(5)));
    assert_eq!(Bs58Transform.kind(), Bs58Transform::KIND);
}

// ── Nil passthrough ──────────────────────────────────────────────

#[test]
fn nil_passes_through_every_transform() {
    let transforms: Vec<Box<dyn FieldTransform>> = vec![
        Box::new(IdentityTransform::new(ScalarKind::String)),
        Box::new(Bs58Transform),
        Box::new(Failing),
    ];
    for t in &transforms {
        assert_eq!(t.encode(&Value::Nil).unwrap(), Value::Nil, "{}", t.kind());
        assert_eq!(t.decode(Value::Nil).unwrap(), Value::Nil, "{}", t.kind());
    }
}

#[derive(Debug)]
struct Failing;

impl FieldTransform for Failing {
    fn kind(&self) -> &str {
        "failing"
    }

    fn encode_value(&self, _value: &Value) -> CodecResult<Value> {
        Err(CodecError::Malformed("encode called".into()))
    }

    fn decode_value(&self, _value: Value) -> CodecResult<Value> {
        Err(CodecError::Malformed("decode called".into()))
    }
}

#[test]
fn custom_transform_defaults_to_valid() {
    assert!(Failing.is_valid(&Value::Int(1)));
    assert!(Failing.encode(&Value::Int(1)).is_err());
}
