use json_cell::{KeyValue, Kind, Value};
use json_cell_codec::{binarize, stringify, unbinarize, ParseError};

fn kv(key: &str, value: Value) -> KeyValue {
    KeyValue::new(key, value)
}

fn obj(entries: Vec<KeyValue>) -> Value {
    entries.into()
}

fn arr(items: Vec<Value>) -> Value {
    items.into()
}

#[test]
fn simple_tags() {
    assert_eq!(binarize(&Value::NULL), [0x00]);
    assert_eq!(binarize(&Value::from(true)), [0x01]);
    assert_eq!(binarize(&Value::from(false)), [0x02]);
    assert_eq!(binarize(&Value::UNDEFINED), [0x07]);
}

#[test]
fn doubles_carry_eight_raw_bytes() {
    let bytes = binarize(&Value::from(1.5));
    assert_eq!(bytes[0], 0x03);
    assert_eq!(&bytes[1..], 1.5f64.to_be_bytes());
    let back = unbinarize(&bytes).unwrap();
    assert_eq!(back.get_f64(), 1.5);
}

#[test]
fn integers_use_minimal_magnitude_width() {
    assert_eq!(binarize(&Value::from(42)), [0x10, 42]);
    assert_eq!(binarize(&Value::from(0)), [0x10, 0]);
    assert_eq!(binarize(&Value::from(255)), [0x10, 0xFF]);
    assert_eq!(binarize(&Value::from(300)), [0x11, 0x01, 0x2C]);
    assert_eq!(binarize(&Value::from(-5)), [0x18, 5]);
    assert_eq!(binarize(&Value::from(-300i64)), [0x19, 0x01, 0x2C]);
    assert_eq!(
        binarize(&Value::from(u64::MAX)),
        [0x17, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn forty_two_round_trips_as_a_number() {
    let v = unbinarize(&binarize(&Value::from(42))).unwrap();
    assert_eq!(v.kind(), Kind::Number);
    assert_eq!(v, Value::from(42));
}

#[test]
fn strings_are_length_prefixed() {
    assert_eq!(binarize(&Value::from("hi")), [0x20, 2, b'h', b'i']);
    assert_eq!(binarize(&Value::from("")), [0x20, 0]);
    let num = binarize(&Value::number("1.236483"));
    assert_eq!(num[..2], [0x28, 8]);
    assert_eq!(&num[2..], b"1.236483");
}

#[test]
fn containers_are_count_prefixed() {
    assert_eq!(binarize(&Value::empty(Kind::Array)), [0x30, 0]);
    assert_eq!(binarize(&Value::empty(Kind::Object)), [0x38, 0]);
    assert_eq!(
        binarize(&arr(vec![Value::from(1), Value::from(2)])),
        [0x30, 2, 0x10, 1, 0x10, 2]
    );
    assert_eq!(
        binarize(&obj(vec![kv("a", Value::from(1))])),
        [0x38, 1, 0x20, 1, b'a', 0x10, 1]
    );
}

#[test]
fn undefined_entries_survive_binary_but_not_text() {
    let v = obj(vec![kv("a", Value::from(1)), kv("gone", Value::UNDEFINED)]);

    assert_eq!(stringify(&v), r#"{"a":1}"#);

    let bytes = binarize(&v);
    assert_eq!(
        bytes,
        [
            0x38, 2, // object, two entries
            0x20, 1, b'a', 0x10, 1, // "a": 1
            0x20, 4, b'g', b'o', b'n', b'e', 0x07, // "gone": undefined
        ]
    );
    let back = unbinarize(&bytes).unwrap();
    assert_eq!(back.len(), 2);
    assert!(!back["gone"].defined());
    assert_eq!(back, v);
}

#[test]
fn binary_roundtrip_is_lossless() {
    let cases = vec![
        Value::NULL,
        Value::from(true),
        Value::from(false),
        Value::from(0),
        Value::from(-1),
        Value::from(i64::MIN),
        Value::from(i64::MAX),
        Value::from(u64::MAX),
        Value::from(0.1),
        Value::from(-123.123),
        Value::number("1154785421889866.236483123"),
        Value::from(""),
        Value::from("asdf asfd 😱 asdf asdf 👀 as"),
        arr(vec![]),
        arr(vec![Value::from(1), Value::UNDEFINED, Value::NULL]),
        obj(vec![]),
        obj(vec![
            kv("x", Value::from(false)),
            kv("y", arr(vec![Value::from(1), Value::from("a")])),
            kv("z", obj(vec![kv("deep", Value::from(2.5))])),
        ]),
    ];
    for v in cases {
        let bytes = binarize(&v);
        let back = unbinarize(&bytes)
            .unwrap_or_else(|e| panic!("unbinarize failed for {v:?}: {e}"));
        assert_eq!(back, v, "binary roundtrip for {v:?}");
        assert_eq!(binarize(&back), bytes, "re-encode is byte-stable for {v:?}");
    }
}

#[test]
fn top_level_undefined_round_trips() {
    let back = unbinarize(&binarize(&Value::UNDEFINED)).unwrap();
    assert!(!back.defined());
    assert_eq!(back.kind(), Kind::Undefined);
}

#[test]
fn nan_bits_are_byte_stable() {
    let bytes = binarize(&Value::from(f64::NAN));
    let back = unbinarize(&bytes).unwrap();
    assert!(back.get_f64().is_nan());
    assert_eq!(binarize(&back), bytes);
}

#[test]
fn mirrors_the_text_form_after_a_binary_trip() {
    let data = obj(vec![
        kv("aaa", arr(vec![Value::from(1), Value::from(2), Value::from(3)])),
        kv("m1", Value::from(42)),
        kv(
            "abcdefgewwqeq",
            arr(vec![
                Value::from(1),
                Value::from(12.3),
                Value::from(43.212),
                Value::from(1.2342312e10),
                Value::from(0.0),
                Value::from(f64::MIN_POSITIVE),
            ]),
        ),
        kv("missing", Value::NULL),
        kv("not here", Value::UNDEFINED),
        kv(
            "subobject",
            obj(vec![
                kv("abc", Value::from(-123)),
                kv("num", Value::number("123.321000000000001")),
            ]),
        ),
        kv("bool1", Value::from(true)),
        kv("bool2", Value::from(false)),
        kv("inf1", Value::from(f64::INFINITY)),
        kv("inf2", Value::from(f64::NEG_INFINITY)),
        kv("nan", Value::from(f64::NAN)),
    ]);
    let bytes = binarize(&data);
    let back = unbinarize(&bytes).unwrap();
    assert_eq!(stringify(&back), stringify(&data));
    assert_eq!(binarize(&back), bytes);
}

#[test]
fn truncated_binary_input_errors_at_end() {
    let bytes = binarize(&arr(vec![Value::from(1), Value::from(2)]));
    let cut = &bytes[..bytes.len() - 1];
    assert_eq!(
        unbinarize(cut),
        Err(ParseError::UnexpectedEnd(cut.len()))
    );
}

#[test]
fn unknown_tags_and_bad_keys_error() {
    // unassigned simple-category code
    assert!(matches!(unbinarize(&[0x05]), Err(ParseError::Syntax(_))));
    // unassigned category
    assert!(matches!(unbinarize(&[0x40, 0x00]), Err(ParseError::Syntax(_))));
    // object whose key is a number node
    let bad = [0x38, 1, 0x10, 1, 0x10, 2];
    assert!(matches!(unbinarize(&bad), Err(ParseError::Syntax(_))));
}

#[test]
fn non_minimal_length_fields_still_decode() {
    // a writer may pad the magnitude; readers only honor the declared width
    let padded = [0x13, 0x00, 0x00, 0x00, 42];
    assert_eq!(unbinarize(&padded).unwrap(), Value::from(42));
}
