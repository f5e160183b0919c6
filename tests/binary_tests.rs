use koda::{decode, decode_with_options, encode, encode_with_options, koda, parse, DecodeOptions,
    EncodeOptions, Error, Value};

/// Builds a document by hand: header, dictionary entries, then the payload.
fn document(keys: &[&str], payload: &[u8]) -> Vec<u8> {
    let mut bytes = b"KODA\x01".to_vec();
    bytes.extend_from_slice(&(keys.len() as u32).to_be_bytes());
    for key in keys {
        bytes.extend_from_slice(&(key.len() as u32).to_be_bytes());
        bytes.extend_from_slice(key.as_bytes());
    }
    bytes.extend_from_slice(payload);
    bytes
}

fn decode_err(bytes: &[u8]) -> Error {
    decode(bytes).unwrap_err()
}

#[test]
fn test_wire_layout() {
    let value = parse("{a: 1, b: 2}").unwrap();
    let bytes = encode(&value).unwrap();

    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        0x4B, 0x4F, 0x44, 0x41,                         // magic "KODA"
        0x01,                                           // version
        0x00, 0x00, 0x00, 0x02,                         // dictionary length
        0x00, 0x00, 0x00, 0x01, 0x61,                   // "a"
        0x00, 0x00, 0x00, 0x01, 0x62,                   // "b"
        0x11, 0x00, 0x00, 0x00, 0x02,                   // object, 2 entries
        0x00, 0x00, 0x00, 0x00,                         // key index 0
        0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
        0x00, 0x00, 0x00, 0x01,                         // key index 1
        0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02,
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn test_scalar_encodings() {
    assert_eq!(encode(&Value::Null).unwrap(), document(&[], &[0x01]));
    assert_eq!(encode(&Value::Bool(false)).unwrap(), document(&[], &[0x02]));
    assert_eq!(encode(&Value::Bool(true)).unwrap(), document(&[], &[0x03]));

    let mut int_payload = vec![0x04];
    int_payload.extend_from_slice(&(-2i64).to_be_bytes());
    assert_eq!(encode(&Value::Int(-2)).unwrap(), document(&[], &int_payload));

    let mut float_payload = vec![0x05];
    float_payload.extend_from_slice(&1.5f64.to_bits().to_be_bytes());
    assert_eq!(encode(&Value::Float(1.5)).unwrap(), document(&[], &float_payload));

    let string_payload = [&[0x06, 0, 0, 0, 2][..], &b"hi"[..]].concat();
    assert_eq!(
        encode(&Value::String("hi".to_string())).unwrap(),
        document(&[], &string_payload)
    );

    assert_eq!(
        encode(&Value::Array(vec![])).unwrap(),
        document(&[], &[0x10, 0, 0, 0, 0])
    );
    assert_eq!(
        encode(&koda!({})).unwrap(),
        document(&[], &[0x11, 0, 0, 0, 0])
    );
}

#[test]
fn test_canonical_key_order() {
    let first = parse("{b: 1, a: 2}").unwrap();
    let second = parse("{a: 2, b: 1}").unwrap();
    assert_eq!(encode(&first).unwrap(), encode(&second).unwrap());

    // Decoding either gives the same tree back.
    assert_eq!(
        decode(&encode(&first).unwrap()).unwrap(),
        decode(&encode(&second).unwrap()).unwrap()
    );
}

#[test]
fn test_dictionary_is_global_sorted_and_deduped() {
    // Keys appear in nested objects, inside arrays, and repeat.
    let value = koda!({
        "zeta": {"alpha": 1},
        "items": [{"beta": 1, "alpha": 2}]
    });
    let bytes = encode(&value).unwrap();

    let expected_dict = document(&["alpha", "beta", "items", "zeta"], &[]);
    assert_eq!(&bytes[..expected_dict.len()], &expected_dict[..]);
}

#[test]
fn test_text_to_binary_roundtrip() {
    let value = parse("\"x\": [1, 2, 3]").unwrap();
    let decoded = decode(&encode(&value).unwrap()).unwrap();
    assert_eq!(decoded, koda!({"x": [1, 2, 3]}));
}

#[test]
fn test_roundtrip_extremes() {
    let value = koda!([]);
    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);

    for int in [i64::MIN, -1, 0, 1, i64::MAX] {
        let value = Value::Int(int);
        assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
    }

    for float in [0.0, -0.0, f64::MIN_POSITIVE, f64::MAX, f64::INFINITY, f64::NEG_INFINITY] {
        let decoded = decode(&encode(&Value::Float(float)).unwrap()).unwrap();
        match decoded {
            Value::Float(f) => assert_eq!(f.to_bits(), float.to_bits()),
            other => panic!("expected float, got {other:?}"),
        }
    }

    // NaN survives bit-exactly even though it is not equal to itself.
    let decoded = decode(&encode(&Value::Float(f64::NAN)).unwrap()).unwrap();
    match decoded {
        Value::Float(f) => assert_eq!(f.to_bits(), f64::NAN.to_bits()),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn test_unicode_strings() {
    let value = koda!({"greeting": "héllo wörld 日本語"});
    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_truncated_input() {
    assert!(decode_err(&[]).to_string().contains("Truncated input"));
    assert!(decode_err(b"KODA").to_string().contains("Truncated input"));

    // Chopping a valid document anywhere yields an error, never a value.
    let bytes = encode(&koda!({"a": [1, "xy", null]})).unwrap();
    for len in 0..bytes.len() {
        assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes decoded");
    }
}

#[test]
fn test_magic_and_version() {
    let good = encode(&Value::Null).unwrap();
    for i in 0..5 {
        let mut bad = good.clone();
        bad[i] ^= 0xFF;
        let err = decode(&bad).unwrap_err();
        let expected = if i < 4 { "Invalid magic number" } else { "Unsupported version" };
        assert!(err.to_string().contains(expected), "byte {i}: {err}");
    }

    let err = decode_err(&[0x4B, 0x4F, 0x44, 0x41, 0x02, 0, 0, 0, 0, 0x01]);
    match err {
        Error::Decode { offset, msg } => {
            assert_eq!(msg, "Unsupported version");
            assert_eq!(offset, 4);
        }
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = encode(&koda!({"a": 1})).unwrap();
    bytes.push(0x00);
    let err = decode_err(&bytes);
    assert!(err.to_string().contains("Trailing bytes after root value"));
}

#[test]
fn test_unknown_and_reserved_tags() {
    let err = decode_err(&document(&[], &[0x0F]));
    assert!(err.to_string().contains("Unknown type tag"));

    let err = decode_err(&document(&[], &[0x07]));
    assert!(err.to_string().contains("Binary type not supported"));
}

#[test]
fn test_invalid_key_index() {
    // Object references entry 1 of a one-key dictionary.
    let mut payload = vec![0x11, 0, 0, 0, 1];
    payload.extend_from_slice(&[0, 0, 0, 1]);
    payload.push(0x01);
    let err = decode_err(&document(&["k"], &payload));
    assert!(err.to_string().contains("Invalid key index"));
}

#[test]
fn test_duplicate_key_rejected() {
    // Two entries both referencing dictionary slot 0.
    let mut payload = vec![0x11, 0, 0, 0, 2];
    payload.extend_from_slice(&[0, 0, 0, 0, 0x01]);
    payload.extend_from_slice(&[0, 0, 0, 0, 0x01]);
    let err = decode_err(&document(&["k"], &payload));
    assert!(err.to_string().contains("Duplicate key"));
}

#[test]
fn test_invalid_utf8_rejected() {
    // Dictionary key with an ill-formed byte.
    let mut bytes = b"KODA\x01".to_vec();
    bytes.extend_from_slice(&[0, 0, 0, 1]);
    bytes.extend_from_slice(&[0, 0, 0, 1, 0xFF]);
    bytes.push(0x01);
    assert!(decode_err(&bytes).to_string().contains("Invalid UTF-8"));

    // String value with an overlong encoding of '/'.
    let payload = [&[0x06, 0, 0, 0, 2][..], &[0xC0, 0xAF][..]].concat();
    assert!(decode_err(&document(&[], &payload)).to_string().contains("Invalid UTF-8"));
}

#[test]
fn test_dictionary_too_large() {
    let bytes = encode(&koda!({"a": 1, "b": 2})).unwrap();
    let options = DecodeOptions::new().with_max_dictionary_size(1);
    let err = decode_with_options(&bytes, &options).unwrap_err();
    assert!(err.to_string().contains("Dictionary too large"));
}

#[test]
fn test_string_length_limits() {
    let options = DecodeOptions::new().with_max_string_length(3);

    let bytes = encode(&koda!({"long-key": 1})).unwrap();
    let err = decode_with_options(&bytes, &options).unwrap_err();
    assert!(err.to_string().contains("Key string too long"));

    let bytes = encode(&Value::String("long string".to_string())).unwrap();
    let err = decode_with_options(&bytes, &options).unwrap_err();
    assert!(err.to_string().contains("String too long"));

    // The declared length is rejected before any read, even when it
    // far exceeds the actual input.
    let payload = [&[0x06][..], &u32::MAX.to_be_bytes()[..]].concat();
    let err = decode_err(&document(&[], &payload));
    assert!(err.to_string().contains("String too long"));
}

#[test]
fn test_decode_depth_limit() {
    let deep = koda!([[[[1]]]]);
    let bytes = encode(&deep).unwrap();
    assert!(decode(&bytes).is_ok());

    let options = DecodeOptions::new().with_max_depth(2);
    let err = decode_with_options(&bytes, &options).unwrap_err();
    match err {
        Error::Decode { msg, .. } => assert_eq!(msg, "Maximum nesting depth exceeded"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_encode_depth_limit() {
    let three_levels = koda!({"a": {"b": {"c": 1}}});
    assert!(encode(&three_levels).is_ok());

    let options = EncodeOptions::new().with_max_depth(2);
    let err = encode_with_options(&three_levels, &options).unwrap_err();
    match err {
        Error::Encode { msg, .. } => assert_eq!(msg, "Maximum nesting depth exceeded"),
        other => panic!("expected encode error, got {other:?}"),
    }
}

#[test]
fn test_huge_declared_count_fails_cleanly() {
    // An array claiming u32::MAX elements with two bytes of payload must
    // fail with truncation, not exhaust memory.
    let payload = [&[0x10][..], &u32::MAX.to_be_bytes()[..], &[0x01, 0x01][..]].concat();
    let err = decode_err(&document(&[], &payload));
    assert!(err.to_string().contains("Truncated input"));
}
