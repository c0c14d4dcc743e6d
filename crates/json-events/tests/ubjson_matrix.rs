use json_events::events::{Dump, Layer, Pipeline};
use json_events::{ubjson, Error, Value};

fn obj(fields: &[(&str, Value<'static>)]) -> Value<'static> {
    Value::Object(
        fields
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.clone()))
            .collect(),
    )
}

#[test]
fn ubjson_encoder_wire_matrix() {
    assert_eq!(ubjson::to_vec(&Value::Null).unwrap(), b"Z");
    assert_eq!(ubjson::to_vec(&Value::Boolean(true)).unwrap(), b"T");
    assert_eq!(ubjson::to_vec(&Value::Boolean(false)).unwrap(), b"F");
    assert_eq!(ubjson::to_vec(&Value::Signed(-2)).unwrap(), [b'i', 0xfe]);
    assert_eq!(ubjson::to_vec(&Value::Unsigned(255)).unwrap(), [b'U', 0xff]);
    assert_eq!(
        ubjson::to_vec(&Value::Unsigned(70000)).unwrap(),
        [b'l', 0x00, 0x01, 0x11, 0x70]
    );
    assert_eq!(
        ubjson::to_vec(&Value::Signed(i64::MIN)).unwrap()[..1],
        [b'L']
    );
    assert_eq!(
        ubjson::to_vec(&Value::Double(-0.5)).unwrap(),
        [b'D', 0xbf, 0xe0, 0, 0, 0, 0, 0, 0]
    );
    assert_eq!(ubjson::to_vec(&Value::from("ab")).unwrap(), b"SU\x02ab");
    assert_eq!(
        ubjson::to_vec(&Value::Binary(vec![1, 2, 3])).unwrap(),
        b"[$U#U\x03\x01\x02\x03"
    );
    assert_eq!(
        ubjson::to_vec(&obj(&[("k", Value::Array(vec![Value::Null]))])).unwrap(),
        b"{#U\x01U\x01k[#U\x01Z"
    );
}

#[test]
fn ubjson_decoder_matrix() {
    assert_eq!(ubjson::from_slice(b"Z").unwrap(), Value::Null);
    assert_eq!(ubjson::from_slice(b"NNZN").unwrap(), Value::Null);
    assert_eq!(ubjson::from_slice(b"Cq").unwrap(), Value::from("q"));
    assert_eq!(
        ubjson::from_slice(b"HU\x03-12").unwrap(),
        Value::Signed(-12)
    );
    assert_eq!(
        ubjson::from_slice(b"HU\x031.5").unwrap(),
        Value::Double(1.5)
    );
    assert_eq!(
        ubjson::from_slice(b"{U\x01aiN}").unwrap(),
        obj(&[("a", Value::Signed(78))])
    );
    assert_eq!(
        ubjson::from_slice(b"[$S#U\x02U\x01xU\x01y").unwrap(),
        Value::Array(vec![Value::from("x"), Value::from("y")])
    );
    assert_eq!(
        ubjson::from_slice(b"{$T#U\x02U\x01aU\x01b").unwrap(),
        obj(&[("a", Value::Boolean(true)), ("b", Value::Boolean(true))])
    );
}

#[test]
fn ubjson_binary_is_a_typed_uint8_array() {
    let mut dump = Dump::new();
    ubjson::parse(b"[$U#i\x02\x00\xff", &mut dump).unwrap();
    assert_eq!(dump.as_str(), "binary 00ff\n");

    // An untyped array of U values stays an array.
    assert_eq!(
        ubjson::from_slice(b"[U\x01U\x02]").unwrap(),
        Value::Array(vec![Value::Unsigned(1), Value::Unsigned(2)])
    );
}

#[test]
fn ubjson_high_precision_round_trip() {
    let v = Value::Unsigned(u64::MAX);
    let bytes = ubjson::to_vec(&v).unwrap();
    assert_eq!(bytes[0], b'H');
    assert!(matches!(
        ubjson::from_slice(&bytes).unwrap(),
        Value::Unsigned(u64::MAX)
    ));
}

#[test]
fn ubjson_decoder_errors() {
    for input in [
        &b""[..],
        &b"["[..],
        &b"{"[..],
        &b"}"[..],
        &b"S"[..],
        &b"SU\x05ab"[..],
        &b"[$i"[..],
        &b"{#U\x01iZ"[..],
        &b"HU\x02ab"[..],
        &b"ZT"[..],
        &b"?"[..],
    ] {
        let err = ubjson::from_slice(input).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{input:?}: {err}");
    }
}

#[test]
fn ubjson_pipeline_on_decode() {
    let pipeline = Pipeline::new()
        .with(Layer::KeyCamelCaseToSnakeCase)
        .with(Layer::LimitValueCount(2));
    let bytes = ubjson::to_vec(&obj(&[("userId", Value::Unsigned(1))])).unwrap();
    assert_eq!(
        ubjson::from_slice_with(&bytes, &pipeline).unwrap(),
        obj(&[("user_id", Value::Unsigned(1))])
    );

    let three = Value::Array(vec![Value::Null, Value::Null, Value::Null]);
    let bytes = ubjson::to_vec(&three).unwrap();
    let err = ubjson::from_slice_with(&bytes, &pipeline).unwrap_err();
    assert!(matches!(err, Error::ValueCountExceeded(2)));
}
