use json_events::events::{
    from_value, to_string, Layer, Pipeline, Statistics, Tee, ToStream, ToValue,
    ValidateEventOrder,
};
use json_events::{cbor, msgpack, ubjson, Error, Value};
use serde_json::json;

fn sample() -> Value<'static> {
    Value::from(json!({
        "items": [1, -2, 3.25, "four", null, true],
        "meta": {"camelKey": {"nested": []}},
    }))
}

#[test]
fn tee_is_transparent() {
    let bytes = cbor::to_vec(&sample()).unwrap();
    let mut tee = Tee::new((ToValue::new(), Statistics::new()));
    cbor::parse(&bytes, &mut tee).unwrap();
    let (to_value, stats) = tee.into_inner();
    assert_eq!(to_value.into_value().unwrap(), cbor::from_slice(&bytes).unwrap());
    assert_eq!(stats.arrays, 2);
    assert_eq!(stats.objects, 3);
    assert_eq!(stats.array_elements, 6);
    assert_eq!(stats.object_members, 4);
}

#[test]
fn empty_pipeline_is_transparent() {
    let v = sample();
    let pipeline = Pipeline::new();
    for (encoded, plain) in [
        (cbor::to_vec_with(&v, &pipeline), cbor::to_vec(&v)),
        (msgpack::to_vec_with(&v, &pipeline), msgpack::to_vec(&v)),
        (ubjson::to_vec_with(&v, &pipeline), ubjson::to_vec(&v)),
    ] {
        assert_eq!(encoded.unwrap(), plain.unwrap());
    }
}

#[test]
fn validate_event_order_accepts_parser_output() {
    let v = sample();
    for bytes in [
        cbor::to_vec(&v).unwrap(),
        [0x9f, 0x01, 0xbf, 0x61, b'k', 0xf6, 0xff, 0xff].to_vec(),
    ] {
        let mut validator = ValidateEventOrder::default();
        cbor::parse(&bytes, &mut validator).unwrap();
        assert!(validator.is_complete());
    }
    let mut validator = ValidateEventOrder::default();
    ubjson::parse(b"[{}[]]", &mut validator).unwrap();
    assert!(validator.is_complete());

    let pipeline = Pipeline::new().with(Layer::ValidateEventOrder);
    assert_eq!(
        msgpack::from_slice_with(&msgpack::to_vec(&v).unwrap(), &pipeline).unwrap(),
        v
    );
}

#[test]
fn invalid_strings_follow_the_pipeline_policy() {
    let inputs: [(&str, &[u8]); 3] = [
        ("cbor", &[0x62, 0xff, 0xfe]),
        ("msgpack", &[0xa2, 0xff, 0xfe]),
        ("ubjson", b"SU\x02\xff\xfe"),
    ];
    let decode = |format: &str, bytes: &[u8], pipeline: &Pipeline| match format {
        "cbor" => cbor::from_slice_with(bytes, pipeline),
        "msgpack" => msgpack::from_slice_with(bytes, pipeline),
        _ => ubjson::from_slice_with(bytes, pipeline),
    };
    for (format, bytes) in inputs {
        let err = decode(format, bytes, &Pipeline::new()).unwrap_err();
        assert!(err.to_string().contains("invalid utf-8"), "{format}: {err}");

        let hex = Pipeline::new().with(Layer::InvalidStringToHex);
        assert_eq!(decode(format, bytes, &hex).unwrap(), "fffe", "{format}");

        let binary = Pipeline::new().with(Layer::InvalidStringToBinary);
        assert_eq!(
            decode(format, bytes, &binary).unwrap(),
            Value::Binary(vec![0xff, 0xfe]),
            "{format}"
        );

        let strict = Pipeline::new().with(Layer::InvalidStringToException);
        assert!(matches!(
            decode(format, bytes, &strict),
            Err(Error::InvalidUtf8)
        ));
    }

    // Valid strings are untouched by the policy layers.
    let hex = Pipeline::new().with(Layer::InvalidStringToHex);
    assert_eq!(cbor::from_slice_with(&[0x61, b'z'], &hex).unwrap(), "z");
}

#[test]
fn binary_policies_on_encode() {
    let v = Value::Binary(vec![0xfb, 0xff]);
    let cases = [
        (Layer::BinaryToBase64, "+/8="),
        (Layer::BinaryToBase64Url, "-_8"),
        (Layer::BinaryToHex, "fbff"),
    ];
    for (layer, expected) in cases {
        let pipeline = Pipeline::new().with(layer);
        let bytes = cbor::to_vec_with(&v, &pipeline).unwrap();
        assert_eq!(cbor::from_slice(&bytes).unwrap(), expected);
    }
    let pipeline = Pipeline::new().with(Layer::BinaryToException);
    assert!(matches!(
        ubjson::to_vec_with(&v, &pipeline),
        Err(Error::Binary(_))
    ));
}

#[test]
fn non_finite_policies_on_decode() {
    let nan = cbor::to_vec(&Value::Double(f64::NAN)).unwrap();
    let inf = [0xf9, 0x7c, 0x00];
    let to_string_layer = Pipeline::new().with(Layer::NonFiniteToString);
    assert_eq!(cbor::from_slice_with(&nan, &to_string_layer).unwrap(), "NaN");
    assert_eq!(
        cbor::from_slice_with(&inf, &to_string_layer).unwrap(),
        "Infinity"
    );
    let to_null = Pipeline::new().with(Layer::NonFiniteToNull);
    assert_eq!(cbor::from_slice_with(&inf, &to_null).unwrap(), Value::Null);
    let strict = Pipeline::new().with(Layer::NonFiniteToException);
    assert!(matches!(
        cbor::from_slice_with(&nan, &strict),
        Err(Error::NonFinite(_))
    ));
}

#[test]
fn number_preferences() {
    let bytes = msgpack::to_vec(&Value::Unsigned(5)).unwrap();
    let signed = Pipeline::new().with(Layer::PreferSigned);
    assert!(matches!(
        msgpack::from_slice_with(&bytes, &signed).unwrap(),
        Value::Signed(5)
    ));
    let bytes = msgpack::to_vec(&Value::Signed(-5)).unwrap();
    assert!(matches!(
        msgpack::from_slice_with(&bytes, &signed).unwrap(),
        Value::Signed(-5)
    ));
    let unsigned = Pipeline::new().with(Layer::PreferUnsigned);
    let bytes = ubjson::to_vec(&Value::Signed(7)).unwrap();
    assert!(matches!(
        ubjson::from_slice_with(&bytes, &unsigned).unwrap(),
        Value::Unsigned(7)
    ));
}

#[test]
fn key_case_layers_compose() {
    let v = sample();
    let to_snake = Pipeline::new().with(Layer::KeyCamelCaseToSnakeCase);
    let snake = cbor::from_slice_with(&cbor::to_vec(&v).unwrap(), &to_snake).unwrap();
    assert!(snake.get("meta").and_then(|m| m.get("camel_key")).is_some());

    let to_camel = Pipeline::new().with(Layer::KeySnakeCaseToCamelCase);
    let camel = msgpack::from_slice_with(&msgpack::to_vec(&snake).unwrap(), &to_camel).unwrap();
    assert_eq!(camel, v);
}

#[test]
fn pipeline_into_json_text() {
    let v = Value::from(json!({"a": [1.5]}));
    let nan = Value::Array(vec![Value::Double(f64::NAN)]);
    assert!(to_string(&nan).is_err());

    let pipeline = Pipeline::new().with(Layer::NonFiniteToNull);
    let mut json = ToStream::new();
    {
        let mut chain = pipeline.build(&mut json);
        from_value(&nan, &mut chain).unwrap();
    }
    assert_eq!(json.as_str(), "[null]");
    assert_eq!(to_string(&v).unwrap(), r#"{"a":[1.5]}"#);
}

#[test]
fn serde_json_bridge_survives_every_codec() {
    let original = json!({
        "n": -7,
        "u": 18446744073709551615u64,
        "f": 0.5,
        "s": "ü",
        "l": [null, false],
    });
    let v = Value::from(original.clone());
    let decoded = [
        cbor::from_slice(&cbor::to_vec(&v).unwrap()).unwrap(),
        msgpack::from_slice(&msgpack::to_vec(&v).unwrap()).unwrap(),
        ubjson::from_slice(&ubjson::to_vec(&v).unwrap()).unwrap(),
    ];
    for back in &decoded {
        assert_eq!(serde_json::Value::try_from(back).unwrap(), original);
    }
}
