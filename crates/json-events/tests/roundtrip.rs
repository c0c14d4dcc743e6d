use json_events::events::{from_value, Pipeline, ToValue, ValidateEventOrder};
use json_events::value::Type;
use json_events::{cbor, msgpack, ubjson, Value};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value<'static>> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Signed),
        any::<u64>().prop_map(Value::Unsigned),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Double),
        ".{0,12}".prop_map(Value::String),
        proptest::collection::vec(any::<u8>(), 0..12).prop_map(Value::Binary),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map("[a-zA-Z_]{0,8}", inner, 0..6)
                .prop_map(Value::Object),
        ]
    })
}

/// Checks kinds that equality alone would let drift: doubles stay doubles
/// and negative integers stay signed. Non-negative integers may come back
/// signed or unsigned.
fn same_kinds(expected: &Value<'_>, actual: &Value<'_>) -> bool {
    match (expected, actual) {
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_kinds(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len() && a.values().zip(b.values()).all(|(x, y)| same_kinds(x, y))
        }
        (Value::Signed(i), _) if *i >= 0 => {
            matches!(actual.value_type(), Type::Signed | Type::Unsigned)
        }
        (Value::Unsigned(_), _) => matches!(actual.value_type(), Type::Signed | Type::Unsigned),
        _ => expected.value_type() == actual.value_type(),
    }
}

#[test]
fn integral_doubles_stay_doubles() {
    for v in [Value::Double(5.0), Value::Double(-0.0), Value::Signed(-5)] {
        let decoded = [
            cbor::from_slice(&cbor::to_vec(&v).unwrap()).unwrap(),
            msgpack::from_slice(&msgpack::to_vec(&v).unwrap()).unwrap(),
            ubjson::from_slice(&ubjson::to_vec(&v).unwrap()).unwrap(),
        ];
        for back in &decoded {
            assert_eq!(back.value_type(), v.value_type(), "{v:?} came back as {back:?}");
        }
    }
}

proptest! {
    #[test]
    fn cbor_round_trip(v in arb_value()) {
        let bytes = cbor::to_vec(&v).unwrap();
        let back = cbor::from_slice(&bytes).unwrap();
        prop_assert!(same_kinds(&v, &back), "{:?} came back as {:?}", v, back);
        prop_assert_eq!(back, v);
    }

    #[test]
    fn msgpack_round_trip(v in arb_value()) {
        let bytes = msgpack::to_vec(&v).unwrap();
        let back = msgpack::from_slice(&bytes).unwrap();
        prop_assert!(same_kinds(&v, &back), "{:?} came back as {:?}", v, back);
        prop_assert_eq!(back, v);
    }

    #[test]
    fn ubjson_round_trip(v in arb_value()) {
        let bytes = ubjson::to_vec(&v).unwrap();
        let back = ubjson::from_slice(&bytes).unwrap();
        prop_assert!(same_kinds(&v, &back), "{:?} came back as {:?}", v, back);
        prop_assert_eq!(back, v);
    }

    #[test]
    fn from_value_events_are_well_formed(v in arb_value()) {
        let mut validator = ValidateEventOrder::new(ToValue::new());
        from_value(&v, &mut validator).unwrap();
        prop_assert!(validator.is_complete());
        prop_assert_eq!(validator.into_inner().into_value().unwrap(), v);
    }

    #[test]
    fn truncated_input_never_panics(v in arb_value(), cut in any::<prop::sample::Index>()) {
        let pipeline = Pipeline::new();
        for bytes in [
            cbor::to_vec(&v).unwrap(),
            msgpack::to_vec(&v).unwrap(),
            ubjson::to_vec(&v).unwrap(),
        ] {
            let end = cut.index(bytes.len());
            let _ = cbor::from_slice_with(&bytes[..end], &pipeline);
            let _ = msgpack::from_slice_with(&bytes[..end], &pipeline);
            let _ = ubjson::from_slice_with(&bytes[..end], &pipeline);
        }
    }
}
