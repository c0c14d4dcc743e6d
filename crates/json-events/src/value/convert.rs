//! Conversions between [`Value`] and [`serde_json::Value`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::Value;
use crate::error::{Error, Result};
use crate::events::Consumer;
use crate::value::Produce;

impl From<serde_json::Value> for Value<'static> {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Signed(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Unsigned(u)
                } else {
                    Value::Double(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(Value::from).collect()),
            serde_json::Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Binary payloads become `data:` URIs; non-finite doubles and
/// uninitialized nodes have no JSON form and are rejected.
impl TryFrom<&Value<'_>> for serde_json::Value {
    type Error = Error;

    fn try_from(v: &Value<'_>) -> Result<Self> {
        Ok(match v {
            Value::Uninitialized => {
                return Err(Error::Unrepresentable("uninitialized value".into()))
            }
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Signed(i) => serde_json::json!(i),
            Value::Unsigned(u) => serde_json::json!(u),
            Value::Double(d) => serde_json::Number::from_f64(*d)
                .map(serde_json::Value::Number)
                .ok_or(Error::NonFinite(*d))?,
            Value::String(_) | Value::StringView(_) => {
                serde_json::Value::String(v.as_str().unwrap_or_default().to_owned())
            }
            Value::Binary(_) | Value::BinaryView(_) => {
                let b64 = STANDARD.encode(v.as_bytes().unwrap_or_default());
                serde_json::Value::String(format!("data:application/octet-stream;base64,{b64}"))
            }
            Value::Array(arr) => serde_json::Value::Array(
                arr.iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(obj) => serde_json::Value::Object(
                obj.iter()
                    .map(|(k, v)| Ok((k.clone(), serde_json::Value::try_from(v)?)))
                    .collect::<Result<_>>()?,
            ),
            Value::ValuePtr(target) => serde_json::Value::try_from(*target)?,
            Value::OpaquePtr(_) => serde_json::Value::try_from(&v.make_self_contained()?)?,
        })
    }
}

/// Lets a `serde_json` document sit behind [`Value::OpaquePtr`].
impl Produce for serde_json::Value {
    fn produce(&self, consumer: &mut dyn Consumer) -> Result<()> {
        match self {
            serde_json::Value::Null => consumer.null(),
            serde_json::Value::Bool(b) => consumer.boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    consumer.number_i64(i)
                } else if let Some(u) = n.as_u64() {
                    consumer.number_u64(u)
                } else {
                    consumer.number_f64(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => consumer.string(s),
            serde_json::Value::Array(arr) => {
                consumer.begin_array(Some(arr.len()))?;
                for item in arr {
                    item.produce(consumer)?;
                    consumer.element()?;
                }
                consumer.end_array(Some(arr.len()))
            }
            serde_json::Value::Object(obj) => {
                consumer.begin_object(Some(obj.len()))?;
                for (k, item) in obj {
                    consumer.key(k)?;
                    item.produce(consumer)?;
                    consumer.member()?;
                }
                consumer.end_object(Some(obj.len()))
            }
        }
    }
}
