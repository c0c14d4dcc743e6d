use super::Consumer;
use crate::error::{Error, Result};
use crate::value::Value;

/// Replays a value tree as events.
///
/// Containers are announced with their sizes. `ValuePtr` nodes are followed
/// and `OpaquePtr` nodes run their producer in place. An uninitialized node
/// has no event form and is an error.
pub fn from_value<C: Consumer + ?Sized>(v: &Value<'_>, consumer: &mut C) -> Result<()> {
    match v {
        Value::Uninitialized => Err(Error::Unrepresentable(
            "unable to produce events from uninitialized value".into(),
        )),
        Value::Null => consumer.null(),
        Value::Boolean(b) => consumer.boolean(*b),
        Value::Signed(i) => consumer.number_i64(*i),
        Value::Unsigned(u) => consumer.number_u64(*u),
        Value::Double(d) => consumer.number_f64(*d),
        Value::String(s) => consumer.string(s),
        Value::StringView(s) => consumer.string(s),
        Value::Binary(b) => consumer.binary(b),
        Value::BinaryView(b) => consumer.binary(b),
        Value::Array(a) => {
            consumer.begin_array(Some(a.len()))?;
            for item in a {
                from_value(item, consumer)?;
                consumer.element()?;
            }
            consumer.end_array(Some(a.len()))
        }
        Value::Object(o) => {
            consumer.begin_object(Some(o.len()))?;
            for (k, item) in o {
                consumer.key(k)?;
                from_value(item, consumer)?;
                consumer.member()?;
            }
            consumer.end_object(Some(o.len()))
        }
        Value::ValuePtr(target) => from_value(target, consumer),
        Value::OpaquePtr(opaque) => {
            let mut dyn_consumer = DynRef(consumer);
            opaque.produce(&mut dyn_consumer)
        }
    }
}

/// Sized wrapper so an unsized `C` can still be handed out as
/// `&mut dyn Consumer`.
struct DynRef<'a, C: ?Sized>(&'a mut C);

impl<C: Consumer + ?Sized> Consumer for DynRef<'_, C> {
    fn null(&mut self) -> Result<()> {
        self.0.null()
    }
    fn boolean(&mut self, v: bool) -> Result<()> {
        self.0.boolean(v)
    }
    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.0.number_i64(v)
    }
    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.0.number_u64(v)
    }
    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.0.number_f64(v)
    }
    fn string(&mut self, v: &str) -> Result<()> {
        self.0.string(v)
    }
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        self.0.string_bytes(v)
    }
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.0.binary(v)
    }
    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.0.begin_array(size)
    }
    fn element(&mut self) -> Result<()> {
        self.0.element()
    }
    fn end_array(&mut self, size: Option<usize>) -> Result<()> {
        self.0.end_array(size)
    }
    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.0.begin_object(size)
    }
    fn key(&mut self, v: &str) -> Result<()> {
        self.0.key(v)
    }
    fn member(&mut self) -> Result<()> {
        self.0.member()
    }
    fn end_object(&mut self, size: Option<usize>) -> Result<()> {
        self.0.end_object(size)
    }
}
