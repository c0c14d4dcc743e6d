use tracing::trace;

use super::Consumer;
use crate::error::{Error, Result};
use crate::value::Value;

/// Declared sizes above this are not trusted for preallocation.
const MAX_PREALLOCATED: usize = 4096;

/// Terminal consumer that builds a [`Value`] tree.
///
/// Each finished scalar or container lands in `value`; `element` and `member`
/// move it into the container on top of the stack. Strings and binaries are
/// copied, so the result is always self-contained.
#[derive(Debug, Default)]
pub struct ToValue {
    value: Value<'static>,
    stack: Vec<Value<'static>>,
    keys: Vec<String>,
}

impl ToValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently completed value.
    pub fn value(&self) -> &Value<'static> {
        &self.value
    }

    /// Takes the built tree. Fails if a container is still open.
    pub fn into_value(self) -> Result<Value<'static>> {
        if !self.stack.is_empty() {
            return Err(Error::EventOrder(format!(
                "{} container(s) still open",
                self.stack.len()
            )));
        }
        Ok(self.value)
    }

    fn top(&mut self, event: &str) -> Result<&mut Value<'static>> {
        self.stack
            .last_mut()
            .ok_or_else(|| Error::EventOrder(format!("{event} outside of a container")))
    }
}

impl Consumer for ToValue {
    fn null(&mut self) -> Result<()> {
        self.value = Value::Null;
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.value = Value::Boolean(v);
        Ok(())
    }

    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.value = Value::Signed(v);
        Ok(())
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.value = Value::Unsigned(v);
        Ok(())
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.value = Value::Double(v);
        Ok(())
    }

    fn string(&mut self, v: &str) -> Result<()> {
        self.value = Value::String(v.to_owned());
        Ok(())
    }

    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.value = Value::Binary(v.to_vec());
        Ok(())
    }

    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        trace!(depth = self.stack.len(), ?size, "begin array");
        let hint = size.unwrap_or(0).min(MAX_PREALLOCATED);
        self.stack.push(Value::Array(Vec::with_capacity(hint)));
        Ok(())
    }

    fn element(&mut self) -> Result<()> {
        let v = std::mem::take(&mut self.value);
        match self.top("element")? {
            Value::Array(a) => {
                a.push(v);
                Ok(())
            }
            _ => Err(Error::EventOrder("element inside an object".into())),
        }
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        match self.stack.pop() {
            Some(v @ Value::Array(_)) => {
                trace!(depth = self.stack.len(), "end array");
                self.value = v;
                Ok(())
            }
            _ => Err(Error::EventOrder("end_array without open array".into())),
        }
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        trace!(depth = self.stack.len(), ?size, "begin object");
        self.stack.push(Value::empty_object());
        Ok(())
    }

    fn key(&mut self, v: &str) -> Result<()> {
        self.keys.push(v.to_owned());
        Ok(())
    }

    fn member(&mut self) -> Result<()> {
        let v = std::mem::take(&mut self.value);
        let key = self
            .keys
            .pop()
            .ok_or_else(|| Error::EventOrder("member without key".into()))?;
        match self.top("member")? {
            Value::Object(o) => {
                o.insert(key, v);
                Ok(())
            }
            _ => Err(Error::EventOrder("member inside an array".into())),
        }
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        match self.stack.pop() {
            Some(v @ Value::Object(_)) => {
                trace!(depth = self.stack.len(), "end object");
                self.value = v;
                Ok(())
            }
            _ => Err(Error::EventOrder("end_object without open object".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let mut c = ToValue::new();
        c.begin_object(Some(2)).unwrap();
        c.key("list").unwrap();
        c.begin_array(None).unwrap();
        c.number_i64(-3).unwrap();
        c.element().unwrap();
        c.binary(&[9]).unwrap();
        c.element().unwrap();
        c.end_array(None).unwrap();
        c.member().unwrap();
        c.key("ok").unwrap();
        c.boolean(true).unwrap();
        c.member().unwrap();
        c.end_object(Some(2)).unwrap();

        let v = c.into_value().unwrap();
        assert_eq!(v.get("ok").and_then(Value::as_bool), Some(true));
        let list = v.get("list").and_then(Value::as_array).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], Value::Signed(-3));
        assert_eq!(list[1].as_bytes(), Some(&[9u8][..]));
        assert!(v.is_self_contained());
    }

    #[test]
    fn last_duplicate_key_wins() {
        let mut c = ToValue::new();
        c.begin_object(None).unwrap();
        for n in [1u64, 2] {
            c.key("k").unwrap();
            c.number_u64(n).unwrap();
            c.member().unwrap();
        }
        c.end_object(None).unwrap();
        let v = c.into_value().unwrap();
        assert_eq!(v.get("k"), Some(&Value::Unsigned(2)));
    }

    #[test]
    fn incomplete_sequence_is_rejected() {
        let mut c = ToValue::new();
        c.begin_array(Some(1)).unwrap();
        c.null().unwrap();
        assert!(matches!(c.into_value(), Err(Error::EventOrder(_))));
    }

    #[test]
    fn mismatched_end_is_rejected() {
        let mut c = ToValue::new();
        c.begin_array(None).unwrap();
        assert!(c.end_object(None).is_err());
    }
}
