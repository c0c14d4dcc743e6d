use super::{from_value, Consumer};
use crate::error::{Error, Result};
use crate::value::Value;

/// Appends `s` as a quoted JSON string.
pub(crate) fn write_json_string(out: &mut String, s: &str) -> Result<()> {
    // Fast path: printable ASCII without quotes or backslashes.
    if s.bytes().all(|b| (32..=126).contains(&b) && b != b'"' && b != b'\\') {
        out.reserve(s.len() + 2);
        out.push('"');
        out.push_str(s);
        out.push('"');
        return Ok(());
    }
    let escaped = serde_json::to_string(s).map_err(|e| Error::Unrepresentable(e.to_string()))?;
    out.push_str(&escaped);
    Ok(())
}

/// Appends a finite double in shortest round-trip form, keeping a fraction or
/// exponent so it reads back as a double.
pub(crate) fn write_json_double(out: &mut String, v: f64) -> Result<()> {
    if !v.is_finite() {
        return Err(Error::NonFinite(v));
    }
    out.push_str(&format!("{v:?}"));
    Ok(())
}

/// Compact JSON text emitter.
///
/// Binary payloads and non-finite doubles have no JSON form and fail; put a
/// `BinaryTo*` or `NonFiniteTo*` transformer in front to convert them.
#[derive(Debug, Clone)]
pub struct ToStream {
    out: String,
    first: bool,
}

impl Default for ToStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ToStream {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            first: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn next(&mut self) {
        if !self.first {
            self.out.push(',');
        }
    }
}

impl Consumer for ToStream {
    fn null(&mut self) -> Result<()> {
        self.next();
        self.out.push_str("null");
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.next();
        self.out.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.next();
        self.out.push_str(&v.to_string());
        Ok(())
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.next();
        self.out.push_str(&v.to_string());
        Ok(())
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.next();
        write_json_double(&mut self.out, v)
    }

    fn string(&mut self, v: &str) -> Result<()> {
        self.next();
        write_json_string(&mut self.out, v)
    }

    fn binary(&mut self, _: &[u8]) -> Result<()> {
        Err(Error::Binary("binary data not supported by JSON".into()))
    }

    fn begin_array(&mut self, _size: Option<usize>) -> Result<()> {
        self.next();
        self.out.push('[');
        self.first = true;
        Ok(())
    }

    fn element(&mut self) -> Result<()> {
        self.first = false;
        Ok(())
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        self.out.push(']');
        Ok(())
    }

    fn begin_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.next();
        self.out.push('{');
        self.first = true;
        Ok(())
    }

    fn key(&mut self, v: &str) -> Result<()> {
        self.next();
        write_json_string(&mut self.out, v)?;
        self.out.push(':');
        self.first = true;
        Ok(())
    }

    fn member(&mut self) -> Result<()> {
        self.first = false;
        Ok(())
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.out.push('}');
        Ok(())
    }
}

/// Serializes a value as compact JSON text.
pub fn to_string(v: &Value<'_>) -> Result<String> {
    let mut stream = ToStream::new();
    from_value(v, &mut stream)?;
    Ok(stream.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn compact_output() {
        let v = Value::from(json!({"a": [1, -2, 2.5, null, true], "b": {}, "c": []}));
        assert_eq!(
            to_string(&v).unwrap(),
            r#"{"a":[1,-2,2.5,null,true],"b":{},"c":[]}"#
        );
    }

    #[test]
    fn doubles_keep_their_kind() {
        assert_eq!(to_string(&Value::Double(1.0)).unwrap(), "1.0");
        assert_eq!(to_string(&Value::Double(-0.0)).unwrap(), "-0.0");
        assert!(matches!(
            to_string(&Value::Double(f64::NAN)),
            Err(Error::NonFinite(_))
        ));
    }

    #[test]
    fn strings_are_escaped() {
        let v = Value::from("q\"b\\n\n\u{1}ü");
        assert_eq!(to_string(&v).unwrap(), r#""q\"b\\n\n\u0001ü""#);
    }

    #[test]
    fn binary_is_rejected() {
        assert!(matches!(
            to_string(&Value::Binary(vec![1])),
            Err(Error::Binary(_))
        ));
    }
}
