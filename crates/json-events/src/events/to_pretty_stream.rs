use super::to_stream::{write_json_double, write_json_string};
use super::{from_value, Consumer};
use crate::error::{Error, Result};
use crate::value::Value;

/// Layout of [`ToPrettyStream`] output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyConfig {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Line terminator.
    pub eol: String,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            eol: "\n".into(),
        }
    }
}

/// Indented JSON text emitter. Empty containers stay on one line and
/// members are written as `"key": value`.
#[derive(Debug, Clone)]
pub struct ToPrettyStream {
    out: String,
    config: PrettyConfig,
    depth: usize,
    first: bool,
    after_key: bool,
}

impl Default for ToPrettyStream {
    fn default() -> Self {
        Self::new(PrettyConfig::default())
    }
}

impl ToPrettyStream {
    pub fn new(config: PrettyConfig) -> Self {
        Self {
            out: String::new(),
            config,
            depth: 0,
            first: true,
            after_key: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn newline(&mut self) {
        self.out.push_str(&self.config.eol);
        let width = self.depth * self.config.indent;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn next(&mut self) {
        if self.after_key {
            self.after_key = false;
            return;
        }
        if !self.first {
            self.out.push(',');
        }
        if self.depth > 0 {
            self.newline();
        }
    }

    fn close(&mut self, c: char) {
        self.depth = self.depth.saturating_sub(1);
        if !self.first {
            self.newline();
        }
        self.out.push(c);
        self.first = false;
    }
}

impl Consumer for ToPrettyStream {
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
        self.depth += 1;
        self.first = true;
        Ok(())
    }

    fn element(&mut self) -> Result<()> {
        self.first = false;
        Ok(())
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        self.close(']');
        Ok(())
    }

    fn begin_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.next();
        self.out.push('{');
        self.depth += 1;
        self.first = true;
        Ok(())
    }

    fn key(&mut self, v: &str) -> Result<()> {
        self.next();
        write_json_string(&mut self.out, v)?;
        self.out.push_str(": ");
        self.after_key = true;
        Ok(())
    }

    fn member(&mut self) -> Result<()> {
        self.first = false;
        Ok(())
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.close('}');
        Ok(())
    }
}

/// Serializes a value as indented JSON text.
pub fn to_pretty_string(v: &Value<'_>, config: PrettyConfig) -> Result<String> {
    let mut stream = ToPrettyStream::new(config);
    from_value(v, &mut stream)?;
    Ok(stream.into_string())
}
