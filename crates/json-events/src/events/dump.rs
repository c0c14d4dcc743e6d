use std::fmt::Write;

use json_events_buffers::hex::to_hex;

use super::Consumer;
use crate::error::Result;

/// Writes one line of text per event, for tests and troubleshooting.
///
/// ```
/// use json_events::events::{Consumer, Dump};
///
/// let mut dump = Dump::new();
/// dump.begin_array(Some(1)).unwrap();
/// dump.number_u64(7).unwrap();
/// dump.element().unwrap();
/// dump.end_array(Some(1)).unwrap();
/// assert_eq!(dump.as_str(), "begin array 1\nunsigned 7\nelement\nend array 1\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct Dump {
    out: String,
}

impl Dump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> Result<()> {
        // Writing into a String cannot fail.
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
        Ok(())
    }

    fn sized(&mut self, what: &str, size: Option<usize>) -> Result<()> {
        match size {
            Some(n) => self.line(format_args!("{} {}", what, n)),
            None => self.line(format_args!("{}", what)),
        }
    }
}

impl Consumer for Dump {
    fn null(&mut self) -> Result<()> {
        self.line(format_args!("null"))
    }
    fn boolean(&mut self, v: bool) -> Result<()> {
        self.line(format_args!("boolean {}", v))
    }
    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.line(format_args!("signed {}", v))
    }
    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.line(format_args!("unsigned {}", v))
    }
    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.line(format_args!("double {:?}", v))
    }
    fn string(&mut self, v: &str) -> Result<()> {
        self.line(format_args!("string {:?}", v))
    }
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        match std::str::from_utf8(v) {
            Ok(s) => self.string(s),
            Err(_) => self.line(format_args!("string bytes {}", to_hex(v))),
        }
    }
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.line(format_args!("binary {}", to_hex(v)))
    }
    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.sized("begin array", size)
    }
    fn element(&mut self) -> Result<()> {
        self.line(format_args!("element"))
    }
    fn end_array(&mut self, size: Option<usize>) -> Result<()> {
        self.sized("end array", size)
    }
    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.sized("begin object", size)
    }
    fn key(&mut self, v: &str) -> Result<()> {
        self.line(format_args!("key {:?}", v))
    }
    fn member(&mut self) -> Result<()> {
        self.line(format_args!("member"))
    }
    fn end_object(&mut self, size: Option<usize>) -> Result<()> {
        self.sized("end object", size)
    }
}
