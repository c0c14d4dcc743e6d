use json_events_buffers::{BufferError, Reader};
use tracing::trace;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::{Consumer, Utf8Mode};

/// Largest count accepted for an optimized array whose elements have no
/// payload (`$Z`, `$T`, `$F`), which the input length cannot bound.
pub const MAX_EMPTY_PAYLOAD_COUNT: usize = 1 << 16;

/// Header of an array or object: the element type of an optimized
/// container and its count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    typed: Option<u8>,
    count: Option<usize>,
}

/// Single-pass UBJSON decoder emitting events.
///
/// `i`, `I`, `l` and `L` decode to `number_i64`, `U` to `number_u64`.
/// `C` and `S` decode to strings. `H` payloads are decoded as JSON number
/// text. No-op markers are skipped wherever a value may start. Optimized
/// arrays of type `U` decode to a single `binary` event.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    reader: Reader<'a>,
    utf8: Utf8Mode,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(input),
            utf8: Utf8Mode::Check,
        }
    }

    pub fn with_utf8_mode(mut self, utf8: Utf8Mode) -> Self {
        self.utf8 = utf8;
        self
    }

    pub fn position(&self) -> usize {
        self.reader.position()
    }

    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    /// Fails unless only no-op markers remain.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_noops();
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.error("trailing bytes after value"))
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::parse(self.position(), message)
    }

    fn eof(&self, e: BufferError) -> Error {
        Error::from_buffer(self.position(), e)
    }

    fn next_u8(&mut self) -> Result<u8> {
        self.reader.try_u8().map_err(|e| self.eof(e))
    }

    fn peek(&self) -> Result<u8> {
        self.reader.try_peek().map_err(|e| self.eof(e))
    }

    fn skip_noops(&mut self) {
        while self.reader.try_peek() == Ok(NOOP) {
            let _ = self.reader.try_u8();
        }
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.reader.try_buf(n).map_err(|e| self.eof(e))
    }

    /// Reads an integer payload for `marker`, `None` if it is not an
    /// integer marker.
    fn integer(&mut self, marker: u8) -> Result<Option<i64>> {
        let read = match marker {
            INT8 => self.reader.try_i8().map(i64::from),
            UINT8 => self.reader.try_u8().map(i64::from),
            INT16 => self.reader.try_i16().map(i64::from),
            INT32 => self.reader.try_i32().map(i64::from),
            INT64 => self.reader.try_i64(),
            _ => return Ok(None),
        };
        read.map(Some).map_err(|e| self.eof(e))
    }

    /// Reads a marker-prefixed non-negative integer used as a length or count.
    fn read_length(&mut self) -> Result<usize> {
        let start = self.position();
        let marker = self.next_u8()?;
        let n = self
            .integer(marker)?
            .ok_or_else(|| Error::parse(start, "expected integer length"))?;
        usize::try_from(n).map_err(|_| Error::parse(start, "negative length"))
    }

    fn read_text(&mut self) -> Result<&'a [u8]> {
        let n = self.read_length()?;
        self.bytes(n)
    }

    fn read_key(&mut self) -> Result<&'a str> {
        let start = self.position();
        let bytes = self.read_text()?;
        std::str::from_utf8(bytes).map_err(|_| Error::from_buffer(start, BufferError::InvalidUtf8))
    }

    fn emit_string<C: Consumer + ?Sized>(
        &self,
        consumer: &mut C,
        bytes: &[u8],
        start: usize,
    ) -> Result<()> {
        match self.utf8 {
            Utf8Mode::Check => {
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| Error::from_buffer(start, BufferError::InvalidUtf8))?;
                consumer.string(s)
            }
            Utf8Mode::Trust => consumer.string_bytes(bytes),
        }
    }

    /// Parses exactly one value, leaving the cursor after it.
    pub fn parse_value<C: Consumer + ?Sized>(&mut self, consumer: &mut C) -> Result<()> {
        self.skip_noops();
        let start = self.position();
        let marker = self.next_u8()?;
        self.parse_payload(marker, start, consumer)
    }

    /// Parses the payload of a value whose marker is `marker`. `start` is
    /// the offset reported in errors: the marker itself, or the payload for
    /// elements of a typed container.
    fn parse_payload<C: Consumer + ?Sized>(
        &mut self,
        marker: u8,
        start: usize,
        consumer: &mut C,
    ) -> Result<()> {
        match marker {
            NULL => consumer.null(),
            TRUE => consumer.boolean(true),
            FALSE => consumer.boolean(false),
            UINT8 => {
                let v = self.next_u8()?;
                consumer.number_u64(u64::from(v))
            }
            INT8 | INT16 | INT32 | INT64 => match self.integer(marker)? {
                Some(v) => consumer.number_i64(v),
                None => Err(Error::parse(start, "expected integer")),
            },
            FLOAT32 => {
                let v = self.reader.try_f32().map_err(|e| self.eof(e))?;
                consumer.number_f64(f64::from(v))
            }
            FLOAT64 => {
                let v = self.reader.try_f64().map_err(|e| self.eof(e))?;
                consumer.number_f64(v)
            }
            HIGH_PRECISION => {
                let bytes = self.read_text()?;
                emit_high_precision(bytes, start, consumer)
            }
            CHAR => {
                let b = self.next_u8()?;
                if !b.is_ascii() {
                    return Err(Error::parse(start, "char value out of range"));
                }
                let buf = [b];
                let s = std::str::from_utf8(&buf).map_err(|_| Error::InvalidUtf8)?;
                consumer.string(s)
            }
            STRING => {
                let bytes = self.read_text()?;
                self.emit_string(consumer, bytes, start)
            }
            BEGIN_ARRAY => self.parse_array(consumer, start),
            BEGIN_OBJECT => self.parse_object(consumer, start),
            END_ARRAY | END_OBJECT => Err(Error::parse(start, "unexpected container end")),
            NOOP => Err(Error::parse(start, "no-op is not a value")),
            _ => Err(Error::parse(start, format!("unknown marker {marker:#04x}"))),
        }
    }

    fn read_header(&mut self, per_entry: usize) -> Result<Header> {
        let mut typed = None;
        if self.peek()? == CONTAINER_TYPE {
            self.next_u8()?;
            let t = self.next_u8()?;
            if matches!(t, NOOP | END_ARRAY | END_OBJECT | CONTAINER_TYPE | CONTAINER_COUNT) {
                return Err(self.error("invalid container type"));
            }
            typed = Some(t);
            if self.peek()? != CONTAINER_COUNT {
                return Err(self.error("typed container without count"));
            }
        }
        let mut count = None;
        if self.peek()? == CONTAINER_COUNT {
            self.next_u8()?;
            let n = self.read_length()?;
            let min = per_entry + typed.map_or(1, min_payload);
            if min == 0 {
                if n > MAX_EMPTY_PAYLOAD_COUNT {
                    return Err(self.error("container size exceeds limit"));
                }
            } else if n.checked_mul(min).map_or(true, |need| need > self.reader.size()) {
                return Err(self.error("container size exceeds input"));
            }
            count = Some(n);
        }
        Ok(Header { typed, count })
    }

    fn parse_element<C: Consumer + ?Sized>(
        &mut self,
        typed: Option<u8>,
        consumer: &mut C,
    ) -> Result<()> {
        match typed {
            Some(t) => {
                let start = self.position();
                self.parse_payload(t, start, consumer)
            }
            None => self.parse_value(consumer),
        }
    }

    /// Consumes `end` if it is the next marker, skipping no-ops first.
    fn at_end(&mut self, end: u8) -> Result<bool> {
        self.skip_noops();
        if self.peek()? == end {
            self.next_u8()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_array<C: Consumer + ?Sized>(&mut self, consumer: &mut C, start: usize) -> Result<()> {
        let header = self.read_header(0)?;
        match header {
            Header {
                typed: Some(UINT8),
                count: Some(n),
            } => {
                trace!(position = start, size = n, "ubjson binary");
                let bytes = self.bytes(n)?;
                consumer.binary(bytes)
            }
            Header {
                typed,
                count: Some(n),
            } => {
                trace!(position = start, size = n, "ubjson array");
                consumer.begin_array(Some(n))?;
                for _ in 0..n {
                    self.parse_element(typed, consumer)?;
                    consumer.element()?;
                }
                consumer.end_array(Some(n))
            }
            Header { count: None, .. } => {
                trace!(position = start, "ubjson unsized array");
                consumer.begin_array(None)?;
                while !self.at_end(END_ARRAY)? {
                    self.parse_value(consumer)?;
                    consumer.element()?;
                }
                consumer.end_array(None)
            }
        }
    }

    fn parse_member<C: Consumer + ?Sized>(
        &mut self,
        typed: Option<u8>,
        consumer: &mut C,
    ) -> Result<()> {
        let key = self.read_key()?;
        consumer.key(key)?;
        self.parse_element(typed, consumer)?;
        consumer.member()
    }

    fn parse_object<C: Consumer + ?Sized>(&mut self, consumer: &mut C, start: usize) -> Result<()> {
        let header = self.read_header(2)?;
        match header.count {
            Some(n) => {
                trace!(position = start, size = n, "ubjson object");
                consumer.begin_object(Some(n))?;
                for _ in 0..n {
                    self.parse_member(header.typed, consumer)?;
                }
                consumer.end_object(Some(n))
            }
            None => {
                trace!(position = start, "ubjson unsized object");
                consumer.begin_object(None)?;
                while !self.at_end(END_OBJECT)? {
                    self.parse_member(None, consumer)?;
                }
                consumer.end_object(None)
            }
        }
    }
}

/// Decodes the text of a high-precision number. Integers that fit keep
/// their signedness; everything else becomes a double.
fn emit_high_precision<C: Consumer + ?Sized>(
    bytes: &[u8],
    start: usize,
    consumer: &mut C,
) -> Result<()> {
    let invalid = || Error::parse(start, "invalid high-precision number");
    let text = std::str::from_utf8(bytes).map_err(|_| invalid())?;
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if !text.contains(&['.', 'e', 'E'][..]) {
        if text.starts_with('-') {
            if let Ok(i) = text.parse::<i64>() {
                return consumer.number_i64(i);
            }
        } else if let Ok(u) = text.parse::<u64>() {
            return consumer.number_u64(u);
        }
    }
    let v = text.parse::<f64>().map_err(|_| invalid())?;
    consumer.number_f64(v)
}

/// Parses one value that must span the whole input.
pub fn parse<C: Consumer + ?Sized>(input: &[u8], consumer: &mut C) -> Result<()> {
    let mut parser = Parser::new(input);
    parser.parse_value(consumer)?;
    parser.finish()
}

/// Parses one value from the front of `input` and returns the number of
/// bytes it occupied.
pub fn parse_embedded<C: Consumer + ?Sized>(input: &[u8], consumer: &mut C) -> Result<usize> {
    let mut parser = Parser::new(input);
    parser.parse_value(consumer)?;
    Ok(parser.position())
}
