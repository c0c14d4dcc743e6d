use json_events_buffers::{BufferError, Reader};
use tracing::trace;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::{Consumer, Utf8Mode};

/// Single-pass MessagePack decoder emitting events.
///
/// Positive fixints and `uint*` map to `number_u64`, negative fixints and
/// `int*` to `number_i64`. Extension types, the reserved byte `0xc1` and
/// non-string map keys are parse errors.
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

    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.error("trailing bytes after value"))
        }
    }

    pub(crate) fn error(&self, message: &str) -> Error {
        Error::parse(self.position(), message)
    }

    fn eof(&self, e: BufferError) -> Error {
        Error::from_buffer(self.position(), e)
    }

    pub(crate) fn peek(&self) -> Result<u8> {
        self.reader.try_peek().map_err(|e| self.eof(e))
    }

    pub(crate) fn next_u8(&mut self) -> Result<u8> {
        self.reader.try_u8().map_err(|e| self.eof(e))
    }

    fn len8(&mut self) -> Result<usize> {
        self.reader
            .try_u8()
            .map(usize::from)
            .map_err(|e| self.eof(e))
    }

    fn len16(&mut self) -> Result<usize> {
        self.reader
            .try_u16()
            .map(usize::from)
            .map_err(|e| self.eof(e))
    }

    fn len32(&mut self) -> Result<usize> {
        let n = self.reader.try_u32().map_err(|e| self.eof(e))?;
        usize::try_from(n).map_err(|_| self.error("length exceeds address space"))
    }

    fn check_count(&self, n: usize, min_bytes: usize) -> Result<usize> {
        match n.checked_mul(min_bytes) {
            Some(need) if need <= self.reader.size() => Ok(n),
            _ => Err(self.error("container size exceeds input")),
        }
    }

    /// Length of the string whose marker `b` was already read, if it is one.
    pub(crate) fn str_len(&mut self, b: u8) -> Result<Option<usize>> {
        Ok(Some(match b {
            0xa0..=0xbf => usize::from(b & 0x1f),
            STR8 => self.len8()?,
            STR16 => self.len16()?,
            STR32 => self.len32()?,
            _ => return Ok(None),
        }))
    }

    pub(crate) fn bin_len(&mut self, b: u8) -> Result<Option<usize>> {
        Ok(Some(match b {
            BIN8 => self.len8()?,
            BIN16 => self.len16()?,
            BIN32 => self.len32()?,
            _ => return Ok(None),
        }))
    }

    pub(crate) fn array_len(&mut self, b: u8) -> Result<Option<usize>> {
        let n = match b {
            0x90..=0x9f => usize::from(b & 0x0f),
            ARRAY16 => self.len16()?,
            ARRAY32 => self.len32()?,
            _ => return Ok(None),
        };
        self.check_count(n, 1).map(Some)
    }

    pub(crate) fn map_len(&mut self, b: u8) -> Result<Option<usize>> {
        let n = match b {
            0x80..=0x8f => usize::from(b & 0x0f),
            MAP16 => self.len16()?,
            MAP32 => self.len32()?,
            _ => return Ok(None),
        };
        self.check_count(n, 2).map(Some)
    }

    pub(crate) fn bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.reader.try_buf(n).map_err(|e| self.eof(e))
    }

    pub(crate) fn text(&mut self, n: usize, start: usize) -> Result<&'a str> {
        self.reader
            .try_utf8(n)
            .map_err(|e| Error::from_buffer(start, e))
    }

    /// Integer whose marker `b` was already read.
    pub(crate) fn integer(&mut self, b: u8) -> Result<Option<Integer>> {
        let read = match b {
            0x00..=POSITIVE_FIXINT_MAX => return Ok(Some(Integer::Unsigned(u64::from(b)))),
            NEGATIVE_FIXINT_MIN..=0xff => return Ok(Some(Integer::Signed(i64::from(b as i8)))),
            UINT8 => self.reader.try_u8().map(|v| Integer::Unsigned(v.into())),
            UINT16 => self.reader.try_u16().map(|v| Integer::Unsigned(v.into())),
            UINT32 => self.reader.try_u32().map(|v| Integer::Unsigned(v.into())),
            UINT64 => self.reader.try_u64().map(Integer::Unsigned),
            INT8 => self.reader.try_i8().map(|v| Integer::Signed(v.into())),
            INT16 => self.reader.try_i16().map(|v| Integer::Signed(v.into())),
            INT32 => self.reader.try_i32().map(|v| Integer::Signed(v.into())),
            INT64 => self.reader.try_i64().map(Integer::Signed),
            _ => return Ok(None),
        };
        read.map(Some).map_err(|e| self.eof(e))
    }

    pub(crate) fn float(&mut self, b: u8) -> Result<Option<f64>> {
        let read = match b {
            FLOAT32 => self.reader.try_f32().map(f64::from),
            FLOAT64 => self.reader.try_f64(),
            _ => return Ok(None),
        };
        read.map(Some).map_err(|e| self.eof(e))
    }

    pub(crate) fn read_key(&mut self) -> Result<&'a str> {
        let start = self.position();
        let b = self.next_u8()?;
        match self.str_len(b)? {
            Some(n) => self.text(n, start),
            None => Err(Error::parse(start, "non-string object key")),
        }
    }

    /// Parses exactly one value, leaving the cursor after it.
    pub fn parse_value<C: Consumer + ?Sized>(&mut self, consumer: &mut C) -> Result<()> {
        let start = self.position();
        let b = self.next_u8()?;
        match b {
            NIL => return consumer.null(),
            FALSE => return consumer.boolean(false),
            TRUE => return consumer.boolean(true),
            NEVER_USED => return Err(Error::parse(start, "reserved byte 0xc1")),
            EXT8 | EXT16 | EXT32 | FIXEXT1..=FIXEXT16 => {
                return Err(Error::parse(start, "extension types are not supported"))
            }
            _ => {}
        }
        if let Some(int) = self.integer(b)? {
            return match int {
                Integer::Unsigned(u) => consumer.number_u64(u),
                Integer::Signed(i) => consumer.number_i64(i),
            };
        }
        if let Some(v) = self.float(b)? {
            return consumer.number_f64(v);
        }
        if let Some(n) = self.str_len(b)? {
            return match self.utf8 {
                Utf8Mode::Check => {
                    let s = self.text(n, start)?;
                    consumer.string(s)
                }
                Utf8Mode::Trust => {
                    let bytes = self.bytes(n)?;
                    consumer.string_bytes(bytes)
                }
            };
        }
        if let Some(n) = self.bin_len(b)? {
            let bytes = self.bytes(n)?;
            return consumer.binary(bytes);
        }
        if let Some(n) = self.array_len(b)? {
            trace!(position = start, size = n, "msgpack array");
            consumer.begin_array(Some(n))?;
            for _ in 0..n {
                self.parse_value(consumer)?;
                consumer.element()?;
            }
            return consumer.end_array(Some(n));
        }
        if let Some(n) = self.map_len(b)? {
            trace!(position = start, size = n, "msgpack map");
            consumer.begin_object(Some(n))?;
            for _ in 0..n {
                let key = self.read_key()?;
                consumer.key(key)?;
                self.parse_value(consumer)?;
                consumer.member()?;
            }
            return consumer.end_object(Some(n));
        }
        // Every byte value is covered above.
        Err(Error::parse(start, format!("unexpected byte {b:#04x}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Integer {
    Signed(i64),
    Unsigned(u64),
}

/// Parses one value that must span the whole input.
pub fn parse<C: Consumer + ?Sized>(input: &[u8], consumer: &mut C) -> Result<()> {
    let mut parser = Parser::new(input);
    parser.parse_value(consumer)?;
    parser.finish()
}

/// Parses one value from the front of `input` and returns the number of
/// bytes it occupied. Use it to walk a stream of concatenated values.
pub fn parse_embedded<C: Consumer + ?Sized>(input: &[u8], consumer: &mut C) -> Result<usize> {
    let mut parser = Parser::new(input);
    parser.parse_value(consumer)?;
    Ok(parser.position())
}
