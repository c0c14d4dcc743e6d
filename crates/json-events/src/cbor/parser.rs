use std::borrow::Cow;

use json_events_buffers::{utf8, BufferError, Reader};
use tracing::trace;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::{Consumer, Utf8Mode};

/// Decodes an IEEE 754 half-precision bit pattern.
pub fn decode_half(half: u16) -> f64 {
    let exp = (half >> 10) & 0x1f;
    let mant = f64::from(half & 0x3ff);
    let val = match exp {
        0 => mant * 2f64.powi(-24),
        31 if mant == 0.0 => f64::INFINITY,
        31 => f64::NAN,
        _ => (mant + 1024.0) * 2f64.powi(i32::from(exp) - 25),
    };
    if half & 0x8000 != 0 {
        -val
    } else {
        val
    }
}

/// Single-pass CBOR decoder emitting events.
///
/// Tags are skipped without producing events. `undefined`, simple values
/// other than `false`, `true` and `null`, and non-string object keys are
/// errors. Definite containers produce sized events; indefinite ones
/// produce unsized events.
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

    /// Fails unless the whole input has been consumed.
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

    /// Consumes a break byte if one is next.
    pub(crate) fn at_break(&mut self) -> Result<bool> {
        if self.peek()? == BREAK {
            self.next_u8()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn read_argument(&mut self, minor: u8) -> Result<u64> {
        let read = match minor {
            0..=23 => return Ok(u64::from(minor)),
            MINOR_ONE_BYTE => self.reader.try_u8().map(u64::from),
            MINOR_TWO_BYTES => self.reader.try_u16().map(u64::from),
            MINOR_FOUR_BYTES => self.reader.try_u32().map(u64::from),
            MINOR_EIGHT_BYTES => self.reader.try_u64(),
            _ => return Err(self.error("invalid minor type")),
        };
        read.map_err(|e| self.eof(e))
    }

    fn read_size(&mut self, minor: u8) -> Result<usize> {
        let n = self.read_argument(minor)?;
        usize::try_from(n).map_err(|_| self.error("length exceeds address space"))
    }

    /// Reads a container count, rejecting counts the remaining input cannot
    /// possibly hold at `min_bytes` per entry.
    pub(crate) fn read_count(&mut self, minor: u8, min_bytes: usize) -> Result<usize> {
        let n = self.read_size(minor)?;
        match n.checked_mul(min_bytes) {
            Some(need) if need <= self.reader.size() => Ok(n),
            _ => Err(self.error("container size exceeds input")),
        }
    }

    pub(crate) fn skip_tags(&mut self) -> Result<()> {
        while let Ok(b) = self.reader.try_peek() {
            if major(b) != MAJOR_TAG {
                break;
            }
            self.next_u8()?;
            self.read_argument(minor(b))?;
        }
        Ok(())
    }

    pub(crate) fn read_negative(&mut self, minor: u8, start: usize) -> Result<i64> {
        let u = self.read_argument(minor)?;
        if u > i64::MAX as u64 {
            return Err(Error::parse(start, "negative integer overflow"));
        }
        Ok(!(u as i64))
    }

    /// Payload of a string or binary item whose lead byte was already read.
    /// Indefinite payloads are the concatenation of same-kind definite chunks.
    pub(crate) fn read_chunks(&mut self, kind: u8, info: u8) -> Result<Cow<'a, [u8]>> {
        if info != MINOR_INDEFINITE {
            let n = self.read_size(info)?;
            return self
                .reader
                .try_buf(n)
                .map(Cow::Borrowed)
                .map_err(|e| self.eof(e));
        }
        let mut out = Vec::new();
        loop {
            let start = self.position();
            let b = self.next_u8()?;
            if b == BREAK {
                return Ok(Cow::Owned(out));
            }
            if major(b) != kind || minor(b) == MINOR_INDEFINITE {
                return Err(Error::parse(start, "invalid chunk in indefinite length item"));
            }
            let n = self.read_size(minor(b))?;
            let chunk = self.reader.try_buf(n).map_err(|e| self.eof(e))?;
            out.extend_from_slice(chunk);
        }
    }

    pub(crate) fn read_key(&mut self) -> Result<Cow<'a, str>> {
        self.skip_tags()?;
        let start = self.position();
        let b = self.next_u8()?;
        if major(b) != MAJOR_STRING {
            return Err(Error::parse(start, "non-string object key"));
        }
        let bytes = self.read_chunks(MAJOR_STRING, minor(b))?;
        into_str(bytes, start)
    }

    pub(crate) fn read_float(&mut self, minor: u8, start: usize) -> Result<f64> {
        let read = match minor {
            MINOR_TWO_BYTES => self.reader.try_u16().map(decode_half),
            MINOR_FOUR_BYTES => self.reader.try_f32().map(f64::from),
            MINOR_EIGHT_BYTES => self.reader.try_f64(),
            _ => return Err(Error::parse(start, "expected floating point number")),
        };
        read.map_err(|e| self.eof(e))
    }

    fn emit_string<C: Consumer + ?Sized>(
        &self,
        consumer: &mut C,
        bytes: &[u8],
        start: usize,
    ) -> Result<()> {
        match self.utf8 {
            Utf8Mode::Check => {
                let s = utf8::validate(bytes).map_err(|e| Error::from_buffer(start, e))?;
                consumer.string(s)
            }
            Utf8Mode::Trust => consumer.string_bytes(bytes),
        }
    }

    /// Parses exactly one value, leaving the cursor after it.
    pub fn parse_value<C: Consumer + ?Sized>(&mut self, consumer: &mut C) -> Result<()> {
        self.skip_tags()?;
        let start = self.position();
        let b = self.next_u8()?;
        let minor = minor(b);
        match major(b) {
            MAJOR_UNSIGNED => {
                let u = self.read_argument(minor)?;
                consumer.number_u64(u)
            }
            MAJOR_NEGATIVE => {
                let i = self.read_negative(minor, start)?;
                consumer.number_i64(i)
            }
            MAJOR_BINARY => {
                let bytes = self.read_chunks(MAJOR_BINARY, minor)?;
                consumer.binary(&bytes)
            }
            MAJOR_STRING => {
                let bytes = self.read_chunks(MAJOR_STRING, minor)?;
                self.emit_string(consumer, &bytes, start)
            }
            MAJOR_ARRAY => self.parse_array(consumer, minor),
            MAJOR_OBJECT => self.parse_object(consumer, minor),
            MAJOR_OTHER => self.parse_other(consumer, minor, start),
            _ => Err(Error::parse(start, "unexpected tag")),
        }
    }

    fn parse_array<C: Consumer + ?Sized>(&mut self, consumer: &mut C, minor: u8) -> Result<()> {
        if minor == MINOR_INDEFINITE {
            trace!(position = self.position(), "cbor indefinite array");
            consumer.begin_array(None)?;
            while !self.at_break()? {
                self.parse_value(consumer)?;
                consumer.element()?;
            }
            consumer.end_array(None)
        } else {
            let n = self.read_count(minor, 1)?;
            trace!(position = self.position(), size = n, "cbor array");
            consumer.begin_array(Some(n))?;
            for _ in 0..n {
                self.parse_value(consumer)?;
                consumer.element()?;
            }
            consumer.end_array(Some(n))
        }
    }

    fn parse_member<C: Consumer + ?Sized>(&mut self, consumer: &mut C) -> Result<()> {
        let key = self.read_key()?;
        consumer.key(&key)?;
        self.parse_value(consumer)?;
        consumer.member()
    }

    fn parse_object<C: Consumer + ?Sized>(&mut self, consumer: &mut C, minor: u8) -> Result<()> {
        if minor == MINOR_INDEFINITE {
            trace!(position = self.position(), "cbor indefinite object");
            consumer.begin_object(None)?;
            while !self.at_break()? {
                self.parse_member(consumer)?;
            }
            consumer.end_object(None)
        } else {
            let n = self.read_count(minor, 2)?;
            trace!(position = self.position(), size = n, "cbor object");
            consumer.begin_object(Some(n))?;
            for _ in 0..n {
                self.parse_member(consumer)?;
            }
            consumer.end_object(Some(n))
        }
    }

    fn parse_other<C: Consumer + ?Sized>(
        &mut self,
        consumer: &mut C,
        simple: u8,
        start: usize,
    ) -> Result<()> {
        match simple {
            s if s == minor(FALSE) => consumer.boolean(false),
            s if s == minor(TRUE) => consumer.boolean(true),
            s if s == minor(NULL) => consumer.null(),
            s if s == minor(UNDEFINED) => {
                Err(Error::parse(start, "undefined is not supported"))
            }
            MINOR_TWO_BYTES | MINOR_FOUR_BYTES | MINOR_EIGHT_BYTES => {
                let v = self.read_float(simple, start)?;
                consumer.number_f64(v)
            }
            MINOR_INDEFINITE => Err(Error::parse(start, "unexpected break")),
            _ => Err(Error::parse(start, "unsupported simple value")),
        }
    }
}

pub(crate) fn into_str(bytes: Cow<'_, [u8]>, start: usize) -> Result<Cow<'_, str>> {
    match bytes {
        Cow::Borrowed(b) => utf8::validate(b)
            .map(Cow::Borrowed)
            .map_err(|e| Error::from_buffer(start, e)),
        Cow::Owned(v) => String::from_utf8(v)
            .map(Cow::Owned)
            .map_err(|_| Error::from_buffer(start, BufferError::InvalidUtf8)),
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Dump;

    fn dump(input: &[u8]) -> Result<String> {
        let mut d = Dump::new();
        parse(input, &mut d)?;
        Ok(d.into_string())
    }

    #[test]
    fn half_precision_special_cases() {
        assert_eq!(decode_half(0x0000), 0.0);
        assert!(decode_half(0x8000).is_sign_negative());
        assert_eq!(decode_half(0x3c00), 1.0);
        assert_eq!(decode_half(0x7c00), f64::INFINITY);
        assert_eq!(decode_half(0xfc00), f64::NEG_INFINITY);
        assert!(decode_half(0x7e00).is_nan());
        assert_eq!(decode_half(0x0001), 5.960464477539063e-8);
        assert_eq!(decode_half(0x7bff), 65504.0);
    }

    #[test]
    fn half_precision_matches_reference() {
        for bits in 0..=u16::MAX {
            let expected = f64::from(half::f16::from_bits(bits));
            let got = decode_half(bits);
            if expected.is_nan() {
                assert!(got.is_nan(), "{bits:#06x}");
            } else {
                assert_eq!(got.to_bits(), expected.to_bits(), "{bits:#06x}");
            }
        }
    }

    #[test]
    fn negative_bias() {
        assert_eq!(dump(&[0x20]).unwrap(), "signed -1\n");
        let mut input = vec![0x3b];
        input.extend_from_slice(&(i64::MAX as u64).to_be_bytes());
        assert_eq!(dump(&input).unwrap(), format!("signed {}\n", i64::MIN));

        let mut input = vec![0x3b];
        input.extend_from_slice(&(1u64 << 63).to_be_bytes());
        let err = dump(&input).unwrap_err();
        assert_eq!(err.position(), Some(0));
        assert!(err.to_string().contains("negative integer overflow"));
    }

    #[test]
    fn tags_are_skipped() {
        // 1(1363896240) as an epoch timestamp, then a tagged string key.
        assert_eq!(
            dump(&[0xc1, 0x1a, 0x51, 0x4b, 0x67, 0xb0]).unwrap(),
            "unsigned 1363896240\n"
        );
        assert_eq!(
            dump(&[0xa1, 0xd8, 0x20, 0x61, b'k', 0xf6]).unwrap(),
            "begin object 1\nkey \"k\"\nnull\nmember\nend object 1\n"
        );
    }

    #[test]
    fn indefinite_items() {
        assert_eq!(
            dump(&[0x9f, 0x01, 0x9f, 0xff, 0xff]).unwrap(),
            "begin array\nunsigned 1\nelement\nbegin array\nend array\nelement\nend array\n"
        );
        assert_eq!(
            dump(&[0x7f, 0x62, b'a', b'b', 0x61, b'c', 0xff]).unwrap(),
            "string \"abc\"\n"
        );
        assert_eq!(
            dump(&[0x5f, 0x41, 0x01, 0x42, 0x02, 0x03, 0xff]).unwrap(),
            "binary 010203\n"
        );
        assert!(dump(&[0x7f, 0x41, 0x01, 0xff]).is_err());
        assert!(dump(&[0x7f, 0x7f, 0xff, 0xff]).is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        for (input, message) in [
            (&[0xf7][..], "undefined is not supported"),
            (&[0xff][..], "unexpected break"),
            (&[0xe0][..], "unsupported simple value"),
            (&[0x1c][..], "invalid minor type"),
            (&[0xa1, 0x01, 0x02][..], "non-string object key"),
            (&[0x19, 0x01][..], "unexpected end of input"),
            (&[0x62, 0xff, 0xfe][..], "invalid utf-8 in string"),
            (&[0x9a, 0xff, 0xff, 0xff, 0xff][..], "container size exceeds input"),
            (&[0x00, 0x00][..], "trailing bytes after value"),
        ] {
            let err = dump(input).unwrap_err();
            assert!(err.to_string().contains(message), "{input:02x?}: {err}");
        }
    }

    #[test]
    fn trust_mode_hands_over_raw_strings() {
        let mut d = Dump::new();
        Parser::new(&[0x62, 0xff, 0xfe])
            .with_utf8_mode(Utf8Mode::Trust)
            .parse_value(&mut d)
            .unwrap();
        assert_eq!(d.as_str(), "string bytes fffe\n");
    }

    #[test]
    fn embedded_reports_consumed_length() {
        let mut d = Dump::new();
        let input = [0x18, 0x64, 0xf5];
        assert_eq!(parse_embedded(&input, &mut d).unwrap(), 2);
        assert_eq!(parse_embedded(&input[2..], &mut d).unwrap(), 1);
        assert_eq!(d.as_str(), "unsigned 100\nboolean true\n");
    }
}
