use super::constants::*;
use super::parser::{Integer, Parser};
use crate::error::{Error, Result};
use crate::events::Discard;

/// Progress through one array or map opened by a [`PartsParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    size: usize,
    i: usize,
}

impl State {
    fn new(size: usize) -> Self {
        Self { size, i: 0 }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn remaining(&self) -> usize {
        self.size - self.i
    }
}

/// Pull-style MessagePack reader.
///
/// ```
/// use json_events::msgpack::PartsParser;
///
/// // {"id": -3}
/// let mut p = PartsParser::new(&[0x81, 0xa2, b'i', b'd', 0xfd]);
/// let mut state = p.begin_object().unwrap();
/// assert_eq!(p.key(&mut state).unwrap(), "id");
/// assert_eq!(p.number_i64().unwrap(), -3);
/// p.end_object(state).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PartsParser<'a> {
    parser: Parser<'a>,
}

impl<'a> PartsParser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            parser: Parser::new(input),
        }
    }

    pub fn position(&self) -> usize {
        self.parser.position()
    }

    pub fn finish(&self) -> Result<()> {
        self.parser.finish()
    }

    fn expected(start: usize, what: &str) -> Error {
        Error::parse(start, format!("expected {what}"))
    }

    /// Reads the lead byte only if `accept` takes it.
    fn take(&mut self, what: &str, accept: impl Fn(u8) -> bool) -> Result<u8> {
        let start = self.parser.position();
        let b = self.parser.peek()?;
        if !accept(b) {
            return Err(Self::expected(start, what));
        }
        self.parser.next_u8()
    }

    pub fn null(&mut self) -> Result<bool> {
        if self.parser.peek()? == NIL {
            self.parser.next_u8()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn boolean(&mut self) -> Result<bool> {
        let b = self.take("boolean", |b| matches!(b, TRUE | FALSE))?;
        Ok(b == TRUE)
    }

    fn integer(&mut self, what: &str) -> Result<(Integer, usize)> {
        let start = self.parser.position();
        let mut ahead = self.parser.clone();
        let b = ahead.next_u8()?;
        match ahead.integer(b)? {
            Some(int) => {
                self.parser = ahead;
                Ok((int, start))
            }
            None => Err(Self::expected(start, what)),
        }
    }

    pub fn number_i64(&mut self) -> Result<i64> {
        match self.integer("integer")? {
            (Integer::Signed(i), _) => Ok(i),
            (Integer::Unsigned(u), start) => {
                i64::try_from(u).map_err(|_| Error::parse(start, "integer out of range"))
            }
        }
    }

    pub fn number_u64(&mut self) -> Result<u64> {
        match self.integer("unsigned integer")? {
            (Integer::Unsigned(u), _) => Ok(u),
            (Integer::Signed(i), start) => {
                u64::try_from(i).map_err(|_| Error::parse(start, "integer out of range"))
            }
        }
    }

    pub fn number_f64(&mut self) -> Result<f64> {
        let b = self.take("floating point number", |b| {
            matches!(b, FLOAT32 | FLOAT64)
        })?;
        let start = self.parser.position();
        self.parser
            .float(b)?
            .ok_or_else(|| Self::expected(start, "floating point number"))
    }

    pub fn string(&mut self) -> Result<&'a str> {
        let start = self.parser.position();
        let b = self.take("string", |b| matches!(b, 0xa0..=0xbf | STR8 | STR16 | STR32))?;
        let n = self
            .parser
            .str_len(b)?
            .ok_or_else(|| Self::expected(start, "string"))?;
        self.parser.text(n, start)
    }

    pub fn binary(&mut self) -> Result<&'a [u8]> {
        let start = self.parser.position();
        let b = self.take("binary", |b| matches!(b, BIN8 | BIN16 | BIN32))?;
        let n = self
            .parser
            .bin_len(b)?
            .ok_or_else(|| Self::expected(start, "binary"))?;
        self.parser.bytes(n)
    }

    pub fn begin_array(&mut self) -> Result<State> {
        let start = self.parser.position();
        let b = self.take("array", |b| matches!(b, 0x90..=0x9f | ARRAY16 | ARRAY32))?;
        let n = self
            .parser
            .array_len(b)?
            .ok_or_else(|| Self::expected(start, "array"))?;
        Ok(State::new(n))
    }

    pub fn begin_object(&mut self) -> Result<State> {
        let start = self.parser.position();
        let b = self.take("object", |b| matches!(b, 0x80..=0x8f | MAP16 | MAP32))?;
        let n = self
            .parser
            .map_len(b)?
            .ok_or_else(|| Self::expected(start, "object"))?;
        Ok(State::new(n))
    }

    fn next(&mut self, state: &mut State) -> Result<()> {
        if !Self::next_or_end(state) {
            return Err(self.parser.error("unexpected end of container"));
        }
        Ok(())
    }

    fn next_or_end(state: &mut State) -> bool {
        let more = state.i < state.size;
        if more {
            state.i += 1;
        }
        more
    }

    fn end(&self, state: State) -> Result<()> {
        if state.remaining() > 0 {
            return Err(self.parser.error("container has more entries than consumed"));
        }
        Ok(())
    }

    pub fn element(&mut self, state: &mut State) -> Result<()> {
        self.next(state)
    }

    pub fn element_or_end_array(&mut self, state: &mut State) -> Result<bool> {
        Ok(Self::next_or_end(state))
    }

    pub fn end_array(&mut self, state: State) -> Result<()> {
        self.end(state)
    }

    pub fn key(&mut self, state: &mut State) -> Result<&'a str> {
        self.next(state)?;
        self.parser.read_key()
    }

    pub fn member_or_end_object(&mut self, state: &mut State) -> Result<Option<&'a str>> {
        if Self::next_or_end(state) {
            self.parser.read_key().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn end_object(&mut self, state: State) -> Result<()> {
        self.end(state)
    }

    pub fn skip_value(&mut self) -> Result<()> {
        self.parser.parse_value(&mut Discard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nested_input() {
        // {"a": [1, 2.5, "x"], "b": bin(ab), "c": true}
        let input = [
            0x83, 0xa1, b'a', 0x93, 0x01, 0xcb, 0x40, 0x04, 0, 0, 0, 0, 0, 0, 0xa1, b'x', 0xa1,
            b'b', 0xc4, 0x01, 0xab, 0xa1, b'c', 0xc3,
        ];
        let mut p = PartsParser::new(&input);
        let mut obj = p.begin_object().unwrap();
        assert_eq!(obj.size(), 3);
        assert_eq!(p.key(&mut obj).unwrap(), "a");
        let mut arr = p.begin_array().unwrap();
        p.element(&mut arr).unwrap();
        assert_eq!(p.number_u64().unwrap(), 1);
        p.element(&mut arr).unwrap();
        assert_eq!(p.number_f64().unwrap(), 2.5);
        assert!(p.element_or_end_array(&mut arr).unwrap());
        assert_eq!(p.string().unwrap(), "x");
        assert!(!p.element_or_end_array(&mut arr).unwrap());
        p.end_array(arr).unwrap();
        assert_eq!(p.member_or_end_object(&mut obj).unwrap(), Some("b"));
        assert_eq!(p.binary().unwrap(), [0xab]);
        assert_eq!(p.key(&mut obj).unwrap(), "c");
        assert!(p.boolean().unwrap());
        assert_eq!(p.member_or_end_object(&mut obj).unwrap(), None);
        p.end_object(obj).unwrap();
        p.finish().unwrap();
    }

    #[test]
    fn signedness_is_converted_when_in_range() {
        let mut p = PartsParser::new(&[0x05, 0xd0, 0x07, 0xff]);
        assert_eq!(p.number_i64().unwrap(), 5);
        assert_eq!(p.number_u64().unwrap(), 7);
        let err = p.number_u64().unwrap_err();
        assert!(err.to_string().contains("integer out of range"));
    }

    #[test]
    fn mismatches_are_reported() {
        let mut p = PartsParser::new(&[0x92, 0xc0, 0xc0]);
        assert!(p.boolean().is_err());
        let mut arr = p.begin_array().unwrap();
        p.element(&mut arr).unwrap();
        assert!(p.null().unwrap());
        assert!(p.end_array(arr).is_err());
        p.element(&mut arr).unwrap();
        p.skip_value().unwrap();
        assert!(p.element(&mut arr).is_err());
        p.end_array(arr).unwrap();
    }
}
