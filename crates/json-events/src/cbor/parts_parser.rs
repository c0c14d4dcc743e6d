use std::borrow::Cow;

use super::constants::*;
use super::parser::{into_str, Parser};
use crate::error::{Error, Result};
use crate::events::Discard;

/// Progress through one array or object opened by a [`PartsParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    size: Option<usize>,
    i: usize,
    ended: bool,
}

impl State {
    fn new(size: Option<usize>) -> Self {
        Self {
            size,
            i: 0,
            ended: false,
        }
    }

    /// Declared size, `None` for indefinite containers.
    pub fn size(&self) -> Option<usize> {
        self.size
    }
}

/// Pull-style CBOR reader for callers that know the shape they expect.
///
/// Each method consumes one item of the requested kind or fails with a
/// parse error; declared container sizes are enforced.
///
/// ```
/// use json_events::cbor::PartsParser;
///
/// // [1, "a"]
/// let mut p = PartsParser::new(&[0x82, 0x01, 0x61, b'a']);
/// let mut state = p.begin_array().unwrap();
/// p.element(&mut state).unwrap();
/// assert_eq!(p.number_u64().unwrap(), 1);
/// p.element(&mut state).unwrap();
/// assert_eq!(p.string().unwrap(), "a");
/// p.end_array(state).unwrap();
/// p.finish().unwrap();
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

    fn lead(&mut self) -> Result<(u8, usize)> {
        self.parser.skip_tags()?;
        let start = self.parser.position();
        Ok((self.parser.peek()?, start))
    }

    fn expected(start: usize, what: &str) -> Error {
        Error::parse(start, format!("expected {what}"))
    }

    /// Consumes a `null` if one is next.
    pub fn null(&mut self) -> Result<bool> {
        let (b, _) = self.lead()?;
        if b == NULL {
            self.parser.next_u8()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn boolean(&mut self) -> Result<bool> {
        let (b, start) = self.lead()?;
        let v = match b {
            TRUE => true,
            FALSE => false,
            _ => return Err(Self::expected(start, "boolean")),
        };
        self.parser.next_u8()?;
        Ok(v)
    }

    pub fn number_i64(&mut self) -> Result<i64> {
        let (b, start) = self.lead()?;
        match major(b) {
            MAJOR_UNSIGNED => {
                self.parser.next_u8()?;
                let u = self.parser.read_argument(minor(b))?;
                i64::try_from(u).map_err(|_| Error::parse(start, "integer out of range"))
            }
            MAJOR_NEGATIVE => {
                self.parser.next_u8()?;
                self.parser.read_negative(minor(b), start)
            }
            _ => Err(Self::expected(start, "integer")),
        }
    }

    pub fn number_u64(&mut self) -> Result<u64> {
        let (b, start) = self.lead()?;
        if major(b) != MAJOR_UNSIGNED {
            return Err(Self::expected(start, "unsigned integer"));
        }
        self.parser.next_u8()?;
        self.parser.read_argument(minor(b))
    }

    pub fn number_f64(&mut self) -> Result<f64> {
        let (b, start) = self.lead()?;
        if !matches!(b, FLOAT16 | FLOAT32 | FLOAT64) {
            return Err(Self::expected(start, "floating point number"));
        }
        self.parser.next_u8()?;
        self.parser.read_float(minor(b), start)
    }

    pub fn string(&mut self) -> Result<Cow<'a, str>> {
        let (b, start) = self.lead()?;
        if major(b) != MAJOR_STRING {
            return Err(Self::expected(start, "string"));
        }
        self.parser.next_u8()?;
        let bytes = self.parser.read_chunks(MAJOR_STRING, minor(b))?;
        into_str(bytes, start)
    }

    pub fn binary(&mut self) -> Result<Cow<'a, [u8]>> {
        let (b, start) = self.lead()?;
        if major(b) != MAJOR_BINARY {
            return Err(Self::expected(start, "binary"));
        }
        self.parser.next_u8()?;
        self.parser.read_chunks(MAJOR_BINARY, minor(b))
    }

    fn begin(&mut self, kind: u8, what: &str, min_bytes: usize) -> Result<State> {
        let (b, start) = self.lead()?;
        if major(b) != kind {
            return Err(Self::expected(start, what));
        }
        self.parser.next_u8()?;
        if minor(b) == MINOR_INDEFINITE {
            Ok(State::new(None))
        } else {
            let n = self.parser.read_count(minor(b), min_bytes)?;
            Ok(State::new(Some(n)))
        }
    }

    fn next(&mut self, state: &mut State) -> Result<()> {
        if !self.next_or_end(state)? {
            return Err(self.parser.error("unexpected end of container"));
        }
        Ok(())
    }

    fn next_or_end(&mut self, state: &mut State) -> Result<bool> {
        if state.ended {
            return Ok(false);
        }
        let more = match state.size {
            Some(n) => state.i < n,
            None => !self.parser.at_break()?,
        };
        if more {
            state.i += 1;
        } else {
            state.ended = true;
        }
        Ok(more)
    }

    fn end(&mut self, mut state: State) -> Result<()> {
        if self.next_or_end(&mut state)? {
            return Err(self.parser.error("container has more entries than consumed"));
        }
        Ok(())
    }

    pub fn begin_array(&mut self) -> Result<State> {
        self.begin(MAJOR_ARRAY, "array", 1)
    }

    /// Announces the next array element; fails at the end of the array.
    pub fn element(&mut self, state: &mut State) -> Result<()> {
        self.next(state)
    }

    /// `true` if another element follows; `false` consumes the array end.
    pub fn element_or_end_array(&mut self, state: &mut State) -> Result<bool> {
        self.next_or_end(state)
    }

    pub fn end_array(&mut self, state: State) -> Result<()> {
        self.end(state)
    }

    pub fn begin_object(&mut self) -> Result<State> {
        self.begin(MAJOR_OBJECT, "object", 2)
    }

    /// Reads the key of the next member; fails at the end of the object.
    pub fn key(&mut self, state: &mut State) -> Result<Cow<'a, str>> {
        self.next(state)?;
        self.parser.read_key()
    }

    /// `Some(key)` if another member follows; `None` consumes the object end.
    pub fn member_or_end_object(&mut self, state: &mut State) -> Result<Option<Cow<'a, str>>> {
        if self.next_or_end(state)? {
            self.parser.read_key().map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn end_object(&mut self, state: State) -> Result<()> {
        self.end(state)
    }

    /// Skips one complete value of any kind.
    pub fn skip_value(&mut self) -> Result<()> {
        self.parser.parse_value(&mut Discard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_walk() {
        // {"a": 1.5, "b": [true, null]}
        let input = [
            0xa2, 0x61, b'a', 0xf9, 0x3e, 0x00, 0x61, b'b', 0x82, 0xf5, 0xf6,
        ];
        let mut p = PartsParser::new(&input);
        let mut obj = p.begin_object().unwrap();
        assert_eq!(obj.size(), Some(2));
        assert_eq!(p.key(&mut obj).unwrap(), "a");
        assert_eq!(p.number_f64().unwrap(), 1.5);
        assert_eq!(p.member_or_end_object(&mut obj).unwrap().as_deref(), Some("b"));
        let mut arr = p.begin_array().unwrap();
        assert!(p.element_or_end_array(&mut arr).unwrap());
        assert!(p.boolean().unwrap());
        assert!(p.element_or_end_array(&mut arr).unwrap());
        assert!(p.null().unwrap());
        assert!(!p.element_or_end_array(&mut arr).unwrap());
        p.end_array(arr).unwrap();
        assert_eq!(p.member_or_end_object(&mut obj).unwrap(), None);
        p.end_object(obj).unwrap();
        p.finish().unwrap();
    }

    #[test]
    fn indefinite_array_and_skip() {
        let input = [0x9f, 0x21, 0x82, 0x01, 0x02, 0x41, 0xaa, 0xff];
        let mut p = PartsParser::new(&input);
        let mut arr = p.begin_array().unwrap();
        assert_eq!(arr.size(), None);
        p.element(&mut arr).unwrap();
        assert_eq!(p.number_i64().unwrap(), -2);
        p.element(&mut arr).unwrap();
        p.skip_value().unwrap();
        p.element(&mut arr).unwrap();
        assert_eq!(p.binary().unwrap().into_owned(), [0xaa]);
        assert!(p.element(&mut arr).is_err());
        p.end_array(arr).unwrap();
        p.finish().unwrap();
    }

    #[test]
    fn size_mismatch_is_reported() {
        let input = [0x82, 0x01, 0x02];
        let mut p = PartsParser::new(&input);
        let mut arr = p.begin_array().unwrap();
        p.element(&mut arr).unwrap();
        p.number_u64().unwrap();
        assert!(p.end_array(arr).is_err());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let mut p = PartsParser::new(&[0x61, b'x']);
        assert!(!p.null().unwrap());
        let err = p.number_u64().unwrap_err();
        assert_eq!(err.to_string(), "expected unsigned integer at byte 0");
        assert_eq!(p.string().unwrap(), "x");
    }
}
