use std::fmt;

use super::{Consumer, Discard};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectTopLevelValue,
    ExpectNothing,
    ExpectArrayValueOrEnd,
    ExpectArrayElement,
    ExpectObjectKeyOrEnd,
    ExpectObjectValue,
    ExpectObjectMember,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            State::ExpectTopLevelValue => "expect top level value",
            State::ExpectNothing => "expect nothing",
            State::ExpectArrayValueOrEnd => "expect array value or end",
            State::ExpectArrayElement => "expect array element",
            State::ExpectObjectKeyOrEnd => "expect object key or end",
            State::ExpectObjectValue => "expect object value",
            State::ExpectObjectMember => "expect object member",
        })
    }
}

#[derive(Debug, Clone)]
struct Frame {
    resume: State,
    size: Option<usize>,
    count: usize,
}

/// Checks that events arrive in grammar order and forwards them.
///
/// Sized containers are held to their declared size: an `element` or
/// `member` beyond it fails immediately, and the end event fails unless the
/// count matches both the begin size and its own size.
///
/// ```
/// use json_events::events::{Consumer, ValidateEventOrder};
///
/// let mut v = ValidateEventOrder::default();
/// v.begin_array(Some(1)).unwrap();
/// v.null().unwrap();
/// v.element().unwrap();
/// assert!(v.end_array(Some(2)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ValidateEventOrder<C = Discard> {
    inner: C,
    state: State,
    stack: Vec<Frame>,
}

impl Default for ValidateEventOrder<Discard> {
    fn default() -> Self {
        Self::new(Discard)
    }
}

impl<C> ValidateEventOrder<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            state: State::ExpectTopLevelValue,
            stack: Vec::new(),
        }
    }

    /// `true` once exactly one complete top-level value has been seen.
    pub fn is_complete(&self) -> bool {
        self.state == State::ExpectNothing
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn unexpected(&self, event: &str) -> Error {
        Error::EventOrder(format!("{event} called in state '{}'", self.state))
    }

    /// Consumes one value slot, returning the state that follows it.
    fn slot(&self, event: &str) -> Result<State> {
        match self.state {
            State::ExpectTopLevelValue => Ok(State::ExpectNothing),
            State::ExpectArrayValueOrEnd => Ok(State::ExpectArrayElement),
            State::ExpectObjectValue => Ok(State::ExpectObjectMember),
            _ => Err(self.unexpected(event)),
        }
    }

    fn scalar(&mut self, event: &str) -> Result<()> {
        self.state = self.slot(event)?;
        Ok(())
    }

    fn begin(&mut self, event: &str, size: Option<usize>, enter: State) -> Result<()> {
        let resume = self.slot(event)?;
        self.stack.push(Frame {
            resume,
            size,
            count: 0,
        });
        self.state = enter;
        Ok(())
    }

    fn next(&mut self, event: &str, expect: State, then: State) -> Result<()> {
        if self.state != expect {
            return Err(self.unexpected(event));
        }
        let frame = self
            .stack
            .last_mut()
            .ok_or_else(|| Error::EventOrder(format!("{event} outside of a container")))?;
        frame.count += 1;
        if let Some(size) = frame.size {
            if frame.count > size {
                return Err(Error::EventOrder(format!(
                    "{event} exceeds declared size {size}"
                )));
            }
        }
        self.state = then;
        Ok(())
    }

    fn end(&mut self, event: &str, expect: State, size: Option<usize>) -> Result<()> {
        if self.state != expect {
            return Err(self.unexpected(event));
        }
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| Error::EventOrder(format!("{event} outside of a container")))?;
        for declared in [frame.size, size].into_iter().flatten() {
            if declared != frame.count {
                return Err(Error::EventOrder(format!(
                    "{event} size mismatch: declared {declared}, got {}",
                    frame.count
                )));
            }
        }
        self.state = frame.resume;
        Ok(())
    }
}

impl<C: Consumer> Consumer for ValidateEventOrder<C> {
    fn null(&mut self) -> Result<()> {
        self.scalar("null")?;
        self.inner.null()
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.scalar("boolean")?;
        self.inner.boolean(v)
    }

    fn number_i64(&mut self, v: i64) -> Result<()> {
        self.scalar("number")?;
        self.inner.number_i64(v)
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        self.scalar("number")?;
        self.inner.number_u64(v)
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.scalar("number")?;
        self.inner.number_f64(v)
    }

    fn string(&mut self, v: &str) -> Result<()> {
        self.scalar("string")?;
        self.inner.string(v)
    }

    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        self.scalar("string")?;
        self.inner.string_bytes(v)
    }

    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.scalar("binary")?;
        self.inner.binary(v)
    }

    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.begin("begin_array", size, State::ExpectArrayValueOrEnd)?;
        self.inner.begin_array(size)
    }

    fn element(&mut self) -> Result<()> {
        self.next("element", State::ExpectArrayElement, State::ExpectArrayValueOrEnd)?;
        self.inner.element()
    }

    fn end_array(&mut self, size: Option<usize>) -> Result<()> {
        self.end("end_array", State::ExpectArrayValueOrEnd, size)?;
        self.inner.end_array(size)
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.begin("begin_object", size, State::ExpectObjectKeyOrEnd)?;
        self.inner.begin_object(size)
    }

    fn key(&mut self, v: &str) -> Result<()> {
        if self.state != State::ExpectObjectKeyOrEnd {
            return Err(self.unexpected("key"));
        }
        self.state = State::ExpectObjectValue;
        self.inner.key(v)
    }

    fn member(&mut self) -> Result<()> {
        self.next("member", State::ExpectObjectMember, State::ExpectObjectKeyOrEnd)?;
        self.inner.member()
    }

    fn end_object(&mut self, size: Option<usize>) -> Result<()> {
        self.end("end_object", State::ExpectObjectKeyOrEnd, size)?;
        self.inner.end_object(size)
    }
}
