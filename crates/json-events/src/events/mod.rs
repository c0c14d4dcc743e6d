//! The events protocol.
//!
//! Producers (parsers, [`from_value`]) push one method call per token into a
//! [`Consumer`]. Transformers wrap a consumer, rewrite some calls and forward
//! the rest. Terminal consumers ([`ToValue`], the `ToStream` emitters) turn
//! the call sequence into a tree or bytes.
//!
//! A valid sequence describes exactly one top-level value:
//!
//! ```text
//! value   := scalar | array | object
//! scalar  := null | boolean | number_* | string | binary
//! array   := begin_array (value element)* end_array
//! object  := begin_object (key value member)* end_object
//! ```
//!
//! [`ValidateEventOrder`] checks this grammar at runtime.

mod binary_to;
mod discard;
mod dump;
mod from_value;
mod invalid_string;
mod key_case;
mod limits;
mod non_finite;
mod prefer;
mod statistics;
mod tee;
mod to_pretty_stream;
mod to_stream;
mod to_value;
mod transformer;
mod validate_event_order;

pub use binary_to::{BinaryToBase64, BinaryToBase64Url, BinaryToException, BinaryToHex};
pub use discard::Discard;
pub use dump::Dump;
pub use from_value::from_value;
pub use invalid_string::{InvalidStringToBinary, InvalidStringToException, InvalidStringToHex};
pub use key_case::{
    camel_case_to_snake_case, snake_case_to_camel_case, KeyCamelCaseToSnakeCase,
    KeySnakeCaseToCamelCase,
};
pub use limits::{LimitNestingDepth, LimitValueCount};
pub use non_finite::{NonFiniteToException, NonFiniteToNull, NonFiniteToString};
pub use prefer::{PreferSigned, PreferUnsigned};
pub use statistics::Statistics;
pub use tee::{Tee, TeeTuple};
pub use to_pretty_stream::{to_pretty_string, PrettyConfig, ToPrettyStream};
pub use to_stream::{to_string, ToStream};
pub use to_value::ToValue;
pub use transformer::{Layer, Pipeline, Wrap};
pub use validate_event_order::ValidateEventOrder;

use crate::error::{Error, Result};

/// Receiver of the events protocol.
///
/// String and binary arguments are only valid for the duration of the call;
/// implementations that keep them must copy. Sized container events carry the
/// number of elements or members the producer is about to emit; a `None` size
/// means the consumer must not assume any capacity.
///
/// The trait is object safe: `&mut dyn Consumer` is the type-erased boundary
/// used by [`Pipeline`] and by [`crate::value::Produce`].
pub trait Consumer {
    fn null(&mut self) -> Result<()>;
    fn boolean(&mut self, v: bool) -> Result<()>;
    fn number_i64(&mut self, v: i64) -> Result<()>;
    fn number_u64(&mut self, v: u64) -> Result<()>;
    fn number_f64(&mut self, v: f64) -> Result<()>;
    fn string(&mut self, v: &str) -> Result<()>;

    /// A string whose bytes have not been checked for UTF-8 validity.
    ///
    /// Parsers running in [`Utf8Mode::Trust`] emit this instead of
    /// [`Consumer::string`]. The default validates and forwards.
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        let s = std::str::from_utf8(v).map_err(|_| Error::InvalidUtf8)?;
        self.string(s)
    }

    fn binary(&mut self, v: &[u8]) -> Result<()>;

    fn begin_array(&mut self, size: Option<usize>) -> Result<()>;
    fn element(&mut self) -> Result<()>;
    fn end_array(&mut self, size: Option<usize>) -> Result<()>;

    fn begin_object(&mut self, size: Option<usize>) -> Result<()>;
    fn key(&mut self, v: &str) -> Result<()>;
    fn member(&mut self) -> Result<()>;
    fn end_object(&mut self, size: Option<usize>) -> Result<()>;
}

/// How parsers treat the bytes of string payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Validate and emit [`Consumer::string`]; invalid bytes are a parse error.
    #[default]
    Check,
    /// Emit [`Consumer::string_bytes`] and let the consumer chain decide.
    Trust,
}

macro_rules! forward_consumer {
    () => {
        fn null(&mut self) -> Result<()> {
            (**self).null()
        }
        fn boolean(&mut self, v: bool) -> Result<()> {
            (**self).boolean(v)
        }
        fn number_i64(&mut self, v: i64) -> Result<()> {
            (**self).number_i64(v)
        }
        fn number_u64(&mut self, v: u64) -> Result<()> {
            (**self).number_u64(v)
        }
        fn number_f64(&mut self, v: f64) -> Result<()> {
            (**self).number_f64(v)
        }
        fn string(&mut self, v: &str) -> Result<()> {
            (**self).string(v)
        }
        fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
            (**self).string_bytes(v)
        }
        fn binary(&mut self, v: &[u8]) -> Result<()> {
            (**self).binary(v)
        }
        fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
            (**self).begin_array(size)
        }
        fn element(&mut self) -> Result<()> {
            (**self).element()
        }
        fn end_array(&mut self, size: Option<usize>) -> Result<()> {
            (**self).end_array(size)
        }
        fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
            (**self).begin_object(size)
        }
        fn key(&mut self, v: &str) -> Result<()> {
            (**self).key(v)
        }
        fn member(&mut self) -> Result<()> {
            (**self).member()
        }
        fn end_object(&mut self, size: Option<usize>) -> Result<()> {
            (**self).end_object(size)
        }
    };
}

impl<C: Consumer + ?Sized> Consumer for &mut C {
    forward_consumer!();
}

impl<C: Consumer + ?Sized> Consumer for Box<C> {
    forward_consumer!();
}

/// Generates the pass-through half of a transformer: every listed event is
/// forwarded to `self.inner` unchanged.
macro_rules! forward_to_inner {
    (@one null) => {
        fn null(&mut self) -> $crate::error::Result<()> { self.inner.null() }
    };
    (@one boolean) => {
        fn boolean(&mut self, v: bool) -> $crate::error::Result<()> { self.inner.boolean(v) }
    };
    (@one number_i64) => {
        fn number_i64(&mut self, v: i64) -> $crate::error::Result<()> { self.inner.number_i64(v) }
    };
    (@one number_u64) => {
        fn number_u64(&mut self, v: u64) -> $crate::error::Result<()> { self.inner.number_u64(v) }
    };
    (@one number_f64) => {
        fn number_f64(&mut self, v: f64) -> $crate::error::Result<()> { self.inner.number_f64(v) }
    };
    (@one string) => {
        fn string(&mut self, v: &str) -> $crate::error::Result<()> { self.inner.string(v) }
    };
    (@one string_bytes) => {
        fn string_bytes(&mut self, v: &[u8]) -> $crate::error::Result<()> { self.inner.string_bytes(v) }
    };
    (@one binary) => {
        fn binary(&mut self, v: &[u8]) -> $crate::error::Result<()> { self.inner.binary(v) }
    };
    (@one begin_array) => {
        fn begin_array(&mut self, size: Option<usize>) -> $crate::error::Result<()> { self.inner.begin_array(size) }
    };
    (@one element) => {
        fn element(&mut self) -> $crate::error::Result<()> { self.inner.element() }
    };
    (@one end_array) => {
        fn end_array(&mut self, size: Option<usize>) -> $crate::error::Result<()> { self.inner.end_array(size) }
    };
    (@one begin_object) => {
        fn begin_object(&mut self, size: Option<usize>) -> $crate::error::Result<()> { self.inner.begin_object(size) }
    };
    (@one key) => {
        fn key(&mut self, v: &str) -> $crate::error::Result<()> { self.inner.key(v) }
    };
    (@one member) => {
        fn member(&mut self) -> $crate::error::Result<()> { self.inner.member() }
    };
    (@one end_object) => {
        fn end_object(&mut self, size: Option<usize>) -> $crate::error::Result<()> { self.inner.end_object(size) }
    };
    ($($event:ident),* $(,)?) => {
        $(forward_to_inner!(@one $event);)*
    };
}
pub(crate) use forward_to_inner;

/// Defines a single-consumer transformer struct with `new`, `inner`,
/// `into_inner`.
macro_rules! transformer_struct {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone)]
        pub struct $name<C> {
            inner: C,
        }

        impl<C> $name<C> {
            pub fn new(inner: C) -> Self {
                Self { inner }
            }

            pub fn inner(&self) -> &C {
                &self.inner
            }

            pub fn inner_mut(&mut self) -> &mut C {
                &mut self.inner
            }

            pub fn into_inner(self) -> C {
                self.inner
            }
        }
    };
}
pub(crate) use transformer_struct;
