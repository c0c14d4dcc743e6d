//! CBOR (RFC 8949) parser, emitter and drivers.
//!
//! Decoding maps unsigned integers to `number_u64` and negative integers to
//! `number_i64`; every float width decodes to `number_f64`. Tags are
//! skipped. Encoding picks the shortest head for every integer and length.
//!
//! ```
//! use json_events::{cbor, Value};
//!
//! assert_eq!(cbor::to_vec(&Value::Signed(-1)).unwrap(), [0x20]);
//! assert_eq!(cbor::from_slice(&[0x20]).unwrap(), Value::Signed(-1));
//! ```

mod constants;
mod parser;
mod parts_parser;
mod to_stream;

use std::path::Path;

pub use parser::{decode_half, parse, parse_embedded, Parser};
pub use parts_parser::{PartsParser, State};
pub use to_stream::{write_head, ToStream};

use crate::driver;
use crate::error::Result;
use crate::events::Pipeline;
use crate::value::Value;

const FORMAT: &str = "cbor";

/// Decodes a complete CBOR document.
pub fn from_slice(input: &[u8]) -> Result<Value<'static>> {
    from_slice_with(input, &Pipeline::new())
}

/// Decodes a complete CBOR document through `pipeline`.
pub fn from_slice_with(input: &[u8], pipeline: &Pipeline) -> Result<Value<'static>> {
    let mode = pipeline.utf8_mode();
    driver::build_value(FORMAT, input.len(), pipeline, |consumer| {
        let mut parser = Parser::new(input).with_utf8_mode(mode);
        parser.parse_value(consumer)?;
        parser.finish()
    })
}

pub fn from_file(path: impl AsRef<Path>) -> Result<Value<'static>> {
    let data = driver::read_file(FORMAT, path.as_ref())?;
    from_slice(&data)
}

pub fn to_vec(v: &Value<'_>) -> Result<Vec<u8>> {
    to_vec_with(v, &Pipeline::new())
}

/// Encodes `v` after running its events through `pipeline`.
pub fn to_vec_with(v: &Value<'_>, pipeline: &Pipeline) -> Result<Vec<u8>> {
    driver::feed_value(FORMAT, v, pipeline, ToStream::new()).map(ToStream::into_vec)
}
