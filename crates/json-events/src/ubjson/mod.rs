//! UBJSON (Draft 12) parser, emitter and drivers.
//!
//! ```
//! use json_events::{ubjson, Value};
//!
//! assert_eq!(ubjson::to_vec(&Value::Null).unwrap(), b"Z");
//! assert_eq!(ubjson::from_slice(b"Z").unwrap(), Value::Null);
//! ```

mod constants;
mod parser;
mod to_stream;

use std::path::Path;

pub use parser::{parse, parse_embedded, Parser, MAX_EMPTY_PAYLOAD_COUNT};
pub use to_stream::{write_length, write_signed, ToStream};

use crate::driver;
use crate::error::Result;
use crate::events::Pipeline;
use crate::value::Value;

const FORMAT: &str = "ubjson";

/// Decodes a complete UBJSON document.
///
/// Declared container counts are checked against the remaining input.
/// Optimized arrays of `Z`, `T` or `F` carry no element bytes, so their
/// count is capped at [`MAX_EMPTY_PAYLOAD_COUNT`] instead; add
/// `Layer::LimitValueCount` for a tighter bound.
pub fn from_slice(input: &[u8]) -> Result<Value<'static>> {
    from_slice_with(input, &Pipeline::new())
}

/// Decodes a complete UBJSON document through `pipeline`.
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

pub fn to_vec_with(v: &Value<'_>, pipeline: &Pipeline) -> Result<Vec<u8>> {
    driver::feed_value(FORMAT, v, pipeline, ToStream::new()).map(ToStream::into_vec)
}
