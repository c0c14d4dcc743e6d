//! MessagePack parser, emitter and drivers.
//!
//! Extension types are not supported. Since MessagePack containers carry
//! their length up front, the emitter rejects unsized container events;
//! the serialization drivers always feed sized events.
//!
//! ```
//! use json_events::{msgpack, Value};
//!
//! let bytes = msgpack::to_vec(&Value::Unsigned(1000)).unwrap();
//! assert_eq!(bytes, [0xcd, 0x03, 0xe8]);
//! assert_eq!(msgpack::from_slice(&bytes).unwrap(), Value::Unsigned(1000));
//! ```

mod constants;
mod parser;
mod parts_parser;
mod to_stream;

use std::path::Path;

pub use parser::{parse, parse_embedded, Parser};
pub use parts_parser::{PartsParser, State};
pub use to_stream::{write_arr_hdr, write_bin_hdr, write_obj_hdr, write_str_hdr, ToStream};

use crate::driver;
use crate::error::Result;
use crate::events::Pipeline;
use crate::value::Value;

const FORMAT: &str = "msgpack";

pub fn from_slice(input: &[u8]) -> Result<Value<'static>> {
    from_slice_with(input, &Pipeline::new())
}

/// Decodes a complete MessagePack document through `pipeline`.
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
