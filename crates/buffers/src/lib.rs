//! Binary primitives shared by the json-events codecs.
//!
//! - [`Writer`] appends big-endian integers, floats and raw bytes.
//! - [`Reader`] walks a borrowed byte slice with bounds-checked reads.
//! - [`utf8`] validates string payloads, [`hex`] renders byte dumps.

pub mod hex;
mod reader;
pub mod utf8;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// A read needed more bytes than remain in the buffer.
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    /// A string payload is not valid UTF-8.
    #[error("invalid utf-8 sequence")]
    InvalidUtf8,
}

