//! Policies for string payloads that are not valid UTF-8.
//!
//! Parsers in [`Utf8Mode::Trust`](super::Utf8Mode) emit `string_bytes`; these
//! transformers decide what happens to it. Valid payloads always continue as
//! `string`.

use json_events_buffers::hex::to_hex;
use json_events_buffers::utf8;

use super::{forward_to_inner, transformer_struct, Consumer};
use crate::error::{Error, Result};

transformer_struct!(
    /// Rejects invalid strings with [`Error::InvalidUtf8`].
    InvalidStringToException
);

transformer_struct!(
    /// Replaces invalid strings with a lowercase hex dump of their bytes.
    InvalidStringToHex
);

transformer_struct!(
    /// Re-emits invalid strings as binary.
    InvalidStringToBinary
);

impl<C: Consumer> Consumer for InvalidStringToException<C> {
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        match utf8::validate(v) {
            Ok(s) => self.inner.string(s),
            Err(_) => Err(Error::InvalidUtf8),
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for InvalidStringToHex<C> {
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        match utf8::validate(v) {
            Ok(s) => self.inner.string(s),
            Err(_) => self.inner.string(&to_hex(v)),
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for InvalidStringToBinary<C> {
    fn string_bytes(&mut self, v: &[u8]) -> Result<()> {
        match utf8::validate(v) {
            Ok(s) => self.inner.string(s),
            Err(_) => self.inner.binary(v),
        }
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, binary,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}
