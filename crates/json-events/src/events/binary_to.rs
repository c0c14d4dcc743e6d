use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use json_events_buffers::hex::to_hex;

use super::{forward_to_inner, transformer_struct, Consumer};
use crate::error::{Error, Result};

transformer_struct!(
    /// Emits binary payloads as padded standard base64 strings.
    BinaryToBase64
);

transformer_struct!(
    /// Emits binary payloads as unpadded URL-safe base64 strings.
    BinaryToBase64Url
);

transformer_struct!(
    /// Emits binary payloads as lowercase hex strings.
    BinaryToHex
);

transformer_struct!(
    /// Rejects binary payloads with [`Error::Binary`].
    BinaryToException
);

impl<C: Consumer> Consumer for BinaryToBase64<C> {
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.inner.string(&STANDARD.encode(v))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for BinaryToBase64Url<C> {
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.inner.string(&URL_SAFE_NO_PAD.encode(v))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for BinaryToHex<C> {
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.inner.string(&to_hex(v))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

impl<C: Consumer> Consumer for BinaryToException<C> {
    fn binary(&mut self, _: &[u8]) -> Result<()> {
        Err(Error::Binary("binary data not allowed".into()))
    }

    forward_to_inner!(
        null, boolean, number_i64, number_u64, number_f64, string, string_bytes,
        begin_array, element, end_array, begin_object, key, member, end_object,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Dump;

    const DATA: &[u8] = &[0xfb, 0xff, 0xbf];

    #[test]
    fn base64_variants() {
        let mut t = BinaryToBase64::new(Dump::new());
        t.binary(DATA).unwrap();
        t.binary(b"a").unwrap();
        assert_eq!(t.inner().as_str(), "string \"+/+/\"\nstring \"YQ==\"\n");

        let mut t = BinaryToBase64Url::new(Dump::new());
        t.binary(DATA).unwrap();
        t.binary(b"a").unwrap();
        assert_eq!(t.inner().as_str(), "string \"-_-_\"\nstring \"YQ\"\n");
    }

    #[test]
    fn hex_and_exception() {
        let mut t = BinaryToHex::new(Dump::new());
        t.binary(DATA).unwrap();
        assert_eq!(t.inner().as_str(), "string \"fbffbf\"\n");

        let mut t = BinaryToException::new(Dump::new());
        assert!(matches!(t.binary(DATA), Err(Error::Binary(_))));
        t.string("fine").unwrap();
    }
}
