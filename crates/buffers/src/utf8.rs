//! UTF-8 validation for string payloads.

use crate::BufferError;

/// Validates `bytes` as UTF-8 and returns them as `&str`.
pub fn validate(bytes: &[u8]) -> Result<&str, BufferError> {
    std::str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
}

pub fn is_valid(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_multibyte_sequences() {
        assert_eq!(validate("ÿ€𝄞".as_bytes()), Ok("ÿ€𝄞"));
        assert!(is_valid(b""));
    }

    #[test]
    fn rejects_malformed_sequences() {
        // lone continuation byte
        assert!(!is_valid(&[0x80]));
        // truncated two-byte sequence
        assert!(!is_valid(&[b'a', 0xc3]));
        // overlong encoding of '/'
        assert!(!is_valid(&[0xc0, 0xaf]));
        // surrogate half
        assert!(!is_valid(&[0xed, 0xa0, 0x80]));
        assert_eq!(validate(&[0xff]), Err(BufferError::InvalidUtf8));
    }
}
