//! Lowercase hex dumps of byte strings.

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Renders `bytes` as lowercase hex, two digits per byte, no separators.
///
/// ```
/// use json_events_buffers::hex::to_hex;
///
/// assert_eq!(to_hex(&[0x00, 0xab, 0xff]), "00abff");
/// ```
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}
