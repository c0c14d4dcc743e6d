//! Append-only big-endian byte writer.

/// A byte sink that grows as needed.
///
/// All multi-byte quantities are written big-endian, the byte order shared by
/// CBOR, MessagePack and UBJSON.
///
/// # Example
///
/// ```
/// use json_events_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// assert_eq!(writer.flush(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written since the last flush.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }

    /// Discards everything written since the last flush.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.buf.push(val as u8);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a marker byte followed by a big-endian `u8` operand.
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.buf.extend_from_slice(&[marker, val]);
    }

    /// Writes a marker byte followed by a big-endian `u16` operand.
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.u8(marker);
        self.u16(val);
    }

    /// Writes a marker byte followed by a big-endian `u32` operand.
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.u8(marker);
        self.u32(val);
    }

    /// Writes a marker byte followed by a big-endian `u64` operand.
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.u8(marker);
        self.u64(val);
    }

    /// Writes a marker byte followed by a big-endian `f32`.
    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.u8(marker);
        self.f32(val);
    }

    /// Writes a marker byte followed by a big-endian `f64`.
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.u8(marker);
        self.f64(val);
    }

    /// Writes a raw byte slice.
    pub fn buf(&mut self, buf: &[u8]) {
        self.buf.extend_from_slice(buf);
    }

    /// Writes the UTF-8 bytes of `s`, returning the number of bytes written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf.extend_from_slice(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_u16() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        assert_eq!(writer.flush(), [0x01, 0x02]);
    }

    #[test]
    fn test_u32() {
        let mut writer = Writer::new();
        writer.u32(0x01020304);
        assert_eq!(writer.flush(), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_marker_pairs() {
        let mut writer = Writer::new();
        writer.u8u8(0xcc, 0xc8);
        writer.u8u16(0xcd, 0x03e8);
        writer.u8u32(0xce, 0x0001_0000);
        assert_eq!(
            writer.flush(),
            [0xcc, 0xc8, 0xcd, 0x03, 0xe8, 0xce, 0x00, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_u8f64() {
        let mut writer = Writer::new();
        writer.u8f64(0xfb, 1.5);
        assert_eq!(
            writer.flush(),
            [0xfb, 0x3f, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_flush_multiple() {
        let mut writer = Writer::new();
        writer.u8(0x01);
        assert_eq!(writer.flush(), [0x01]);
        assert!(writer.is_empty());
        writer.u8(0x02);
        assert_eq!(writer.flush(), [0x02]);
    }

    #[test]
    fn test_i8_negative() {
        let mut writer = Writer::new();
        writer.i8(-1i8);
        writer.i8(-2i8);
        assert_eq!(writer.flush(), [0xff, 0xfe]);
    }

    #[test]
    fn test_i64_roundtrip() {
        let mut writer = Writer::new();
        writer.i64(-9_999_999_999i64);
        let data = writer.flush();
        assert_eq!(data.len(), 8);
        assert_eq!(
            i64::from_be_bytes(data.try_into().unwrap()),
            -9_999_999_999i64
        );
    }

    #[test]
    fn test_utf8_returns_byte_count() {
        let mut writer = Writer::new();
        let n = writer.utf8("café");
        assert_eq!(n, 5);
        assert_eq!(writer.len(), 5);
        assert_eq!(std::str::from_utf8(writer.as_slice()).unwrap(), "café");
    }
}
