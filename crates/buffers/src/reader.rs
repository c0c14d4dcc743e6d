//! Bounds-checked big-endian byte reader.

use crate::{utf8, BufferError};

/// A cursor over a borrowed byte slice.
///
/// Every read is bounds-checked and returns [`BufferError::EndOfBuffer`]
/// instead of panicking, so decoders can turn truncated input into a parse
/// error carrying [`Reader::position`].
///
/// # Example
///
/// ```
/// use json_events_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0203));
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    uint8: &'a [u8],
    x: usize,
}

impl<'a> Reader<'a> {
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Current cursor position, in bytes from the start of the input.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Number of bytes left to read.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    pub fn is_empty(&self) -> bool {
        self.x >= self.uint8.len()
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if n > self.size() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.uint8[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Peeks at the current byte without advancing.
    pub fn try_peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), BufferError> {
        self.check(n)?;
        self.x += n;
        Ok(())
    }

    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.take::<1>().map(|b| b[0])
    }

    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        self.take::<1>().map(|b| b[0] as i8)
    }

    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.take().map(u16::from_be_bytes)
    }

    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.take().map(i16::from_be_bytes)
    }

    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.take().map(u32::from_be_bytes)
    }

    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.take().map(i32::from_be_bytes)
    }

    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.take().map(u64::from_be_bytes)
    }

    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.take().map(i64::from_be_bytes)
    }

    #[inline]
    pub fn try_f32(&mut self) -> Result<f32, BufferError> {
        self.take().map(f32::from_be_bytes)
    }

    #[inline]
    pub fn try_f64(&mut self) -> Result<f64, BufferError> {
        self.take().map(f64::from_be_bytes)
    }

    /// Reads `size` raw bytes, borrowing them from the input.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    /// Reads `size` bytes and validates them as UTF-8.
    ///
    /// The cursor only advances when the bytes are valid.
    pub fn try_utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.check(size)?;
        let s = utf8::validate(&self.uint8[self.x..self.x + size])?;
        self.x += size;
        Ok(s)
    }
}
