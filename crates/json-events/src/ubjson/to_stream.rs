use json_events_buffers::Writer;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::Consumer;

/// Writes `v` with the narrowest signed marker.
pub fn write_signed(writer: &mut Writer, v: i64) {
    if let Ok(v) = i8::try_from(v) {
        writer.u8(INT8);
        writer.i8(v);
    } else if let Ok(v) = i16::try_from(v) {
        writer.u8(INT16);
        writer.i16(v);
    } else if let Ok(v) = i32::try_from(v) {
        writer.u8(INT32);
        writer.i32(v);
    } else {
        writer.u8(INT64);
        writer.i64(v);
    }
}

/// Writes a length or count: `U` up to 255, then the signed ladder.
pub fn write_length(writer: &mut Writer, n: usize) -> Result<()> {
    if let Ok(v) = u8::try_from(n) {
        writer.u8u8(UINT8, v);
        return Ok(());
    }
    let v = i64::try_from(n)
        .map_err(|_| Error::Unrepresentable("length too long for ubjson".into()))?;
    write_signed(writer, v);
    Ok(())
}

/// UBJSON emitter.
///
/// Sized containers are written in the optimized `#count` form with no
/// closing marker; unsized ones use explicit `]` / `}`. Binary becomes a
/// strongly typed `[$U#count` array. Unsigned values above `i64::MAX` are
/// written as high-precision numbers.
#[derive(Debug, Default)]
pub struct ToStream {
    writer: Writer,
    indefinite: Vec<bool>,
}

impl ToStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.writer.as_slice()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.writer.into_vec()
    }

    fn begin(&mut self, marker: u8, size: Option<usize>) -> Result<()> {
        self.writer.u8(marker);
        if let Some(n) = size {
            self.writer.u8(CONTAINER_COUNT);
            write_length(&mut self.writer, n)?;
        }
        self.indefinite.push(size.is_none());
        Ok(())
    }

    fn end(&mut self, marker: u8) -> Result<()> {
        match self.indefinite.pop() {
            Some(true) => {
                self.writer.u8(marker);
                Ok(())
            }
            Some(false) => Ok(()),
            None => Err(Error::EventOrder("container end without begin".into())),
        }
    }
}

impl Consumer for ToStream {
    fn null(&mut self) -> Result<()> {
        self.writer.u8(NULL);
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.writer.u8(if v { TRUE } else { FALSE });
        Ok(())
    }

    fn number_i64(&mut self, v: i64) -> Result<()> {
        write_signed(&mut self.writer, v);
        Ok(())
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        if let Ok(b) = u8::try_from(v) {
            self.writer.u8u8(UINT8, b);
        } else if let Ok(i) = i64::try_from(v) {
            write_signed(&mut self.writer, i);
        } else {
            let digits = v.to_string();
            self.writer.u8(HIGH_PRECISION);
            write_length(&mut self.writer, digits.len())?;
            self.writer.utf8(&digits);
        }
        Ok(())
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.writer.u8f64(FLOAT64, v);
        Ok(())
    }

    fn string(&mut self, v: &str) -> Result<()> {
        self.writer.u8(STRING);
        write_length(&mut self.writer, v.len())?;
        self.writer.utf8(v);
        Ok(())
    }

    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.writer.u8(BEGIN_ARRAY);
        self.writer.u8(CONTAINER_TYPE);
        self.writer.u8(UINT8);
        self.writer.u8(CONTAINER_COUNT);
        write_length(&mut self.writer, v.len())?;
        self.writer.buf(v);
        Ok(())
    }

    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.begin(BEGIN_ARRAY, size)
    }

    fn element(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        self.end(END_ARRAY)
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.begin(BEGIN_OBJECT, size)
    }

    fn key(&mut self, v: &str) -> Result<()> {
        write_length(&mut self.writer, v.len())?;
        self.writer.utf8(v);
        Ok(())
    }

    fn member(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.end(END_OBJECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(f: impl FnOnce(&mut ToStream) -> Result<()>) -> Vec<u8> {
        let mut s = ToStream::new();
        f(&mut s).unwrap();
        s.into_vec()
    }

    #[test]
    fn integer_markers() {
        assert_eq!(encode(|s| s.number_i64(-1)), [b'i', 0xff]);
        assert_eq!(encode(|s| s.number_i64(1000)), [b'I', 0x03, 0xe8]);
        assert_eq!(encode(|s| s.number_i64(-40000)), [b'l', 0xff, 0xff, 0x63, 0xc0]);
        assert_eq!(encode(|s| s.number_u64(200)), [b'U', 200]);
        assert_eq!(encode(|s| s.number_u64(300)), [b'I', 0x01, 0x2c]);
        assert_eq!(
            encode(|s| s.number_u64(u64::MAX)),
            b"HU\x1418446744073709551615".to_vec()
        );
    }

    #[test]
    fn strings_keys_and_binary() {
        assert_eq!(encode(|s| s.string("hi")), b"SU\x02hi".to_vec());
        assert_eq!(encode(|s| s.binary(&[0xab])), b"[$U#U\x01\xab".to_vec());
        assert_eq!(
            encode(|s| {
                s.begin_object(Some(1))?;
                s.key("k")?;
                s.null()?;
                s.member()?;
                s.end_object(Some(1))
            }),
            b"{#U\x01U\x01kZ".to_vec()
        );
    }

    #[test]
    fn unsized_containers_are_closed() {
        assert_eq!(
            encode(|s| {
                s.begin_array(None)?;
                s.begin_object(None)?;
                s.end_object(None)?;
                s.element()?;
                s.end_array(None)
            }),
            b"[{}]".to_vec()
        );
        let mut s = ToStream::new();
        assert!(s.end_object(None).is_err());
    }
}
