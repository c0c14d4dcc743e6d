use json_events_buffers::Writer;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::Consumer;

/// Writes a major type head with the shortest argument encoding.
pub fn write_head(writer: &mut Writer, major: u8, n: u64) {
    let major_bits = major << 5;
    if n <= 23 {
        writer.u8(major_bits | n as u8);
    } else if n <= 0xff {
        writer.u8u8(major_bits | MINOR_ONE_BYTE, n as u8);
    } else if n <= 0xffff {
        writer.u8u16(major_bits | MINOR_TWO_BYTES, n as u16);
    } else if n <= 0xffff_ffff {
        writer.u8u32(major_bits | MINOR_FOUR_BYTES, n as u32);
    } else {
        writer.u8u64(major_bits | MINOR_EIGHT_BYTES, n);
    }
}

/// CBOR emitter.
///
/// Integers and lengths use the shortest head, doubles are always written
/// as 64-bit floats. Unsized containers are written with indefinite length
/// and closed with a break byte.
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

    fn begin(&mut self, major: u8, indefinite_byte: u8, size: Option<usize>) {
        match size {
            Some(n) => write_head(&mut self.writer, major, n as u64),
            None => self.writer.u8(indefinite_byte),
        }
        self.indefinite.push(size.is_none());
    }

    fn end(&mut self) -> Result<()> {
        match self.indefinite.pop() {
            Some(true) => {
                self.writer.u8(BREAK);
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
        if v >= 0 {
            write_head(&mut self.writer, MAJOR_UNSIGNED, v as u64);
        } else {
            write_head(&mut self.writer, MAJOR_NEGATIVE, !v as u64);
        }
        Ok(())
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        write_head(&mut self.writer, MAJOR_UNSIGNED, v);
        Ok(())
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.writer.u8f64(FLOAT64, v);
        Ok(())
    }

    fn string(&mut self, v: &str) -> Result<()> {
        write_head(&mut self.writer, MAJOR_STRING, v.len() as u64);
        self.writer.utf8(v);
        Ok(())
    }

    fn binary(&mut self, v: &[u8]) -> Result<()> {
        write_head(&mut self.writer, MAJOR_BINARY, v.len() as u64);
        self.writer.buf(v);
        Ok(())
    }

    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        self.begin(MAJOR_ARRAY, ARRAY_INDEFINITE, size);
        Ok(())
    }

    fn element(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        self.end()
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        self.begin(MAJOR_OBJECT, OBJECT_INDEFINITE, size);
        Ok(())
    }

    fn key(&mut self, v: &str) -> Result<()> {
        self.string(v)
    }

    fn member(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        self.end()
    }
}
