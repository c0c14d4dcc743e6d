use json_events_buffers::Writer;

use super::constants::*;
use crate::error::{Error, Result};
use crate::events::Consumer;

fn too_long(what: &str) -> Error {
    Error::Unrepresentable(format!("{what} too long for msgpack"))
}

/// Writes a `str` header for a payload of `len` bytes.
pub fn write_str_hdr(writer: &mut Writer, len: usize) -> Result<()> {
    if len <= 31 {
        writer.u8(FIXSTR | len as u8);
    } else if len <= 0xff {
        writer.u8u8(STR8, len as u8);
    } else if len <= 0xffff {
        writer.u8u16(STR16, len as u16);
    } else if len <= 0xffff_ffff {
        writer.u8u32(STR32, len as u32);
    } else {
        return Err(too_long("string"));
    }
    Ok(())
}

pub fn write_bin_hdr(writer: &mut Writer, len: usize) -> Result<()> {
    if len <= 0xff {
        writer.u8u8(BIN8, len as u8);
    } else if len <= 0xffff {
        writer.u8u16(BIN16, len as u16);
    } else if len <= 0xffff_ffff {
        writer.u8u32(BIN32, len as u32);
    } else {
        return Err(too_long("binary"));
    }
    Ok(())
}

pub fn write_arr_hdr(writer: &mut Writer, len: usize) -> Result<()> {
    if len <= 15 {
        writer.u8(FIXARRAY | len as u8);
    } else if len <= 0xffff {
        writer.u8u16(ARRAY16, len as u16);
    } else if len <= 0xffff_ffff {
        writer.u8u32(ARRAY32, len as u32);
    } else {
        return Err(too_long("array"));
    }
    Ok(())
}

pub fn write_obj_hdr(writer: &mut Writer, len: usize) -> Result<()> {
    if len <= 15 {
        writer.u8(FIXMAP | len as u8);
    } else if len <= 0xffff {
        writer.u8u16(MAP16, len as u16);
    } else if len <= 0xffff_ffff {
        writer.u8u32(MAP32, len as u32);
    } else {
        return Err(too_long("object"));
    }
    Ok(())
}

/// MessagePack emitter.
///
/// Integers use the narrowest encoding; non-negative signed values share
/// the unsigned encodings. Doubles are always `float 64`. Containers need
/// a declared size since MessagePack has no end marker.
#[derive(Debug, Default)]
pub struct ToStream {
    writer: Writer,
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
}

impl Consumer for ToStream {
    fn null(&mut self) -> Result<()> {
        self.writer.u8(NIL);
        Ok(())
    }

    fn boolean(&mut self, v: bool) -> Result<()> {
        self.writer.u8(if v { TRUE } else { FALSE });
        Ok(())
    }

    fn number_i64(&mut self, v: i64) -> Result<()> {
        if v >= 0 {
            return self.number_u64(v as u64);
        }
        let w = &mut self.writer;
        if v >= -32 {
            w.i8(v as i8);
        } else if v >= i64::from(i8::MIN) {
            w.u8(INT8);
            w.i8(v as i8);
        } else if v >= i64::from(i16::MIN) {
            w.u8(INT16);
            w.i16(v as i16);
        } else if v >= i64::from(i32::MIN) {
            w.u8(INT32);
            w.i32(v as i32);
        } else {
            w.u8(INT64);
            w.i64(v);
        }
        Ok(())
    }

    fn number_u64(&mut self, v: u64) -> Result<()> {
        let w = &mut self.writer;
        if v <= u64::from(POSITIVE_FIXINT_MAX) {
            w.u8(v as u8);
        } else if v <= 0xff {
            w.u8u8(UINT8, v as u8);
        } else if v <= 0xffff {
            w.u8u16(UINT16, v as u16);
        } else if v <= 0xffff_ffff {
            w.u8u32(UINT32, v as u32);
        } else {
            w.u8u64(UINT64, v);
        }
        Ok(())
    }

    fn number_f64(&mut self, v: f64) -> Result<()> {
        self.writer.u8f64(FLOAT64, v);
        Ok(())
    }

    fn string(&mut self, v: &str) -> Result<()> {
        write_str_hdr(&mut self.writer, v.len())?;
        self.writer.utf8(v);
        Ok(())
    }

    fn binary(&mut self, v: &[u8]) -> Result<()> {
        write_bin_hdr(&mut self.writer, v.len())?;
        self.writer.buf(v);
        Ok(())
    }

    fn begin_array(&mut self, size: Option<usize>) -> Result<()> {
        let n = size.ok_or_else(|| Error::Unrepresentable("msgpack requires array size".into()))?;
        write_arr_hdr(&mut self.writer, n)
    }

    fn element(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_array(&mut self, _size: Option<usize>) -> Result<()> {
        Ok(())
    }

    fn begin_object(&mut self, size: Option<usize>) -> Result<()> {
        let n =
            size.ok_or_else(|| Error::Unrepresentable("msgpack requires object size".into()))?;
        write_obj_hdr(&mut self.writer, n)
    }

    fn key(&mut self, v: &str) -> Result<()> {
        self.string(v)
    }

    fn member(&mut self) -> Result<()> {
        Ok(())
    }

    fn end_object(&mut self, _size: Option<usize>) -> Result<()> {
        Ok(())
    }
}
