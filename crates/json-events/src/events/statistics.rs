use super::Consumer;
use crate::error::Result;

/// Counts events by kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub nulls: usize,
    pub booleans: usize,
    pub signed: usize,
    pub unsigned: usize,
    pub doubles: usize,
    pub strings: usize,
    pub string_len: usize,
    pub binaries: usize,
    pub binary_len: usize,
    pub arrays: usize,
    pub array_elements: usize,
    pub objects: usize,
    pub object_members: usize,
    pub key_len: usize,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of values seen, containers included.
    pub fn values(&self) -> usize {
        self.nulls
            + self.booleans
            + self.signed
            + self.unsigned
            + self.doubles
            + self.strings
            + self.binaries
            + self.arrays
            + self.objects
    }
}

impl Consumer for Statistics {
    fn null(&mut self) -> Result<()> {
        self.nulls += 1;
        Ok(())
    }
    fn boolean(&mut self, _: bool) -> Result<()> {
        self.booleans += 1;
        Ok(())
    }
    fn number_i64(&mut self, _: i64) -> Result<()> {
        self.signed += 1;
        Ok(())
    }
    fn number_u64(&mut self, _: u64) -> Result<()> {
        self.unsigned += 1;
        Ok(())
    }
    fn number_f64(&mut self, _: f64) -> Result<()> {
        self.doubles += 1;
        Ok(())
    }
    fn string(&mut self, v: &str) -> Result<()> {
        self.strings += 1;
        self.string_len += v.len();
        Ok(())
    }
    fn binary(&mut self, v: &[u8]) -> Result<()> {
        self.binaries += 1;
        self.binary_len += v.len();
        Ok(())
    }
    fn begin_array(&mut self, _: Option<usize>) -> Result<()> {
        self.arrays += 1;
        Ok(())
    }
    fn element(&mut self) -> Result<()> {
        self.array_elements += 1;
        Ok(())
    }
    fn end_array(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
    fn begin_object(&mut self, _: Option<usize>) -> Result<()> {
        self.objects += 1;
        Ok(())
    }
    fn key(&mut self, v: &str) -> Result<()> {
        self.key_len += v.len();
        Ok(())
    }
    fn member(&mut self) -> Result<()> {
        self.object_members += 1;
        Ok(())
    }
    fn end_object(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
}
