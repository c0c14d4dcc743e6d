use super::Consumer;
use crate::error::Result;

/// Accepts every event and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Consumer for Discard {
    fn null(&mut self) -> Result<()> {
        Ok(())
    }
    fn boolean(&mut self, _: bool) -> Result<()> {
        Ok(())
    }
    fn number_i64(&mut self, _: i64) -> Result<()> {
        Ok(())
    }
    fn number_u64(&mut self, _: u64) -> Result<()> {
        Ok(())
    }
    fn number_f64(&mut self, _: f64) -> Result<()> {
        Ok(())
    }
    fn string(&mut self, _: &str) -> Result<()> {
        Ok(())
    }
    fn string_bytes(&mut self, _: &[u8]) -> Result<()> {
        Ok(())
    }
    fn binary(&mut self, _: &[u8]) -> Result<()> {
        Ok(())
    }
    fn begin_array(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
    fn element(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_array(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
    fn begin_object(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
    fn key(&mut self, _: &str) -> Result<()> {
        Ok(())
    }
    fn member(&mut self) -> Result<()> {
        Ok(())
    }
    fn end_object(&mut self, _: Option<usize>) -> Result<()> {
        Ok(())
    }
}
