pub const NULL: u8 = b'Z';
pub const NOOP: u8 = b'N';
pub const TRUE: u8 = b'T';
pub const FALSE: u8 = b'F';
pub const INT8: u8 = b'i';
pub const UINT8: u8 = b'U';
pub const INT16: u8 = b'I';
pub const INT32: u8 = b'l';
pub const INT64: u8 = b'L';
pub const FLOAT32: u8 = b'd';
pub const FLOAT64: u8 = b'D';
pub const HIGH_PRECISION: u8 = b'H';
pub const CHAR: u8 = b'C';
pub const STRING: u8 = b'S';
pub const BEGIN_ARRAY: u8 = b'[';
pub const END_ARRAY: u8 = b']';
pub const BEGIN_OBJECT: u8 = b'{';
pub const END_OBJECT: u8 = b'}';
pub const CONTAINER_TYPE: u8 = b'$';
pub const CONTAINER_COUNT: u8 = b'#';

/// Smallest payload one element of an optimized container of type `t`
/// can occupy, markers excluded.
pub fn min_payload(t: u8) -> usize {
    match t {
        NULL | TRUE | FALSE => 0,
        INT16 => 2,
        INT32 | FLOAT32 => 4,
        INT64 | FLOAT64 => 8,
        HIGH_PRECISION | STRING => 2,
        _ => 1,
    }
}
