pub const MAJOR_UNSIGNED: u8 = 0;
pub const MAJOR_NEGATIVE: u8 = 1;
pub const MAJOR_BINARY: u8 = 2;
pub const MAJOR_STRING: u8 = 3;
pub const MAJOR_ARRAY: u8 = 4;
pub const MAJOR_OBJECT: u8 = 5;
pub const MAJOR_TAG: u8 = 6;
pub const MAJOR_OTHER: u8 = 7;

pub const MINOR_ONE_BYTE: u8 = 24;
pub const MINOR_TWO_BYTES: u8 = 25;
pub const MINOR_FOUR_BYTES: u8 = 26;
pub const MINOR_EIGHT_BYTES: u8 = 27;
pub const MINOR_INDEFINITE: u8 = 31;

pub const FALSE: u8 = 0xf4;
pub const TRUE: u8 = 0xf5;
pub const NULL: u8 = 0xf6;
pub const UNDEFINED: u8 = 0xf7;
pub const FLOAT16: u8 = 0xf9;
pub const FLOAT32: u8 = 0xfa;
pub const FLOAT64: u8 = 0xfb;
pub const BREAK: u8 = 0xff;

pub const ARRAY_INDEFINITE: u8 = (MAJOR_ARRAY << 5) | MINOR_INDEFINITE;
pub const OBJECT_INDEFINITE: u8 = (MAJOR_OBJECT << 5) | MINOR_INDEFINITE;

#[inline]
pub fn major(b: u8) -> u8 {
    b >> 5
}

#[inline]
pub fn minor(b: u8) -> u8 {
    b & 0x1f
}
