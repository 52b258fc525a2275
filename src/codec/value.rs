// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort values: one tag byte, then the payload for that tag.
//!
//! ```text
//! tag  type          payload
//! ───  ────────────  ──────────────────────────────
//!  0   null          none
//!  1   string        [len: vint][UTF-8]
//!  2   int32         4 bytes
//!  3   int64         8 bytes
//!  4   float32       4 bytes
//!  5   float64       8 bytes
//!  6   int8          1 byte
//!  7   int16         2 bytes
//!  8   bool          1 byte
//!  9   raw bytes     [len: vint][bytes]
//! 10   big integer   [len: vint][decimal string]
//! ```

use crate::binary::{
    encode_bool, encode_bytes, encode_f32, encode_f64, encode_i16, encode_i32, encode_i64,
    encode_string, WireReader,
};
use crate::error::{Result, WireError};
use crate::types::{BigInteger, SortValue};

pub const TAG_NULL: u8 = 0;
pub const TAG_STRING: u8 = 1;
pub const TAG_INT: u8 = 2;
pub const TAG_LONG: u8 = 3;
pub const TAG_FLOAT: u8 = 4;
pub const TAG_DOUBLE: u8 = 5;
pub const TAG_BYTE: u8 = 6;
pub const TAG_SHORT: u8 = 7;
pub const TAG_BOOL: u8 = 8;
pub const TAG_BYTES: u8 = 9;
pub const TAG_BIG_INTEGER: u8 = 10;

/// The wire tag for a value.
pub fn sort_value_tag(value: &SortValue) -> u8 {
    match value {
        SortValue::Null => TAG_NULL,
        SortValue::String(_) => TAG_STRING,
        SortValue::Int(_) => TAG_INT,
        SortValue::Long(_) => TAG_LONG,
        SortValue::Float(_) => TAG_FLOAT,
        SortValue::Double(_) => TAG_DOUBLE,
        SortValue::Byte(_) => TAG_BYTE,
        SortValue::Short(_) => TAG_SHORT,
        SortValue::Bool(_) => TAG_BOOL,
        SortValue::Bytes(_) => TAG_BYTES,
        SortValue::BigInteger(_) => TAG_BIG_INTEGER,
    }
}

/// Encode a sort value
pub fn encode_sort_value(value: &SortValue, buf: &mut Vec<u8>) {
    buf.push(sort_value_tag(value));
    match value {
        SortValue::Null => {}
        SortValue::String(s) => encode_string(s, buf),
        SortValue::Int(v) => encode_i32(*v, buf),
        SortValue::Long(v) => encode_i64(*v, buf),
        SortValue::Float(v) => encode_f32(*v, buf),
        SortValue::Double(v) => encode_f64(*v, buf),
        SortValue::Byte(v) => buf.push(*v as u8),
        SortValue::Short(v) => encode_i16(*v, buf),
        SortValue::Bool(v) => encode_bool(*v, buf),
        SortValue::Bytes(b) => encode_bytes(b, buf),
        SortValue::BigInteger(v) => encode_string(v.as_str(), buf),
    }
}

/// Decode a sort value
pub fn decode_sort_value(r: &mut WireReader<'_>) -> Result<SortValue> {
    let tag = r.read_u8()?;
    Ok(match tag {
        TAG_NULL => SortValue::Null,
        TAG_STRING => SortValue::String(r.read_string()?),
        TAG_INT => SortValue::Int(r.read_i32()?),
        TAG_LONG => SortValue::Long(r.read_i64()?),
        TAG_FLOAT => SortValue::Float(r.read_f32()?),
        TAG_DOUBLE => SortValue::Double(r.read_f64()?),
        TAG_BYTE => SortValue::Byte(r.read_i8()?),
        TAG_SHORT => SortValue::Short(r.read_i16()?),
        TAG_BOOL => SortValue::Bool(r.read_bool()?),
        TAG_BYTES => SortValue::Bytes(r.read_bytes()?),
        TAG_BIG_INTEGER => SortValue::BigInteger(r.read_string()?.parse::<BigInteger>()?),
        other => {
            return Err(WireError::unsupported_type(format!(
                "can't match sort value type [{}]",
                other
            )));
        }
    })
}
