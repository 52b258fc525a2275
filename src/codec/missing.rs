// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A sort field's missing value.
//!
//! ```text
//! [id: u8]  0 = generic value follows
//!           1 = STRING_FIRST (no payload)
//!           2 = STRING_LAST  (no payload)
//! ```
//!
//! The generic value uses the transport's generic-value table, not the sort
//! value table. Its tags are signed bytes:
//!
//! ```text
//! -1 null      0 string    1 int32     2 int64    3 float32   4 float64
//!  5 bool      6 byte[]   11 int8     16 int16   21 bytes ref
//! ```
//!
//! "No missing value" is id 0 followed by a generic null.

use crate::binary::{
    encode_bool, encode_bytes, encode_f32, encode_f64, encode_i16, encode_i32, encode_i64,
    encode_string, WireReader,
};
use crate::error::{Result, WireError};
use crate::types::{GenericValue, MissingValue};

const MISSING_GENERIC: u8 = 0;
const MISSING_STRING_FIRST: u8 = 1;
const MISSING_STRING_LAST: u8 = 2;

const GENERIC_NULL: i8 = -1;
const GENERIC_STRING: i8 = 0;
const GENERIC_INT: i8 = 1;
const GENERIC_LONG: i8 = 2;
const GENERIC_FLOAT: i8 = 3;
const GENERIC_DOUBLE: i8 = 4;
const GENERIC_BOOL: i8 = 5;
const GENERIC_BYTE_ARRAY: i8 = 6;
const GENERIC_BYTE: i8 = 11;
const GENERIC_SHORT: i8 = 16;
const GENERIC_BYTES_REF: i8 = 21;

// ============================================================================
// GENERIC VALUES
// ============================================================================

pub fn encode_generic_value(value: &GenericValue, buf: &mut Vec<u8>) {
    let tag = match value {
        GenericValue::Null => GENERIC_NULL,
        GenericValue::String(_) => GENERIC_STRING,
        GenericValue::Int(_) => GENERIC_INT,
        GenericValue::Long(_) => GENERIC_LONG,
        GenericValue::Float(_) => GENERIC_FLOAT,
        GenericValue::Double(_) => GENERIC_DOUBLE,
        GenericValue::Bool(_) => GENERIC_BOOL,
        GenericValue::ByteArray(_) => GENERIC_BYTE_ARRAY,
        GenericValue::Byte(_) => GENERIC_BYTE,
        GenericValue::Short(_) => GENERIC_SHORT,
        GenericValue::BytesRef(_) => GENERIC_BYTES_REF,
    };
    buf.push(tag as u8);

    match value {
        GenericValue::Null => {}
        GenericValue::String(s) => encode_string(s, buf),
        GenericValue::Int(v) => encode_i32(*v, buf),
        GenericValue::Long(v) => encode_i64(*v, buf),
        GenericValue::Float(v) => encode_f32(*v, buf),
        GenericValue::Double(v) => encode_f64(*v, buf),
        GenericValue::Bool(v) => encode_bool(*v, buf),
        GenericValue::ByteArray(b) | GenericValue::BytesRef(b) => encode_bytes(b, buf),
        GenericValue::Byte(v) => buf.push(*v as u8),
        GenericValue::Short(v) => encode_i16(*v, buf),
    }
}

pub fn decode_generic_value(r: &mut WireReader<'_>) -> Result<GenericValue> {
    let tag = r.read_i8()?;
    Ok(match tag {
        GENERIC_NULL => GenericValue::Null,
        GENERIC_STRING => GenericValue::String(r.read_string()?),
        GENERIC_INT => GenericValue::Int(r.read_i32()?),
        GENERIC_LONG => GenericValue::Long(r.read_i64()?),
        GENERIC_FLOAT => GenericValue::Float(r.read_f32()?),
        GENERIC_DOUBLE => GenericValue::Double(r.read_f64()?),
        GENERIC_BOOL => GenericValue::Bool(r.read_bool()?),
        GENERIC_BYTE_ARRAY => GenericValue::ByteArray(r.read_bytes()?),
        GENERIC_BYTE => GenericValue::Byte(r.read_i8()?),
        GENERIC_SHORT => GenericValue::Short(r.read_i16()?),
        GENERIC_BYTES_REF => GenericValue::BytesRef(r.read_bytes()?),
        other => {
            return Err(WireError::unsupported_type(format!(
                "can't read generic value type [{}]",
                other
            )));
        }
    })
}

// ============================================================================
// MISSING VALUES
// ============================================================================

pub fn encode_missing_value(missing: Option<&MissingValue>, buf: &mut Vec<u8>) {
    match missing {
        None => {
            buf.push(MISSING_GENERIC);
            encode_generic_value(&GenericValue::Null, buf);
        }
        Some(MissingValue::Value(value)) => {
            buf.push(MISSING_GENERIC);
            encode_generic_value(value, buf);
        }
        Some(MissingValue::StringFirst) => buf.push(MISSING_STRING_FIRST),
        Some(MissingValue::StringLast) => buf.push(MISSING_STRING_LAST),
    }
}

/// Decode a missing value. A generic null means the field has none.
pub fn decode_missing_value(r: &mut WireReader<'_>) -> Result<Option<MissingValue>> {
    match r.read_u8()? {
        MISSING_GENERIC => match decode_generic_value(r)? {
            GenericValue::Null => Ok(None),
            value => Ok(Some(MissingValue::Value(value))),
        },
        MISSING_STRING_FIRST => Ok(Some(MissingValue::StringFirst)),
        MISSING_STRING_LAST => Ok(Some(MissingValue::StringLast)),
        other => Err(WireError::unsupported_type(format!(
            "unknown missing value id: {}",
            other
        ))),
    }
}
