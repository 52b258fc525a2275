// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort fields.
//!
//! ```text
//! [has_name: bool][name: string]?[type: vint][missing][reverse: bool]
//! ```
//!
//! Only canonical fields reach the wire. Comparators go through
//! [`crate::sort::normalize`] first, so a geo-distance sort and a plain DOUBLE
//! sort on the same field produce the same bytes.

use tracing::trace;

use super::missing::{decode_missing_value, encode_missing_value};
use super::CodecOptions;
use crate::binary::{encode_bool, encode_string, encode_vint, WireReader};
use crate::error::Result;
use crate::sort::{normalize, SortComparator};
use crate::types::{SortField, SortType};

/// Smallest encoded sort field: no name, one-byte type, a one-byte
/// `STRING_FIRST`/`STRING_LAST` sentinel, reverse.
pub(crate) const MIN_SORT_FIELD_SIZE: usize = 4;

/// Encode a canonical sort field.
pub fn encode_sort_field(field: &SortField, buf: &mut Vec<u8>) {
    match &field.field {
        Some(name) => {
            encode_bool(true, buf);
            encode_string(name, buf);
        }
        None => encode_bool(false, buf),
    }
    encode_vint(field.sort_type.ordinal(), buf);
    encode_missing_value(field.missing.as_ref(), buf);
    encode_bool(field.reverse, buf);
}

/// Normalize a comparator and encode the result.
pub fn encode_sort_comparator(comparator: &SortComparator, buf: &mut Vec<u8>) -> Result<()> {
    let field = normalize(comparator)?;
    encode_sort_field(&field, buf);
    Ok(())
}

/// Encode a sort field array: `[count: vint]` then each field.
pub fn encode_sort_fields(comparators: &[SortComparator], buf: &mut Vec<u8>) -> Result<()> {
    encode_vint(comparators.len() as u32, buf);
    for comparator in comparators {
        encode_sort_comparator(comparator, buf)?;
    }
    Ok(())
}

pub fn decode_sort_field(r: &mut WireReader<'_>) -> Result<SortField> {
    let field = if r.read_bool()? {
        Some(r.read_string()?)
    } else {
        None
    };
    let sort_type = SortType::from_ordinal(r.read_vint()?)?;
    let missing = decode_missing_value(r)?;
    let reverse = r.read_bool()?;
    trace!(?field, ?sort_type, reverse, "decoded sort field");
    Ok(SortField {
        field,
        sort_type,
        reverse,
        missing,
    })
}

pub fn decode_sort_fields(r: &mut WireReader<'_>, options: &CodecOptions) -> Result<Vec<SortField>> {
    let count = r.read_count(MIN_SORT_FIELD_SIZE, options.max_collection_len, "sort field")?;
    let mut fields = Vec::with_capacity(count);
    for _ in 0..count {
        fields.push(decode_sort_field(r)?);
    }
    Ok(fields)
}
