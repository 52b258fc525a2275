// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Individual hits.
//!
//! ```text
//! ScoreDoc:  [doc: vint][score: f32]
//! FieldDoc:  [count: vint][sort value]*count[doc: vint][score: f32]
//! ```
//!
//! The doc id goes out as a vint of its bit pattern, so a negative id costs
//! five bytes but survives.

use super::value::{decode_sort_value, encode_sort_value};
use super::CodecOptions;
use crate::binary::{encode_f32, encode_vint, WireReader};
use crate::error::Result;
use crate::types::{FieldDoc, ScoreDoc};

/// Smallest encoded score doc: one-byte doc id plus the score.
pub(crate) const MIN_SCORE_DOC_SIZE: usize = 5;

/// Smallest encoded field doc: empty value list, one-byte doc id, score.
pub(crate) const MIN_FIELD_DOC_SIZE: usize = 6;

/// Smallest encoded sort value: a bare null tag.
pub(crate) const MIN_SORT_VALUE_SIZE: usize = 1;

pub fn encode_score_doc(doc: &ScoreDoc, buf: &mut Vec<u8>) {
    encode_vint(doc.doc_id as u32, buf);
    encode_f32(doc.score, buf);
}

pub fn decode_score_doc(r: &mut WireReader<'_>) -> Result<ScoreDoc> {
    let doc_id = r.read_vint()? as i32;
    let score = r.read_f32()?;
    Ok(ScoreDoc { doc_id, score })
}

pub fn encode_field_doc(doc: &FieldDoc, buf: &mut Vec<u8>) {
    encode_vint(doc.sort_values.len() as u32, buf);
    for value in &doc.sort_values {
        encode_sort_value(value, buf);
    }
    encode_vint(doc.doc_id as u32, buf);
    encode_f32(doc.score, buf);
}

pub fn decode_field_doc(r: &mut WireReader<'_>, options: &CodecOptions) -> Result<FieldDoc> {
    let count = r.read_count(MIN_SORT_VALUE_SIZE, options.max_collection_len, "sort value")?;
    let mut sort_values = Vec::with_capacity(count);
    for _ in 0..count {
        sort_values.push(decode_sort_value(r)?);
    }
    let doc_id = r.read_vint()? as i32;
    let score = r.read_f32()?;
    Ok(FieldDoc {
        doc_id,
        score,
        sort_values,
    })
}
