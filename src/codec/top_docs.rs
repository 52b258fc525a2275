// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A shard's ranked result set.
//!
//! ```text
//! ┌─────────┬─────────────────────────────┬────────────────┬─────────────┐
//! │ tag: u8 │ total hits                  │ max score: f32 │ payload     │
//! │         │ [value: vlong][rel: vint]   │                │             │
//! └─────────┴─────────────────────────────┴────────────────┴─────────────┘
//!
//! tag 0  plain:        [count: vint]([doc: vint][score: f32])*count
//! tag 1  field sorted: [sort fields][count: vint][field doc]*count
//! tag 2  collapsed:    [field: string][sort fields][count: vint]
//!                      ([field doc][collapse value])*count
//! ```
//!
//! Collapsed results interleave each hit with its collapse value, so the two
//! lists can't drift apart on the wire.

use tracing::{debug, trace, warn};

use super::hits::{
    decode_field_doc, decode_score_doc, encode_field_doc, encode_score_doc, MIN_FIELD_DOC_SIZE,
    MIN_SCORE_DOC_SIZE, MIN_SORT_VALUE_SIZE,
};
use super::sort_field::{decode_sort_fields, encode_sort_fields};
use super::value::{decode_sort_value, encode_sort_value};
use super::CodecOptions;
use crate::binary::{encode_f32, encode_string, encode_varint, encode_vint, WireReader};
use crate::contracts::{check_collapse_aligned, check_consumed_within};
use crate::error::{Result, WireError};
use crate::sort::SortComparator;
use crate::types::{FieldDoc, SortField, TotalHits, TotalHitsRelation, TopDocs};

pub const TOP_DOCS_PLAIN: u8 = 0;
pub const TOP_DOCS_FIELD_SORTED: u8 = 1;
pub const TOP_DOCS_COLLAPSED: u8 = 2;

// ============================================================================
// TOTAL HITS
// ============================================================================

pub fn encode_total_hits(total_hits: &TotalHits, buf: &mut Vec<u8>) {
    encode_varint(total_hits.value, buf);
    encode_vint(total_hits.relation.ordinal(), buf);
}

pub fn decode_total_hits(r: &mut WireReader<'_>) -> Result<TotalHits> {
    let value = r.read_varint()?;
    let relation = TotalHitsRelation::from_ordinal(r.read_vint()?)?;
    Ok(TotalHits { value, relation })
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode a result set with default options.
pub fn encode_top_docs(top_docs: &TopDocs, buf: &mut Vec<u8>) -> Result<()> {
    encode_top_docs_with(top_docs, buf, &CodecOptions::default())
}

/// Encode a result set. On error `buf` is left as it was.
pub fn encode_top_docs_with(
    top_docs: &TopDocs,
    buf: &mut Vec<u8>,
    options: &CodecOptions,
) -> Result<()> {
    let start = buf.len();
    match write_top_docs(top_docs, buf, options) {
        Ok(()) => {
            debug!(
                variant = top_docs.variant_name(),
                hits = top_docs.len(),
                bytes = buf.len() - start,
                "encoded top docs"
            );
            Ok(())
        }
        Err(e) => {
            buf.truncate(start);
            debug!(variant = top_docs.variant_name(), error = %e, "top docs encode failed");
            Err(e)
        }
    }
}

fn write_top_docs(top_docs: &TopDocs, buf: &mut Vec<u8>, options: &CodecOptions) -> Result<()> {
    validate(top_docs, options)?;

    match top_docs {
        TopDocs::Plain {
            total_hits,
            max_score,
            score_docs,
        } => {
            buf.push(TOP_DOCS_PLAIN);
            encode_total_hits(total_hits, buf);
            encode_f32(*max_score, buf);
            encode_vint(score_docs.len() as u32, buf);
            for doc in score_docs {
                encode_score_doc(doc, buf);
            }
        }
        TopDocs::FieldSorted {
            total_hits,
            max_score,
            sort_fields,
            field_docs,
        } => {
            buf.push(TOP_DOCS_FIELD_SORTED);
            encode_total_hits(total_hits, buf);
            encode_f32(*max_score, buf);
            encode_sort_fields(sort_fields, buf)?;
            encode_vint(field_docs.len() as u32, buf);
            for doc in field_docs {
                encode_field_doc(doc, buf);
            }
        }
        TopDocs::Collapsed {
            total_hits,
            max_score,
            collapse_field,
            sort_fields,
            field_docs,
            collapse_values,
        } => {
            buf.push(TOP_DOCS_COLLAPSED);
            encode_total_hits(total_hits, buf);
            encode_f32(*max_score, buf);
            encode_string(collapse_field, buf);
            encode_sort_fields(sort_fields, buf)?;
            encode_vint(field_docs.len() as u32, buf);
            for (doc, value) in field_docs.iter().zip(collapse_values) {
                encode_field_doc(doc, buf);
                encode_sort_value(value, buf);
            }
        }
    }
    Ok(())
}

/// Structural checks that must pass before any byte is written.
fn validate(top_docs: &TopDocs, options: &CodecOptions) -> Result<()> {
    match top_docs {
        TopDocs::Plain { .. } => Ok(()),
        TopDocs::FieldSorted {
            sort_fields,
            field_docs,
            ..
        } => check_sort_values(sort_fields, field_docs, options),
        TopDocs::Collapsed {
            sort_fields,
            field_docs,
            collapse_values,
            ..
        } => {
            if field_docs.len() != collapse_values.len() {
                return Err(WireError::MismatchedCollapseValues {
                    field_docs: field_docs.len(),
                    collapse_values: collapse_values.len(),
                });
            }
            check_sort_values(sort_fields, field_docs, options)
        }
    }
}

fn check_sort_values(
    sort_fields: &[SortComparator],
    field_docs: &[FieldDoc],
    options: &CodecOptions,
) -> Result<()> {
    if !options.strict_sort_values {
        return Ok(());
    }
    for (index, doc) in field_docs.iter().enumerate() {
        if doc.sort_values.len() != sort_fields.len() {
            warn!(
                index,
                sort_values = doc.sort_values.len(),
                sort_fields = sort_fields.len(),
                "field doc sort values don't match sort fields"
            );
            return Err(WireError::MismatchedSortValues {
                index,
                sort_values: doc.sort_values.len(),
                sort_fields: sort_fields.len(),
            });
        }
    }
    Ok(())
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a result set with default options.
///
/// Returns the result and the number of bytes consumed.
pub fn decode_top_docs(bytes: &[u8]) -> Result<(TopDocs, usize)> {
    decode_top_docs_with(bytes, &CodecOptions::default())
}

pub fn decode_top_docs_with(bytes: &[u8], options: &CodecOptions) -> Result<(TopDocs, usize)> {
    let mut r = WireReader::new(bytes);
    let top_docs = read_top_docs(&mut r, options)?;
    check_consumed_within(r.position(), bytes.len());
    check_collapse_aligned(&top_docs);
    debug!(
        variant = top_docs.variant_name(),
        hits = top_docs.len(),
        bytes = r.position(),
        "decoded top docs"
    );
    Ok((top_docs, r.position()))
}

fn read_top_docs(r: &mut WireReader<'_>, options: &CodecOptions) -> Result<TopDocs> {
    let tag = r.read_u8()?;
    if tag > TOP_DOCS_COLLAPSED {
        return Err(WireError::UnknownVariant {
            what: "top docs",
            tag: u64::from(tag),
        });
    }
    let total_hits = decode_total_hits(r)?;
    let max_score = r.read_f32()?;
    trace!(tag, %total_hits, max_score, "top docs header");

    let top_docs = match tag {
        TOP_DOCS_PLAIN => {
            let count = r.read_count(MIN_SCORE_DOC_SIZE, options.max_collection_len, "score doc")?;
            let mut score_docs = Vec::with_capacity(count);
            for _ in 0..count {
                score_docs.push(decode_score_doc(r)?);
            }
            TopDocs::Plain {
                total_hits,
                max_score,
                score_docs,
            }
        }
        TOP_DOCS_FIELD_SORTED => {
            let sort_fields = canonical(decode_sort_fields(r, options)?);
            let count = r.read_count(MIN_FIELD_DOC_SIZE, options.max_collection_len, "field doc")?;
            let mut field_docs = Vec::with_capacity(count);
            for _ in 0..count {
                field_docs.push(decode_field_doc(r, options)?);
            }
            TopDocs::FieldSorted {
                total_hits,
                max_score,
                sort_fields,
                field_docs,
            }
        }
        _ => {
            let collapse_field = r.read_string()?;
            let sort_fields = canonical(decode_sort_fields(r, options)?);
            let count = r.read_count(
                MIN_FIELD_DOC_SIZE + MIN_SORT_VALUE_SIZE,
                options.max_collection_len,
                "collapsed hit",
            )?;
            let mut field_docs = Vec::with_capacity(count);
            let mut collapse_values = Vec::with_capacity(count);
            for _ in 0..count {
                field_docs.push(decode_field_doc(r, options)?);
                collapse_values.push(decode_sort_value(r)?);
            }
            TopDocs::Collapsed {
                total_hits,
                max_score,
                collapse_field,
                sort_fields,
                field_docs,
                collapse_values,
            }
        }
    };

    validate(&top_docs, options)?;
    Ok(top_docs)
}

fn canonical(fields: Vec<SortField>) -> Vec<SortComparator> {
    fields.into_iter().map(SortComparator::Canonical).collect()
}
