// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Score explanation trees, written depth first.
//!
//! ```text
//! [match: bool][description: string][children: vint][child]*children
//! [value]        only when match is true
//!
//! value: [0][f32] | [1][f64] | [2][zigzag vlong]
//! ```
//!
//! A node's value comes after its children. Both directions stop at
//! [`CodecOptions::max_explanation_depth`] levels so a hostile or runaway tree
//! can't exhaust the stack.

use tracing::{debug, trace};

use super::CodecOptions;
use crate::binary::{
    encode_bool, encode_f32, encode_f64, encode_string, encode_vint, encode_zlong, WireReader,
};
use crate::contracts::{check_consumed_within, check_explanation_depth};
use crate::error::{Result, WireError};
use crate::types::{Explanation, ExplanationValue};

const VALUE_FLOAT: u8 = 0;
const VALUE_DOUBLE: u8 = 1;
const VALUE_LONG: u8 = 2;

/// Smallest encoded node: not matched, empty description, no children.
const MIN_NODE_SIZE: usize = 3;

pub fn encode_explanation(explanation: &Explanation, buf: &mut Vec<u8>) -> Result<()> {
    encode_explanation_with(explanation, buf, &CodecOptions::default())
}

/// Encode an explanation tree. On error `buf` is left as it was.
pub fn encode_explanation_with(
    explanation: &Explanation,
    buf: &mut Vec<u8>,
    options: &CodecOptions,
) -> Result<()> {
    let start = buf.len();
    match write_node(explanation, buf, 1, options.max_explanation_depth) {
        Ok(()) => {
            debug!(bytes = buf.len() - start, "encoded explanation");
            Ok(())
        }
        Err(e) => {
            buf.truncate(start);
            debug!(error = %e, "explanation encode failed");
            Err(e)
        }
    }
}

fn write_node(node: &Explanation, buf: &mut Vec<u8>, depth: usize, limit: usize) -> Result<()> {
    if depth > limit {
        return Err(WireError::ExplanationTooDeep { limit });
    }
    encode_bool(node.is_match(), buf);
    encode_string(node.description(), buf);
    encode_vint(node.details().len() as u32, buf);
    for child in node.details() {
        write_node(child, buf, depth + 1, limit)?;
    }
    if let Some(value) = node.value() {
        match value {
            ExplanationValue::Float(v) => {
                buf.push(VALUE_FLOAT);
                encode_f32(v, buf);
            }
            ExplanationValue::Double(v) => {
                buf.push(VALUE_DOUBLE);
                encode_f64(v, buf);
            }
            ExplanationValue::Long(v) => {
                buf.push(VALUE_LONG);
                encode_zlong(v, buf);
            }
        }
    }
    Ok(())
}

/// Decode an explanation tree with default options.
///
/// Returns the tree and the number of bytes consumed.
pub fn decode_explanation(bytes: &[u8]) -> Result<(Explanation, usize)> {
    decode_explanation_with(bytes, &CodecOptions::default())
}

pub fn decode_explanation_with(
    bytes: &[u8],
    options: &CodecOptions,
) -> Result<(Explanation, usize)> {
    let mut r = WireReader::new(bytes);
    let explanation = read_node(&mut r, 1, options)?;
    check_consumed_within(r.position(), bytes.len());
    check_explanation_depth(&explanation, options.max_explanation_depth);
    debug!(
        nodes = explanation.node_count(),
        bytes = r.position(),
        "decoded explanation"
    );
    Ok((explanation, r.position()))
}

fn read_node(r: &mut WireReader<'_>, depth: usize, options: &CodecOptions) -> Result<Explanation> {
    if depth > options.max_explanation_depth {
        return Err(WireError::ExplanationTooDeep {
            limit: options.max_explanation_depth,
        });
    }
    let matched = r.read_bool()?;
    let description = r.read_string()?;
    let count = r.read_count(MIN_NODE_SIZE, options.max_collection_len, "explanation detail")?;
    let mut details = Vec::with_capacity(count);
    for _ in 0..count {
        details.push(read_node(r, depth + 1, options)?);
    }
    trace!(depth, matched, children = count, "explanation node");

    if !matched {
        return Ok(Explanation::no_match(description, details));
    }
    let value = match r.read_u8()? {
        VALUE_FLOAT => ExplanationValue::Float(r.read_f32()?),
        VALUE_DOUBLE => ExplanationValue::Double(r.read_f64()?),
        VALUE_LONG => ExplanationValue::Long(r.read_zlong()?),
        other => {
            return Err(WireError::UnknownVariant {
                what: "explanation value",
                tag: u64::from(other),
            });
        }
    };
    Ok(Explanation::matched(value, description, details))
}
