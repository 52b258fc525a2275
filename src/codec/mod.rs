// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Codecs for everything a shard sends back to the coordinator.
//!
//! Each submodule owns one layer of the format and builds on the ones below:
//!
//! ```text
//! explanation      top_docs
//!                     │
//!           ┌─────────┼──────────┐
//!         hits    sort_field   (total hits)
//!           │         │
//!         value    missing
//! ```
//!
//! Encoders append to a caller-owned `Vec<u8>`. The entry points
//! ([`encode_top_docs`], [`encode_explanation`]) are atomic: on error the
//! buffer is truncated back to where it started. Decoders return the value
//! and the number of bytes consumed, and never read past the structure they
//! were asked for.

mod explanation;
mod hits;
mod missing;
mod sort_field;
mod top_docs;
mod value;

pub use explanation::{
    decode_explanation, decode_explanation_with, encode_explanation, encode_explanation_with,
};
pub use hits::{decode_field_doc, decode_score_doc, encode_field_doc, encode_score_doc};
pub use missing::{
    decode_generic_value, decode_missing_value, encode_generic_value, encode_missing_value,
};
pub use sort_field::{
    decode_sort_field, decode_sort_fields, encode_sort_comparator, encode_sort_field,
    encode_sort_fields,
};
pub use top_docs::{
    decode_top_docs, decode_top_docs_with, decode_total_hits, encode_top_docs,
    encode_top_docs_with, encode_total_hits, TOP_DOCS_COLLAPSED, TOP_DOCS_FIELD_SORTED,
    TOP_DOCS_PLAIN,
};
pub use value::{decode_sort_value, encode_sort_value, sort_value_tag};

use serde::{Deserialize, Serialize};

use crate::binary::{DEFAULT_MAX_EXPLANATION_DEPTH, MAX_COLLECTION_LEN};

/// Knobs shared by encoders and decoders.
///
/// Both sides of a connection should agree on these. A decoder with a lower
/// depth limit than the encoder will reject trees the encoder accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Deepest explanation tree accepted, counting the root as level 1.
    pub max_explanation_depth: usize,
    /// Require every field doc to carry exactly one sort value per sort field.
    pub strict_sort_values: bool,
    /// Upper bound on any element count read from the wire.
    pub max_collection_len: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_explanation_depth: DEFAULT_MAX_EXPLANATION_DEPTH,
            strict_sort_values: false,
            max_collection_len: MAX_COLLECTION_LEN,
        }
    }
}

impl CodecOptions {
    pub fn with_max_explanation_depth(mut self, depth: usize) -> Self {
        self.max_explanation_depth = depth;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_sort_values = strict;
        self
    }
}
