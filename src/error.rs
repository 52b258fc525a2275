// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by every codec in the crate.
//!
//! None of these are recoverable inside the codec. A failed encode leaves the
//! output buffer exactly as it was before the call; a failed decode hands back
//! nothing. The caller decides whether to drop the shard, fail the query, or
//! retry higher up.

use thiserror::Error;

/// Everything that can go wrong while encoding or decoding hits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// A value has no tag in the closed value tables, or a tag byte on the
    /// wire is not one we know.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A sort comparator that still isn't canonical after normalization.
    #[error("cannot serialize sort field: {0}")]
    UnsupportedSortField(String),

    /// Discriminator outside its known set (result variant, explanation
    /// number type, sort type ordinal, total hits relation).
    #[error("unknown {what} tag {tag}")]
    UnknownVariant { what: &'static str, tag: u64 },

    /// Truncated input, oversized counts, bad UTF-8, non-boolean bytes.
    #[error("malformed stream: {0}")]
    MalformedStream(String),

    /// Explanation tree nests deeper than the configured limit.
    #[error("explanation deeper than {limit} levels")]
    ExplanationTooDeep { limit: usize },

    /// Collapsed result whose collapse values don't line up with its hits.
    #[error("collapsed result has {field_docs} field docs but {collapse_values} collapse values")]
    MismatchedCollapseValues {
        field_docs: usize,
        collapse_values: usize,
    },

    /// Strict mode only: a field doc carries a different number of sort
    /// values than the result declares sort fields.
    #[error("field doc {index} has {sort_values} sort values, expected {sort_fields}")]
    MismatchedSortValues {
        index: usize,
        sort_values: usize,
        sort_fields: usize,
    },
}

impl WireError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        WireError::MalformedStream(msg.into())
    }

    pub(crate) fn unsupported_type(msg: impl Into<String>) -> Self {
        WireError::UnsupportedType(msg.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WireError>;
