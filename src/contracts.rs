// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the result structures and their collaborators.
//!
//! Debug-mode assertions on invariants the codecs rely on but can't always
//! express in the types:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Early failure** close to the code that broke the invariant
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                      | Invariant                                      |
//! |-------------------------------|------------------------------------------------|
//! | `check_increasing_doc`        | live-docs queries arrive in increasing order   |
//! | `check_collapse_aligned`      | one collapse value per collapsed hit           |
//! | `check_consumed_within`       | a decoder never reports reading past its input |
//! | `check_explanation_depth`     | a tree handed back never exceeds the limit     |
//!
//! # Usage
//!
//! ```ignore
//! use hitwire::contracts::*;
//!
//! // In debug builds, this panics if the invariant is violated
//! check_collapse_aligned(&top_docs);
//!
//! // In release builds, this is a no-op
//! ```

use crate::types::{Explanation, TopDocs};

// ============================================================================
// COMPILE-TIME ASSERTIONS (evaluated at build time)
// ============================================================================

const _: () = {
    // The top docs tag and the sort value tag are single bytes.
    assert!(crate::codec::TOP_DOCS_COLLAPSED < u8::MAX);
    // A default depth limit of zero would reject every tree.
    assert!(crate::binary::DEFAULT_MAX_EXPLANATION_DEPTH > 0);
};

// ============================================================================
// COLLABORATOR CONTRACTS
// ============================================================================

/// Check that a live-docs query moves strictly forward.
///
/// # Panics (debug builds only)
/// Panics if `doc <= previous`.
#[inline]
pub fn check_increasing_doc(previous: Option<u32>, doc: u32) {
    if let Some(previous) = previous {
        debug_assert!(
            doc > previous,
            "Contract violation: live docs queried out of order - doc {} after {}",
            doc,
            previous
        );
    }
}

// ============================================================================
// RESULT CONTRACTS
// ============================================================================

/// Check that a collapsed result carries one collapse value per hit.
///
/// Encoding reports this as an error; this contract is for results the
/// crate itself constructs.
///
/// # Panics (debug builds only)
/// Panics if `collapse_values.len() != field_docs.len()`.
#[inline]
pub fn check_collapse_aligned(top_docs: &TopDocs) {
    if let TopDocs::Collapsed {
        field_docs,
        collapse_values,
        ..
    } = top_docs
    {
        debug_assert_eq!(
            field_docs.len(),
            collapse_values.len(),
            "Contract violation: collapsed result has {} hits but {} collapse values",
            field_docs.len(),
            collapse_values.len()
        );
    }
}

/// Check that a decoder's consumed byte count fits its input.
///
/// # Panics (debug builds only)
/// Panics if `consumed > input_len`.
#[inline]
pub fn check_consumed_within(consumed: usize, input_len: usize) {
    debug_assert!(
        consumed <= input_len,
        "Contract violation: decoder consumed {} bytes of a {} byte input",
        consumed,
        input_len
    );
}

/// Check that a decoded explanation respects the depth limit it was read with.
///
/// # Panics (debug builds only)
/// Panics if `explanation.depth() > limit`.
#[inline]
pub fn check_explanation_depth(explanation: &Explanation, limit: usize) {
    debug_assert!(
        explanation.depth() <= limit,
        "Contract violation: explanation depth {} exceeds limit {}",
        explanation.depth(),
        limit
    );
}
