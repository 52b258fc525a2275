// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What the codecs need from the index side, and nothing more.
//!
//! Segment management lives elsewhere. The serialization helpers only ask
//! two questions of it: which files does a commit reference and how many live
//! documents does it hold, and does any live document match a query.

use std::cell::Cell;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::contracts::check_increasing_doc;

// ============================================================================
// COMMIT POINTS
// ============================================================================

/// One segment of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    pub name: String,
    pub max_doc: u32,
    pub del_count: u32,
    #[serde(default)]
    pub soft_del_count: u32,
    pub files: Vec<String>,
}

impl SegmentInfo {
    /// Documents neither hard- nor soft-deleted.
    pub fn live_docs(&self) -> u32 {
        self.max_doc
            .saturating_sub(self.del_count)
            .saturating_sub(self.soft_del_count)
    }
}

/// A committed set of segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPoint {
    pub segments_file: String,
    pub segments: Vec<SegmentInfo>,
}

impl CommitPoint {
    /// Every file the commit references: the segments file first, then each
    /// segment's files in segment order.
    pub fn files(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.segments_file.as_str()).chain(
            self.segments
                .iter()
                .flat_map(|s| s.files.iter().map(String::as_str)),
        )
    }

    /// Live documents across all segments.
    pub fn num_docs(&self) -> u64 {
        self.segments.iter().map(|s| u64::from(s.live_docs())).sum()
    }
}

// ============================================================================
// LIVE DOCS
// ============================================================================

/// Membership test for non-deleted documents in one leaf.
///
/// Implementations may assume queries arrive in strictly increasing doc id
/// order and need not support going backwards.
pub trait LiveDocs {
    fn is_live(&self, doc: u32) -> bool;
}

impl<F: Fn(u32) -> bool> LiveDocs for F {
    fn is_live(&self, doc: u32) -> bool {
        self(doc)
    }
}

impl LiveDocs for Vec<bool> {
    fn is_live(&self, doc: u32) -> bool {
        self.get(doc as usize).copied().unwrap_or(false)
    }
}

/// Forward-only view over a [`LiveDocs`].
///
/// Passes every query through, and in debug builds panics if a query goes
/// backwards or repeats.
pub struct SequentialLiveDocs<'a, L: LiveDocs + ?Sized> {
    inner: &'a L,
    last: Cell<Option<u32>>,
}

impl<'a, L: LiveDocs + ?Sized> SequentialLiveDocs<'a, L> {
    pub fn new(inner: &'a L) -> Self {
        Self {
            inner,
            last: Cell::new(None),
        }
    }
}

impl<L: LiveDocs + ?Sized> LiveDocs for SequentialLiveDocs<'_, L> {
    fn is_live(&self, doc: u32) -> bool {
        check_increasing_doc(self.last.get(), doc);
        self.last.set(Some(doc));
        self.inner.is_live(doc)
    }
}

// ============================================================================
// EXISTENCE
// ============================================================================

/// One leaf's matches for a query, with its live docs if it has deletions.
pub struct Leaf<'a> {
    /// Matching doc ids, ascending.
    pub matches: &'a [u32],
    /// `None` means every document in the leaf is live.
    pub live_docs: Option<&'a dyn LiveDocs>,
}

/// Whether any leaf has a live document matching the query.
///
/// Stops at the first live match.
pub fn exists(leaves: &[Leaf<'_>]) -> bool {
    for (ord, leaf) in leaves.iter().enumerate() {
        let Some(live_docs) = leaf.live_docs else {
            if !leaf.matches.is_empty() {
                trace!(leaf = ord, "match in leaf without deletions");
                return true;
            }
            continue;
        };
        let live_docs = SequentialLiveDocs::new(live_docs);
        if let Some(doc) = leaf.matches.iter().copied().find(|&d| live_docs.is_live(d)) {
            trace!(leaf = ord, doc, "live match");
            return true;
        }
    }
    false
}
