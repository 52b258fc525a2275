// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wire format for partial search results exchanged between shards and the
//! coordinating node.
//!
//! Each shard ranks its own hits and ships them as bytes; the coordinator
//! decodes every shard's contribution and merges them. This crate is the
//! bytes part: ranked hit lists, field-sorted hit lists, collapsed hit lists,
//! sort field descriptors and score explanation trees.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │  types.rs   │────▶│   sort.rs    │────▶│     codec/       │
//! │ (TopDocs,   │     │ (normalize,  │     │ (top_docs,       │
//! │ SortValue,  │     │ comparators) │     │  explanation,    │
//! │ Explanation)│     │              │     │  sort_field ...) │
//! └─────────────┘     └──────────────┘     └──────────────────┘
//!        │                                          │
//!        ▼                                          ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    binary/                          │
//! │  (varints, big-endian primitives, WireReader,       │
//! │   dump file envelope)                               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use hitwire::{decode_top_docs, encode_top_docs, ScoreDoc, TopDocs, TotalHits};
//!
//! let top_docs = TopDocs::Plain {
//!     total_hits: TotalHits::exact(2),
//!     max_score: 1.0,
//!     score_docs: vec![ScoreDoc::new(3, 1.0), ScoreDoc::new(7, 0.5)],
//! };
//!
//! let mut buf = Vec::new();
//! encode_top_docs(&top_docs, &mut buf).unwrap();
//!
//! let (decoded, consumed) = decode_top_docs(&buf).unwrap();
//! assert_eq!(decoded, top_docs);
//! assert_eq!(consumed, buf.len());
//! ```

pub mod binary;
pub mod codec;
pub mod commit;
pub mod contracts;
mod error;
pub mod sort;
pub mod testing;
mod types;

pub use codec::{
    decode_explanation, decode_explanation_with, decode_top_docs, decode_top_docs_with,
    encode_explanation, encode_explanation_with, encode_top_docs, encode_top_docs_with,
    CodecOptions,
};
pub use commit::{exists, CommitPoint, Leaf, LiveDocs, SegmentInfo, SequentialLiveDocs};
pub use error::{Result, WireError};
pub use sort::{
    can_early_terminate, normalize, MissingPolicy, SortComparator, SortedNumericSelector,
    SortedSetSelector,
};
pub use types::{
    BigInteger, Explanation, ExplanationValue, FieldDoc, GenericValue, MissingValue, ScoreDoc,
    SortField, SortType, SortValue, TopDocs, TotalHits, TotalHitsRelation,
};
