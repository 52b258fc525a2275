// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests, benches and
//! fuzz targets.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::sort::SortComparator;
use crate::types::{
    BigInteger, Explanation, FieldDoc, MissingValue, ScoreDoc, SortField, SortType, SortValue,
    TopDocs, TotalHits,
};

/// One value per sort value tag, plus the boundary values that tend to break
/// codecs (NaN, infinities, integer extremes, empties).
pub fn boundary_sort_values() -> Vec<SortValue> {
    vec![
        SortValue::Null,
        SortValue::String(String::new()),
        SortValue::String("ελληνικά 日本語".to_string()),
        SortValue::Int(i32::MIN),
        SortValue::Int(i32::MAX),
        SortValue::Long(i64::MIN),
        SortValue::Long(i64::MAX),
        SortValue::Float(f32::NAN),
        SortValue::Float(f32::INFINITY),
        SortValue::Float(f32::NEG_INFINITY),
        SortValue::Float(-0.0),
        SortValue::Double(f64::NAN),
        SortValue::Double(f64::INFINITY),
        SortValue::Double(f64::NEG_INFINITY),
        SortValue::Double(f64::MIN_POSITIVE),
        SortValue::Byte(i8::MIN),
        SortValue::Byte(i8::MAX),
        SortValue::Short(i16::MIN),
        SortValue::Short(i16::MAX),
        SortValue::Bool(false),
        SortValue::Bool(true),
        SortValue::Bytes(Vec::new()),
        SortValue::Bytes(vec![0x00, 0x7F, 0x80, 0xFF]),
        SortValue::BigInteger(BigInteger::from(u128::MAX)),
        SortValue::BigInteger(BigInteger::from(i128::MIN)),
    ]
}

/// Plain result with `n` hits, scores descending from 1.0.
pub fn make_plain(n: usize) -> TopDocs {
    let score_docs: Vec<ScoreDoc> = (0..n)
        .map(|i| ScoreDoc::new(i as i32 * 3, 1.0 / (i as f32 + 1.0)))
        .collect();
    TopDocs::Plain {
        total_hits: TotalHits::exact(n as u64),
        max_score: if n == 0 { f32::NAN } else { 1.0 },
        score_docs,
    }
}

/// Field-sorted result on (title STRING, price LONG reversed) with `n` hits.
pub fn make_field_sorted(n: usize) -> TopDocs {
    TopDocs::FieldSorted {
        total_hits: TotalHits::at_least(n as u64 * 10),
        max_score: f32::NAN,
        sort_fields: vec![
            SortField::new("title", SortType::String)
                .with_missing(MissingValue::StringLast)
                .into(),
            SortField::new("price", SortType::Long).reversed(true).into(),
        ],
        field_docs: (0..n).map(make_field_doc).collect(),
    }
}

/// Collapsed result grouped on `category`, one collapse value per hit.
pub fn make_collapsed(n: usize) -> TopDocs {
    TopDocs::Collapsed {
        total_hits: TotalHits::exact(n as u64),
        max_score: 2.5,
        collapse_field: "category".to_string(),
        sort_fields: vec![SortComparator::Canonical(SortField::score())],
        field_docs: (0..n)
            .map(|i| FieldDoc::new(i as i32, 2.5, vec![SortValue::Float(2.5)]))
            .collect(),
        collapse_values: (0..n)
            .map(|i| SortValue::String(format!("category-{}", i)))
            .collect(),
    }
}

/// Field doc matching the sort fields of [`make_field_sorted`].
pub fn make_field_doc(i: usize) -> FieldDoc {
    FieldDoc::new(
        i as i32,
        f32::NAN,
        vec![
            SortValue::String(format!("title {:04}", i)),
            SortValue::Long(1_000 - i as i64),
        ],
    )
}

/// Linear explanation chain `depth` levels deep with an integral leaf.
pub fn make_explanation_chain(depth: usize) -> Explanation {
    let mut node = Explanation::matched(12345i64, "leaf", vec![]);
    for level in 1..depth {
        node = Explanation::matched(level as f32, format!("level {}", level), vec![node]);
    }
    node
}

/// A depth-5 tree mixing matches, non-matches and all three value types.
pub fn make_mixed_explanation() -> Explanation {
    Explanation::matched(
        3.2f32,
        "sum of:",
        vec![
            Explanation::matched(
                2.0f64,
                "weight(title:rust)",
                vec![Explanation::matched(
                    2.0f32,
                    "score(freq=1.0), computed as boost * idf * tf from:",
                    vec![
                        Explanation::matched(
                            1.2f32,
                            "idf, computed as log(1 + (N - n + 0.5) / (n + 0.5)) from:",
                            vec![
                                Explanation::matched(12345i64, "N, total documents", vec![]),
                                Explanation::matched(7i64, "n, documents containing term", vec![]),
                            ],
                        ),
                        Explanation::no_match("no boost", vec![]),
                    ],
                )],
            ),
            Explanation::no_match("no match on required clause (body:missing)", vec![]),
            Explanation::matched(1.2f32, "constant score", vec![]),
        ],
    )
}
