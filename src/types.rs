// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The partial search results a shard sends to the coordinating node.
//!
//! Everything here is transient: built for one search response, written into
//! a transport buffer, read back on the coordinator, merged, dropped.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SortValue**: the variant *is* the wire tag. There is no widening or
//!   narrowing on the way through; a `Byte(3)` comes back as `Byte(3)`.
//!
//! - **TopDocs::Collapsed**: `collapse_values.len() == field_docs.len()`, and
//!   `collapse_values[i]` belongs to `field_docs[i]`. Checked before a single
//!   byte is written.
//!
//! - **Explanation**: a value is present iff the node matched. The type
//!   makes the other combinations unrepresentable.
//!
//! Float equality on these types is bitwise. A NaN sort value round-trips
//! and must compare equal to itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WireError};
use crate::sort::SortComparator;

// =============================================================================
// JSON FLOATS
// =============================================================================

/// Serde adapters that keep non-finite floats intact through JSON.
///
/// serde_json writes NaN and the infinities as `null`, which it then refuses
/// to read back as a float. Finite values stay plain numbers; the others are
/// written as `"NaN"`, `"Infinity"` and `"-Infinity"`. Reading accepts
/// either form. NaN payload bits are not kept.
pub(crate) mod json_float {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    fn non_finite_name(value: f64) -> &'static str {
        if value.is_nan() {
            "NaN"
        } else if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, \"NaN\", \"Infinity\" or \"-Infinity\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    pub mod single {
        use super::*;

        pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
            if value.is_finite() {
                serializer.serialize_f32(*value)
            } else {
                serializer.serialize_str(non_finite_name(f64::from(*value)))
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
            deserializer
                .deserialize_any(FloatVisitor)
                .map(|v| v as f32)
        }
    }

    pub mod double {
        use super::*;

        pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            if value.is_finite() {
                serializer.serialize_f64(*value)
            } else {
                serializer.serialize_str(non_finite_name(*value))
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            deserializer.deserialize_any(FloatVisitor)
        }
    }
}

// =============================================================================
// TOTAL HITS
// =============================================================================

/// Whether a hit count is exact or a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TotalHitsRelation {
    EqualTo,
    GreaterThanOrEqualTo,
}

impl TotalHitsRelation {
    pub fn ordinal(self) -> u32 {
        match self {
            TotalHitsRelation::EqualTo => 0,
            TotalHitsRelation::GreaterThanOrEqualTo => 1,
        }
    }

    pub fn from_ordinal(ordinal: u32) -> Result<Self> {
        match ordinal {
            0 => Ok(TotalHitsRelation::EqualTo),
            1 => Ok(TotalHitsRelation::GreaterThanOrEqualTo),
            other => Err(WireError::UnknownVariant {
                what: "total hits relation",
                tag: u64::from(other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
    pub relation: TotalHitsRelation,
}

impl TotalHits {
    pub fn exact(value: u64) -> Self {
        Self {
            value,
            relation: TotalHitsRelation::EqualTo,
        }
    }

    pub fn at_least(value: u64) -> Self {
        Self {
            value,
            relation: TotalHitsRelation::GreaterThanOrEqualTo,
        }
    }
}

impl fmt::Display for TotalHits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.relation {
            TotalHitsRelation::EqualTo => write!(f, "{} hits", self.value),
            TotalHitsRelation::GreaterThanOrEqualTo => write!(f, "{}+ hits", self.value),
        }
    }
}

// =============================================================================
// BIG INTEGER
// =============================================================================

/// Arbitrary-precision integer carried as its canonical decimal string.
///
/// Exact but not compact. We never do arithmetic on it; the coordinator only
/// needs it to survive the trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigInteger(String);

impl BigInteger {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical form: optional `-`, then digits with no leading zeros
    /// (except a lone `0`, which is never negative).
    fn is_canonical(s: &str) -> bool {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return false;
        }
        !(digits == "0" && s.starts_with('-'))
    }
}

impl FromStr for BigInteger {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self> {
        if Self::is_canonical(s) {
            Ok(BigInteger(s.to_string()))
        } else {
            Err(WireError::malformed(format!(
                "'{}' is not a canonical decimal integer",
                s
            )))
        }
    }
}

impl TryFrom<String> for BigInteger {
    type Error = WireError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<BigInteger> for String {
    fn from(value: BigInteger) -> Self {
        value.0
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        BigInteger(value.to_string())
    }
}

impl From<u64> for BigInteger {
    fn from(value: u64) -> Self {
        BigInteger(value.to_string())
    }
}

impl From<i128> for BigInteger {
    fn from(value: i128) -> Self {
        BigInteger(value.to_string())
    }
}

impl From<u128> for BigInteger {
    fn from(value: u128) -> Self {
        BigInteger(value.to_string())
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// SORT VALUES
// =============================================================================

/// One sort key of a field doc, or one collapse key.
///
/// Closed set. Each variant maps to exactly one wire tag (see
/// `codec::value`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SortValue {
    Null,
    String(String),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "json_float::single")] f32),
    Double(#[serde(with = "json_float::double")] f64),
    Byte(i8),
    Short(i16),
    Bool(bool),
    Bytes(Vec<u8>),
    BigInteger(BigInteger),
}

impl SortValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SortValue::Null => "null",
            SortValue::String(_) => "string",
            SortValue::Int(_) => "int32",
            SortValue::Long(_) => "int64",
            SortValue::Float(_) => "float32",
            SortValue::Double(_) => "float64",
            SortValue::Byte(_) => "int8",
            SortValue::Short(_) => "int16",
            SortValue::Bool(_) => "bool",
            SortValue::Bytes(_) => "bytes",
            SortValue::BigInteger(_) => "big integer",
        }
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        use SortValue::*;
        match (self, other) {
            (Null, Null) => true,
            (String(a), String(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (BigInteger(a), BigInteger(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Null => f.write_str("null"),
            SortValue::String(s) => write!(f, "{:?}", s),
            SortValue::Int(v) => write!(f, "{}", v),
            SortValue::Long(v) => write!(f, "{}L", v),
            SortValue::Float(v) => write!(f, "{}f", v),
            SortValue::Double(v) => write!(f, "{}d", v),
            SortValue::Byte(v) => write!(f, "{}b", v),
            SortValue::Short(v) => write!(f, "{}s", v),
            SortValue::Bool(v) => write!(f, "{}", v),
            SortValue::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            SortValue::BigInteger(v) => write!(f, "{}n", v),
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::String(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::String(value)
    }
}

impl From<i32> for SortValue {
    fn from(value: i32) -> Self {
        SortValue::Int(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Long(value)
    }
}

impl From<f32> for SortValue {
    fn from(value: f32) -> Self {
        SortValue::Float(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Double(value)
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Bool(value)
    }
}

impl From<BigInteger> for SortValue {
    fn from(value: BigInteger) -> Self {
        SortValue::BigInteger(value)
    }
}

// =============================================================================
// MISSING VALUES
// =============================================================================

/// A primitive or string carried in a sort field's missing-value slot.
///
/// Broader than [`SortValue`]: missing-value defaults come from user config
/// and use the transport's generic value table, which has its own tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GenericValue {
    Null,
    String(String),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "json_float::single")] f32),
    Double(#[serde(with = "json_float::double")] f64),
    Bool(bool),
    ByteArray(Vec<u8>),
    Byte(i8),
    Short(i16),
    /// A term, as produced by string comparators (e.g. the "max term" used
    /// to push missing values last).
    BytesRef(Vec<u8>),
}

impl GenericValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            GenericValue::Null => "null",
            GenericValue::String(_) => "string",
            GenericValue::Int(_) => "int32",
            GenericValue::Long(_) => "int64",
            GenericValue::Float(_) => "float32",
            GenericValue::Double(_) => "float64",
            GenericValue::Bool(_) => "bool",
            GenericValue::ByteArray(_) => "byte array",
            GenericValue::Byte(_) => "int8",
            GenericValue::Short(_) => "int16",
            GenericValue::BytesRef(_) => "bytes ref",
        }
    }
}

impl PartialEq for GenericValue {
    fn eq(&self, other: &Self) -> bool {
        use GenericValue::*;
        match (self, other) {
            (Null, Null) => true,
            (String(a), String(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a.to_bits() == b.to_bits(),
            (Double(a), Double(b)) => a.to_bits() == b.to_bits(),
            (Bool(a), Bool(b)) => a == b,
            (ByteArray(a), ByteArray(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (BytesRef(a), BytesRef(b)) => a == b,
            _ => false,
        }
    }
}

/// What a sort field does with documents that have no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissingValue {
    /// Sort missing documents as if they had this value.
    Value(GenericValue),
    /// String sort: missing documents first.
    StringFirst,
    /// String sort: missing documents last.
    StringLast,
}

// =============================================================================
// SORT FIELDS
// =============================================================================

/// Sort types, in the index engine's fixed ordinal order.
///
/// The ordinal is what goes on the wire, so never reorder these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    Score,
    Doc,
    String,
    Int,
    Float,
    Long,
    Double,
    Custom,
    StringVal,
    Rewriteable,
}

impl SortType {
    pub const ALL: [SortType; 10] = [
        SortType::Score,
        SortType::Doc,
        SortType::String,
        SortType::Int,
        SortType::Float,
        SortType::Long,
        SortType::Double,
        SortType::Custom,
        SortType::StringVal,
        SortType::Rewriteable,
    ];

    pub fn ordinal(self) -> u32 {
        self as u32
    }

    pub fn from_ordinal(ordinal: u32) -> Result<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(WireError::UnknownVariant {
                what: "sort type",
                tag: u64::from(ordinal),
            })
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SortType::Int | SortType::Long | SortType::Float | SortType::Double
        )
    }
}

/// A canonical sort field: the only shape that ever goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    pub field: Option<String>,
    pub sort_type: SortType,
    pub reverse: bool,
    pub missing: Option<MissingValue>,
}

impl SortField {
    pub fn new(field: impl Into<String>, sort_type: SortType) -> Self {
        Self {
            field: Some(field.into()),
            sort_type,
            reverse: false,
            missing: None,
        }
    }

    /// Sort by relevance score.
    pub fn score() -> Self {
        Self {
            field: None,
            sort_type: SortType::Score,
            reverse: false,
            missing: None,
        }
    }

    /// Sort by index order.
    pub fn doc() -> Self {
        Self {
            field: None,
            sort_type: SortType::Doc,
            reverse: false,
            missing: None,
        }
    }

    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_missing(mut self, missing: MissingValue) -> Self {
        self.missing = Some(missing);
        self
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(name) => write!(f, "<{:?}: {:?}>", self.sort_type, name)?,
            None => write!(f, "<{:?}>", self.sort_type)?,
        }
        if self.reverse {
            f.write_str("!")?;
        }
        Ok(())
    }
}

// =============================================================================
// HITS
// =============================================================================

fn same_f32(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}

/// A ranked hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreDoc {
    pub doc_id: i32,
    #[serde(with = "json_float::single")]
    pub score: f32,
}

impl ScoreDoc {
    pub fn new(doc_id: i32, score: f32) -> Self {
        Self { doc_id, score }
    }
}

impl PartialEq for ScoreDoc {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id && same_f32(self.score, other.score)
    }
}

/// A hit that also carries the sort keys it was ranked by.
///
/// The number of sort values is not tied to the result's sort fields on the
/// wire; see `CodecOptions::strict_sort_values`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDoc {
    pub doc_id: i32,
    #[serde(with = "json_float::single")]
    pub score: f32,
    pub sort_values: Vec<SortValue>,
}

impl FieldDoc {
    pub fn new(doc_id: i32, score: f32, sort_values: Vec<SortValue>) -> Self {
        Self {
            doc_id,
            score,
            sort_values,
        }
    }
}

impl PartialEq for FieldDoc {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id
            && same_f32(self.score, other.score)
            && self.sort_values == other.sort_values
    }
}

// =============================================================================
// TOP DOCS
// =============================================================================

/// One shard's contribution to a search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TopDocs {
    /// Hits ranked by score.
    Plain {
        total_hits: TotalHits,
        #[serde(with = "json_float::single")]
        max_score: f32,
        score_docs: Vec<ScoreDoc>,
    },
    /// Hits ranked by one or more sort fields.
    FieldSorted {
        total_hits: TotalHits,
        #[serde(with = "json_float::single")]
        max_score: f32,
        sort_fields: Vec<SortComparator>,
        field_docs: Vec<FieldDoc>,
    },
    /// Field-sorted hits collapsed to one per distinct `collapse_field` value.
    Collapsed {
        total_hits: TotalHits,
        #[serde(with = "json_float::single")]
        max_score: f32,
        collapse_field: String,
        sort_fields: Vec<SortComparator>,
        field_docs: Vec<FieldDoc>,
        collapse_values: Vec<SortValue>,
    },
}

impl TopDocs {
    /// No hits at all.
    pub fn empty() -> Self {
        TopDocs::Plain {
            total_hits: TotalHits::exact(0),
            max_score: f32::NAN,
            score_docs: Vec::new(),
        }
    }

    pub fn total_hits(&self) -> TotalHits {
        match self {
            TopDocs::Plain { total_hits, .. }
            | TopDocs::FieldSorted { total_hits, .. }
            | TopDocs::Collapsed { total_hits, .. } => *total_hits,
        }
    }

    pub fn max_score(&self) -> f32 {
        match self {
            TopDocs::Plain { max_score, .. }
            | TopDocs::FieldSorted { max_score, .. }
            | TopDocs::Collapsed { max_score, .. } => *max_score,
        }
    }

    /// Number of hits carried (not the total hit count).
    pub fn len(&self) -> usize {
        match self {
            TopDocs::Plain { score_docs, .. } => score_docs.len(),
            TopDocs::FieldSorted { field_docs, .. } | TopDocs::Collapsed { field_docs, .. } => {
                field_docs.len()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sort_fields(&self) -> &[SortComparator] {
        match self {
            TopDocs::Plain { .. } => &[],
            TopDocs::FieldSorted { sort_fields, .. } | TopDocs::Collapsed { sort_fields, .. } => {
                sort_fields
            }
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            TopDocs::Plain { .. } => "plain",
            TopDocs::FieldSorted { .. } => "field-sorted",
            TopDocs::Collapsed { .. } => "collapsed",
        }
    }
}

impl PartialEq for TopDocs {
    fn eq(&self, other: &Self) -> bool {
        if self.total_hits() != other.total_hits()
            || !same_f32(self.max_score(), other.max_score())
        {
            return false;
        }
        match (self, other) {
            (TopDocs::Plain { score_docs: a, .. }, TopDocs::Plain { score_docs: b, .. }) => a == b,
            (
                TopDocs::FieldSorted {
                    sort_fields: fa,
                    field_docs: da,
                    ..
                },
                TopDocs::FieldSorted {
                    sort_fields: fb,
                    field_docs: db,
                    ..
                },
            ) => fa == fb && da == db,
            (
                TopDocs::Collapsed {
                    collapse_field: ca,
                    sort_fields: fa,
                    field_docs: da,
                    collapse_values: va,
                    ..
                },
                TopDocs::Collapsed {
                    collapse_field: cb,
                    sort_fields: fb,
                    field_docs: db,
                    collapse_values: vb,
                    ..
                },
            ) => ca == cb && fa == fb && da == db && va == vb,
            _ => false,
        }
    }
}

// =============================================================================
// EXPLANATIONS
// =============================================================================

/// The number attached to a matching explanation node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ExplanationValue {
    Float(#[serde(with = "json_float::single")] f32),
    Double(#[serde(with = "json_float::double")] f64),
    /// Any integral number.
    Long(i64),
}

impl PartialEq for ExplanationValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ExplanationValue::Float(a), ExplanationValue::Float(b)) => a.to_bits() == b.to_bits(),
            (ExplanationValue::Double(a), ExplanationValue::Double(b)) => {
                a.to_bits() == b.to_bits()
            }
            (ExplanationValue::Long(a), ExplanationValue::Long(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ExplanationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplanationValue::Float(v) => write!(f, "{}", v),
            ExplanationValue::Double(v) => write!(f, "{}", v),
            ExplanationValue::Long(v) => write!(f, "{}", v),
        }
    }
}

impl From<f32> for ExplanationValue {
    fn from(value: f32) -> Self {
        ExplanationValue::Float(value)
    }
}

impl From<f64> for ExplanationValue {
    fn from(value: f64) -> Self {
        ExplanationValue::Double(value)
    }
}

impl From<i64> for ExplanationValue {
    fn from(value: i64) -> Self {
        ExplanationValue::Long(value)
    }
}

impl From<i32> for ExplanationValue {
    fn from(value: i32) -> Self {
        ExplanationValue::Long(i64::from(value))
    }
}

/// Why a document scored what it did, as a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    value: Option<ExplanationValue>,
    description: String,
    details: Vec<Explanation>,
}

impl Explanation {
    pub fn matched(
        value: impl Into<ExplanationValue>,
        description: impl Into<String>,
        details: Vec<Explanation>,
    ) -> Self {
        Self {
            value: Some(value.into()),
            description: description.into(),
            details,
        }
    }

    pub fn no_match(description: impl Into<String>, details: Vec<Explanation>) -> Self {
        Self {
            value: None,
            description: description.into(),
            details,
        }
    }

    pub fn is_match(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<ExplanationValue> {
        self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn details(&self) -> &[Explanation] {
        &self.details
    }

    /// Levels in the tree, counting this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.details.iter().map(Explanation::depth).max().unwrap_or(0)
    }

    /// Total nodes in the tree.
    pub fn node_count(&self) -> usize {
        1 + self.details.iter().map(Explanation::node_count).sum::<usize>()
    }
}
