// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort comparators, and their reduction to canonical sort fields.
//!
//! A shard ranks hits with whatever comparator the query asked for: distance
//! from a point, the minimum of a multi-valued field, a field-data source with
//! its own missing-value policy. The coordinator never re-ranks from scratch.
//! It only merges hits that are already in order, so it needs a single key per
//! sort field and the direction. [`normalize`] throws away everything else.
//!
//! Normalization is a separate step that produces a new [`SortField`]; the
//! sort field codec only ever sees canonical fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, WireError};
use crate::types::{GenericValue, MissingValue, SortField, SortType};

/// Which value of a multi-valued string field a document sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortedSetSelector {
    Min,
    Max,
    MiddleMin,
    MiddleMax,
}

/// Which value of a multi-valued numeric field a document sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortedNumericSelector {
    Min,
    Max,
}

/// Missing-value policy of a field-data comparator source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// Missing documents sort first in the requested direction.
    First,
    /// Missing documents sort last in the requested direction.
    Last,
    /// Missing documents sort as if they had this value.
    Value(GenericValue),
}

/// Every comparator a shard can rank with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SortComparator {
    /// Already representable as is.
    Canonical(SortField),
    /// Distance from a point to a geo field.
    GeoDistance {
        field: String,
        latitude: f64,
        longitude: f64,
        reverse: bool,
        missing: Option<MissingValue>,
    },
    /// Multi-valued string field reduced by a selector.
    SortedSet {
        field: String,
        selector: SortedSetSelector,
        reverse: bool,
        missing: Option<MissingValue>,
    },
    /// Multi-valued numeric field reduced by a selector. `wider` marks the
    /// flavor that compares across numeric widths.
    SortedNumeric {
        field: String,
        numeric_type: SortType,
        selector: SortedNumericSelector,
        reverse: bool,
        missing: Option<MissingValue>,
        wider: bool,
    },
    /// Canonical field backed by a field-data comparator source. The wire
    /// type is the source's reduced type.
    FieldData {
        field: String,
        reduced_type: SortType,
        missing: MissingPolicy,
        reverse: bool,
    },
    /// A comparator plugin we know nothing about.
    Custom { name: String },
}

impl SortComparator {
    pub fn field(&self) -> Option<&str> {
        match self {
            SortComparator::Canonical(sf) => sf.field.as_deref(),
            SortComparator::GeoDistance { field, .. }
            | SortComparator::SortedSet { field, .. }
            | SortComparator::SortedNumeric { field, .. }
            | SortComparator::FieldData { field, .. } => Some(field),
            SortComparator::Custom { .. } => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SortComparator::Canonical(_) => "canonical",
            SortComparator::GeoDistance { .. } => "geo distance",
            SortComparator::SortedSet { .. } => "sorted set",
            SortComparator::SortedNumeric { wider: false, .. } => "sorted numeric",
            SortComparator::SortedNumeric { wider: true, .. } => "sorted wider numeric",
            SortComparator::FieldData { .. } => "field data",
            SortComparator::Custom { .. } => "custom",
        }
    }
}

impl From<SortField> for SortComparator {
    fn from(field: SortField) -> Self {
        SortComparator::Canonical(field)
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Reduce a comparator to the canonical sort field the coordinator merges by.
///
/// - Geo distance becomes DOUBLE (the shard already computed the distances).
/// - Sorted set becomes STRING, sorted numeric becomes its numeric type; the
///   selector is dropped.
/// - Field data takes its source's reduced type and resolves the missing
///   value for the sort direction.
/// - Anything else is [`WireError::UnsupportedSortField`].
pub fn normalize(comparator: &SortComparator) -> Result<SortField> {
    let canonical = match comparator {
        SortComparator::Canonical(sf) => return Ok(sf.clone()),
        SortComparator::GeoDistance {
            field,
            reverse,
            missing,
            ..
        } => SortField {
            field: Some(field.clone()),
            sort_type: SortType::Double,
            reverse: *reverse,
            missing: missing.clone(),
        },
        SortComparator::SortedSet {
            field,
            reverse,
            missing,
            ..
        } => SortField {
            field: Some(field.clone()),
            sort_type: SortType::String,
            reverse: *reverse,
            missing: missing.clone(),
        },
        SortComparator::SortedNumeric {
            field,
            numeric_type,
            reverse,
            missing,
            ..
        } => {
            if !numeric_type.is_numeric() {
                return Err(WireError::UnsupportedSortField(format!(
                    "{} on '{}' with non-numeric type {:?}",
                    comparator.kind_name(),
                    field,
                    numeric_type
                )));
            }
            SortField {
                field: Some(field.clone()),
                sort_type: *numeric_type,
                reverse: *reverse,
                missing: missing.clone(),
            }
        }
        SortComparator::FieldData {
            field,
            reduced_type,
            missing,
            reverse,
        } => SortField {
            field: Some(field.clone()),
            sort_type: *reduced_type,
            reverse: *reverse,
            missing: resolve_missing(*reduced_type, missing, *reverse)?,
        },
        SortComparator::Custom { name } => {
            return Err(WireError::UnsupportedSortField(format!(
                "custom comparator '{}'",
                name
            )));
        }
    };

    debug!(
        kind = comparator.kind_name(),
        field = ?canonical.field,
        sort_type = ?canonical.sort_type,
        "normalized sort comparator"
    );
    Ok(canonical)
}

/// The missing value a field-data source actually sorts by, given the
/// direction.
fn resolve_missing(
    reduced_type: SortType,
    policy: &MissingPolicy,
    reverse: bool,
) -> Result<Option<MissingValue>> {
    match policy {
        MissingPolicy::First | MissingPolicy::Last => {
            let first = matches!(policy, MissingPolicy::First);
            // "first" in a reversed sort means the largest value
            let min = first ^ reverse;
            let value = match reduced_type {
                SortType::Int => GenericValue::Int(if min { i32::MIN } else { i32::MAX }),
                SortType::Long => GenericValue::Long(if min { i64::MIN } else { i64::MAX }),
                SortType::Float => GenericValue::Float(if min {
                    f32::NEG_INFINITY
                } else {
                    f32::INFINITY
                }),
                SortType::Double => GenericValue::Double(if min {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }),
                SortType::String | SortType::StringVal => {
                    let last = !first;
                    return Ok(Some(if last ^ reverse {
                        MissingValue::StringLast
                    } else {
                        MissingValue::StringFirst
                    }));
                }
                other => {
                    return Err(WireError::unsupported_type(format!(
                        "missing first/last for reduced type {:?}",
                        other
                    )));
                }
            };
            Ok(Some(MissingValue::Value(value)))
        }
        MissingPolicy::Value(value) => match reduced_type {
            // the string source fills missing values itself
            SortType::String | SortType::StringVal => Ok(None),
            SortType::Int | SortType::Long | SortType::Float | SortType::Double => {
                coerce_numeric(reduced_type, value).map(|v| Some(MissingValue::Value(v)))
            }
            other => Err(WireError::unsupported_type(format!(
                "missing value for reduced type {:?}",
                other
            ))),
        },
    }
}

/// Convert a configured missing value to the reduced numeric type.
fn coerce_numeric(target: SortType, value: &GenericValue) -> Result<GenericValue> {
    let text = match value {
        GenericValue::String(s) => s.trim().to_string(),
        GenericValue::Int(v) => v.to_string(),
        GenericValue::Long(v) => v.to_string(),
        GenericValue::Float(v) => v.to_string(),
        GenericValue::Double(v) => v.to_string(),
        GenericValue::Byte(v) => v.to_string(),
        GenericValue::Short(v) => v.to_string(),
        other => {
            return Err(WireError::unsupported_type(format!(
                "cannot use {} as a {:?} missing value",
                other.type_name(),
                target
            )));
        }
    };

    let bad = || {
        WireError::unsupported_type(format!(
            "cannot parse '{}' as a {:?} missing value",
            text, target
        ))
    };
    Ok(match target {
        SortType::Int => GenericValue::Int(text.parse().map_err(|_| bad())?),
        SortType::Long => GenericValue::Long(text.parse().map_err(|_| bad())?),
        SortType::Float => GenericValue::Float(text.parse().map_err(|_| bad())?),
        SortType::Double => GenericValue::Double(text.parse().map_err(|_| bad())?),
        _ => return Err(bad()),
    })
}

// ============================================================================
// EARLY TERMINATION
// ============================================================================

/// Whether a search sorted by `search_sort` can stop early on an index sorted
/// by `index_sort`: true iff the search sort is a prefix of the index sort.
pub fn can_early_terminate(search_sort: &[SortField], index_sort: &[SortField]) -> bool {
    search_sort.len() <= index_sort.len() && search_sort == &index_sort[..search_sort.len()]
}
