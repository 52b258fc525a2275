//! Shared test utilities and fixtures.

#![allow(dead_code)]

use hitwire::{
    decode_explanation, decode_top_docs, encode_explanation, encode_top_docs, BigInteger,
    Explanation, GenericValue, MissingValue, SortField, SortType, SortValue, TopDocs,
};
use proptest::prelude::*;

// Re-export canonical fixtures from hitwire::testing
pub use hitwire::testing::{
    boundary_sort_values, make_collapsed, make_explanation_chain, make_field_doc,
    make_field_sorted, make_mixed_explanation, make_plain,
};

// ============================================================================
// ROUND TRIPS
// ============================================================================

/// Encode, decode, and check the decoder consumed exactly what was written.
pub fn roundtrip_top_docs(top_docs: &TopDocs) -> (TopDocs, Vec<u8>) {
    let mut buf = Vec::new();
    encode_top_docs(top_docs, &mut buf).expect("encode failed");
    let (decoded, consumed) = decode_top_docs(&buf).expect("decode failed");
    assert_eq!(consumed, buf.len(), "decoder left bytes behind");
    (decoded, buf)
}

pub fn roundtrip_explanation(explanation: &Explanation) -> (Explanation, Vec<u8>) {
    let mut buf = Vec::new();
    encode_explanation(explanation, &mut buf).expect("encode failed");
    let (decoded, consumed) = decode_explanation(&buf).expect("decode failed");
    assert_eq!(consumed, buf.len(), "decoder left bytes behind");
    (decoded, buf)
}

// ============================================================================
// STRATEGIES
// ============================================================================

pub fn sort_value_strategy() -> impl Strategy<Value = SortValue> {
    prop_oneof![
        Just(SortValue::Null),
        ".{0,16}".prop_map(SortValue::String),
        any::<i32>().prop_map(SortValue::Int),
        any::<i64>().prop_map(SortValue::Long),
        any::<f32>().prop_map(SortValue::Float),
        any::<f64>().prop_map(SortValue::Double),
        any::<i8>().prop_map(SortValue::Byte),
        any::<i16>().prop_map(SortValue::Short),
        any::<bool>().prop_map(SortValue::Bool),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(SortValue::Bytes),
        any::<i128>().prop_map(|v| SortValue::BigInteger(BigInteger::from(v))),
    ]
}

pub fn generic_value_strategy() -> impl Strategy<Value = GenericValue> {
    prop_oneof![
        ".{0,8}".prop_map(GenericValue::String),
        any::<i32>().prop_map(GenericValue::Int),
        any::<i64>().prop_map(GenericValue::Long),
        any::<f32>().prop_map(GenericValue::Float),
        any::<f64>().prop_map(GenericValue::Double),
        any::<bool>().prop_map(GenericValue::Bool),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(GenericValue::ByteArray),
        any::<i8>().prop_map(GenericValue::Byte),
        any::<i16>().prop_map(GenericValue::Short),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(GenericValue::BytesRef),
    ]
}

pub fn missing_value_strategy() -> impl Strategy<Value = Option<MissingValue>> {
    prop_oneof![
        Just(None),
        Just(Some(MissingValue::StringFirst)),
        Just(Some(MissingValue::StringLast)),
        generic_value_strategy().prop_map(|v| Some(MissingValue::Value(v))),
    ]
}

pub fn sort_field_strategy() -> impl Strategy<Value = SortField> {
    (
        prop::option::of("[a-z_]{1,12}"),
        prop::sample::select(SortType::ALL.to_vec()),
        any::<bool>(),
        missing_value_strategy(),
    )
        .prop_map(|(field, sort_type, reverse, missing)| SortField {
            field,
            sort_type,
            reverse,
            missing,
        })
}

/// Nameless string fields with a one-byte sentinel: the smallest sort
/// field the format has.
pub fn sentinel_sort_field_strategy() -> impl Strategy<Value = SortField> {
    (
        prop::sample::select(vec![SortType::String, SortType::StringVal]),
        any::<bool>(),
        prop_oneof![Just(MissingValue::StringFirst), Just(MissingValue::StringLast)],
    )
        .prop_map(|(sort_type, reverse, missing)| SortField {
            field: None,
            sort_type,
            reverse,
            missing: Some(missing),
        })
}

/// Explanation trees up to `depth` levels with a handful of children each.
pub fn explanation_strategy(depth: u32) -> impl Strategy<Value = Explanation> {
    let leaf = (".{0,12}", prop::option::of(explanation_value_strategy())).prop_map(
        |(description, value)| match value {
            Some(v) => Explanation::matched(v, description, vec![]),
            None => Explanation::no_match(description, vec![]),
        },
    );
    leaf.prop_recursive(depth.saturating_sub(1), 32, 4, |inner| {
        (
            ".{0,12}",
            prop::option::of(explanation_value_strategy()),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(description, value, details)| match value {
                Some(v) => Explanation::matched(v, description, details),
                None => Explanation::no_match(description, details),
            })
    })
}

pub fn explanation_value_strategy() -> impl Strategy<Value = hitwire::ExplanationValue> {
    use hitwire::ExplanationValue;
    prop_oneof![
        any::<f32>().prop_map(ExplanationValue::Float),
        any::<f64>().prop_map(ExplanationValue::Double),
        any::<i64>().prop_map(ExplanationValue::Long),
    ]
}
