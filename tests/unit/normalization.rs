//! Comparator normalization as seen through the encoder.

use hitwire::codec::{encode_sort_comparator, encode_sort_field};
use hitwire::{
    can_early_terminate, encode_top_docs, normalize, GenericValue, MissingPolicy, MissingValue,
    SortComparator, SortField, SortType, SortedNumericSelector, SortedSetSelector, TopDocs,
    TotalHits, WireError,
};

fn encoded(comparator: &SortComparator) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_sort_comparator(comparator, &mut buf).unwrap();
    buf
}

fn encoded_field(field: &SortField) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_sort_field(field, &mut buf);
    buf
}

#[test]
fn test_geo_distance_matches_double_for_every_direction_and_missing() {
    let missings = [
        None,
        Some(MissingValue::Value(GenericValue::Double(f64::INFINITY))),
        Some(MissingValue::Value(GenericValue::Double(-1.5))),
    ];
    for reverse in [false, true] {
        for missing in &missings {
            let geo = SortComparator::GeoDistance {
                field: "pin".into(),
                latitude: -33.86,
                longitude: 151.21,
                reverse,
                missing: missing.clone(),
            };
            let double = SortField {
                field: Some("pin".into()),
                sort_type: SortType::Double,
                reverse,
                missing: missing.clone(),
            };
            assert_eq!(encoded(&geo), encoded_field(&double));
        }
    }
}

#[test]
fn test_sorted_set_matches_string() {
    for selector in [
        SortedSetSelector::Min,
        SortedSetSelector::Max,
        SortedSetSelector::MiddleMin,
        SortedSetSelector::MiddleMax,
    ] {
        let set = SortComparator::SortedSet {
            field: "tags".into(),
            selector,
            reverse: true,
            missing: Some(MissingValue::StringFirst),
        };
        let string = SortField::new("tags", SortType::String)
            .reversed(true)
            .with_missing(MissingValue::StringFirst);
        assert_eq!(encoded(&set), encoded_field(&string));
    }
}

#[test]
fn test_sorted_numeric_flavors_match_their_numeric_type() {
    for numeric_type in [SortType::Int, SortType::Long, SortType::Float, SortType::Double] {
        for wider in [false, true] {
            let numeric = SortComparator::SortedNumeric {
                field: "n".into(),
                numeric_type,
                selector: SortedNumericSelector::Max,
                reverse: false,
                missing: None,
                wider,
            };
            assert_eq!(
                encoded(&numeric),
                encoded_field(&SortField::new("n", numeric_type))
            );
        }
    }
}

#[test]
fn test_field_data_missing_last_resolves_per_direction() {
    let forward = SortComparator::FieldData {
        field: "age".into(),
        reduced_type: SortType::Long,
        missing: MissingPolicy::Last,
        reverse: false,
    };
    let sf = normalize(&forward).unwrap();
    assert_eq!(
        sf.missing,
        Some(MissingValue::Value(GenericValue::Long(i64::MAX)))
    );

    let backward = SortComparator::FieldData {
        field: "age".into(),
        reduced_type: SortType::Long,
        missing: MissingPolicy::Last,
        reverse: true,
    };
    let sf = normalize(&backward).unwrap();
    assert_eq!(
        sf.missing,
        Some(MissingValue::Value(GenericValue::Long(i64::MIN)))
    );
    assert!(sf.reverse);
}

#[test]
fn test_field_data_string_missing_first() {
    let comparator = SortComparator::FieldData {
        field: "name".into(),
        reduced_type: SortType::String,
        missing: MissingPolicy::First,
        reverse: false,
    };
    assert_eq!(
        normalize(&comparator).unwrap().missing,
        Some(MissingValue::StringFirst)
    );
}

#[test]
fn test_field_data_coerces_configured_missing_value() {
    let comparator = SortComparator::FieldData {
        field: "rating".into(),
        reduced_type: SortType::Float,
        missing: MissingPolicy::Value(GenericValue::String("2.5".into())),
        reverse: false,
    };
    assert_eq!(
        normalize(&comparator).unwrap().missing,
        Some(MissingValue::Value(GenericValue::Float(2.5)))
    );

    let garbage = SortComparator::FieldData {
        field: "rating".into(),
        reduced_type: SortType::Int,
        missing: MissingPolicy::Value(GenericValue::String("lots".into())),
        reverse: false,
    };
    assert!(matches!(
        normalize(&garbage),
        Err(WireError::UnsupportedType(_))
    ));
}

#[test]
fn test_custom_comparator_fails_the_whole_result() {
    let top_docs = TopDocs::FieldSorted {
        total_hits: TotalHits::exact(0),
        max_score: f32::NAN,
        sort_fields: vec![SortComparator::Custom {
            name: "painless-script".into(),
        }],
        field_docs: vec![],
    };
    let mut buf = Vec::new();
    let err = encode_top_docs(&top_docs, &mut buf).unwrap_err();
    assert!(matches!(err, WireError::UnsupportedSortField(_)));
    assert!(buf.is_empty());
}

#[test]
fn test_sorted_numeric_with_string_type_is_unsupported() {
    let comparator = SortComparator::SortedNumeric {
        field: "n".into(),
        numeric_type: SortType::String,
        selector: SortedNumericSelector::Min,
        reverse: false,
        missing: None,
        wider: false,
    };
    assert!(matches!(
        normalize(&comparator),
        Err(WireError::UnsupportedSortField(_))
    ));
}

#[test]
fn test_early_termination_requires_prefix() {
    let index_sort = vec![
        SortField::new("date", SortType::Long).reversed(true),
        SortField::new("id", SortType::Int),
    ];
    assert!(can_early_terminate(&index_sort[..1], &index_sort));
    assert!(can_early_terminate(&index_sort, &index_sort));
    assert!(can_early_terminate(&[], &index_sort));

    let wrong_direction = vec![SortField::new("date", SortType::Long)];
    assert!(!can_early_terminate(&wrong_direction, &index_sort));

    let longer = vec![
        index_sort[0].clone(),
        index_sort[1].clone(),
        SortField::score(),
    ];
    assert!(!can_early_terminate(&longer, &index_sort));
}
