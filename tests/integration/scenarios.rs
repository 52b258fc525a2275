//! End-to-end scenarios: what one shard writes, the coordinator reads.

use hitwire::binary::WireReader;
use hitwire::codec::{decode_total_hits, encode_total_hits};
use hitwire::{
    decode_top_docs, decode_top_docs_with, encode_top_docs, CodecOptions, Explanation,
    ExplanationValue, FieldDoc, MissingValue, ScoreDoc, SortComparator, SortField, SortType,
    SortValue, TopDocs, TotalHits, TotalHitsRelation, WireError,
};

use crate::common::{
    boundary_sort_values, make_collapsed, make_explanation_chain, make_field_sorted,
    make_mixed_explanation, make_plain, roundtrip_explanation, roundtrip_top_docs,
};

// ============================================================================
// TOP DOCS
// ============================================================================

#[test]
fn test_plain_result_field_by_field() {
    let top_docs = TopDocs::Plain {
        total_hits: TotalHits::exact(5),
        max_score: 1.0,
        score_docs: vec![ScoreDoc::new(3, 1.0), ScoreDoc::new(7, 0.5)],
    };
    let (decoded, _) = roundtrip_top_docs(&top_docs);

    let TopDocs::Plain {
        total_hits,
        max_score,
        score_docs,
    } = decoded
    else {
        panic!("expected plain");
    };
    assert_eq!(total_hits.value, 5);
    assert_eq!(total_hits.relation, TotalHitsRelation::EqualTo);
    assert_eq!(max_score, 1.0);
    assert_eq!(score_docs.len(), 2);
    assert_eq!((score_docs[0].doc_id, score_docs[0].score), (3, 1.0));
    assert_eq!((score_docs[1].doc_id, score_docs[1].score), (7, 0.5));
}

#[test]
fn test_field_sorted_keeps_string_last_and_mixed_values() {
    let top_docs = TopDocs::FieldSorted {
        total_hits: TotalHits::exact(1),
        max_score: f32::NAN,
        sort_fields: vec![SortField::new("title", SortType::String)
            .with_missing(MissingValue::StringLast)
            .into()],
        field_docs: vec![FieldDoc::new(
            0,
            f32::NAN,
            vec![SortValue::from("alpha"), SortValue::Int(42)],
        )],
    };
    let (decoded, _) = roundtrip_top_docs(&top_docs);
    assert_eq!(decoded, top_docs);

    let TopDocs::FieldSorted {
        sort_fields,
        field_docs,
        ..
    } = decoded
    else {
        panic!("expected field sorted");
    };
    let SortComparator::Canonical(title) = &sort_fields[0] else {
        panic!("decoded sort fields are always canonical");
    };
    assert_eq!(title.missing, Some(MissingValue::StringLast));
    assert_eq!(
        field_docs[0].sort_values,
        vec![SortValue::String("alpha".into()), SortValue::Int(42)]
    );
}

#[test]
fn test_every_variant_roundtrips() {
    for n in [0, 1, 25] {
        for top_docs in [make_plain(n), make_field_sorted(n), make_collapsed(n)] {
            let (decoded, _) = roundtrip_top_docs(&top_docs);
            assert_eq!(decoded, top_docs, "{} with {} hits", top_docs.variant_name(), n);
        }
    }
}

#[test]
fn test_empty_result() {
    let (decoded, bytes) = roundtrip_top_docs(&TopDocs::empty());
    assert!(decoded.is_empty());
    assert!(decoded.max_score().is_nan());
    assert_eq!(decoded.total_hits(), TotalHits::exact(0));
    // tag, total hits value, relation, max score, count
    assert_eq!(bytes.len(), 1 + 1 + 1 + 4 + 1);
}

#[test]
fn test_boundary_values_as_sort_and_collapse_keys() {
    let values = boundary_sort_values();
    let field_docs: Vec<FieldDoc> = values
        .iter()
        .enumerate()
        .map(|(i, v)| FieldDoc::new(i as i32, f32::NEG_INFINITY, vec![v.clone()]))
        .collect();

    let sorted = TopDocs::FieldSorted {
        total_hits: TotalHits::at_least(u64::MAX),
        max_score: f32::INFINITY,
        sort_fields: vec![SortField::new("k", SortType::Custom).into()],
        field_docs: field_docs.clone(),
    };
    assert_eq!(roundtrip_top_docs(&sorted).0, sorted);

    let collapsed = TopDocs::Collapsed {
        total_hits: TotalHits::exact(values.len() as u64),
        max_score: -0.0,
        collapse_field: "k".into(),
        sort_fields: vec![],
        field_docs,
        collapse_values: values,
    };
    assert_eq!(roundtrip_top_docs(&collapsed).0, collapsed);
}

#[test]
fn test_total_hits_both_relations() {
    for total_hits in [TotalHits::exact(0), TotalHits::at_least(10_000)] {
        let mut buf = Vec::new();
        encode_total_hits(&total_hits, &mut buf);
        let mut r = WireReader::new(&buf);
        assert_eq!(decode_total_hits(&mut r).unwrap(), total_hits);
        assert!(r.is_empty());
    }
}

#[test]
fn test_collapsed_mismatch_writes_nothing() {
    let top_docs = TopDocs::Collapsed {
        total_hits: TotalHits::exact(2),
        max_score: 1.0,
        collapse_field: "group".into(),
        sort_fields: vec![SortField::score().into()],
        field_docs: vec![
            FieldDoc::new(1, 1.0, vec![SortValue::Float(1.0)]),
            FieldDoc::new(2, 0.5, vec![SortValue::Float(0.5)]),
        ],
        collapse_values: vec![SortValue::from("a")],
    };
    let mut buf = vec![0xAB];
    let err = encode_top_docs(&top_docs, &mut buf).unwrap_err();
    assert_eq!(
        err,
        WireError::MismatchedCollapseValues {
            field_docs: 2,
            collapse_values: 1
        }
    );
    assert_eq!(buf, vec![0xAB]);
}

#[test]
fn test_geo_sorted_result_decodes_as_double() {
    let top_docs = TopDocs::FieldSorted {
        total_hits: TotalHits::exact(1),
        max_score: f32::NAN,
        sort_fields: vec![SortComparator::GeoDistance {
            field: "location".into(),
            latitude: 52.52,
            longitude: 13.40,
            reverse: false,
            missing: None,
        }],
        field_docs: vec![FieldDoc::new(9, f32::NAN, vec![SortValue::Double(1234.5)])],
    };
    let mut buf = Vec::new();
    encode_top_docs(&top_docs, &mut buf).unwrap();
    let (decoded, _) = decode_top_docs(&buf).unwrap();
    assert_eq!(
        decoded.sort_fields(),
        &[SortComparator::Canonical(SortField::new(
            "location",
            SortType::Double
        ))]
    );
}

#[test]
fn test_strict_decoder_rejects_short_field_doc() {
    let mut top_docs = make_field_sorted(3);
    if let TopDocs::FieldSorted { field_docs, .. } = &mut top_docs {
        field_docs[1].sort_values.truncate(1);
    }
    let mut buf = Vec::new();
    encode_top_docs(&top_docs, &mut buf).unwrap();

    assert!(decode_top_docs(&buf).is_ok());
    let strict = CodecOptions::default().strict(true);
    assert_eq!(
        decode_top_docs_with(&buf, &strict).unwrap_err(),
        WireError::MismatchedSortValues {
            index: 1,
            sort_values: 1,
            sort_fields: 2
        }
    );
}

#[test]
fn test_results_back_to_back_in_one_buffer() {
    let first = make_plain(2);
    let second = make_collapsed(2);
    let mut buf = Vec::new();
    encode_top_docs(&first, &mut buf).unwrap();
    encode_top_docs(&second, &mut buf).unwrap();

    let (a, used) = decode_top_docs(&buf).unwrap();
    let (b, rest) = decode_top_docs(&buf[used..]).unwrap();
    assert_eq!(a, first);
    assert_eq!(b, second);
    assert_eq!(used + rest, buf.len());
}

// ============================================================================
// EXPLANATIONS
// ============================================================================

#[test]
fn test_mixed_explanation_depth_five() {
    let tree = make_mixed_explanation();
    assert_eq!(tree.depth(), 5);
    let (decoded, _) = roundtrip_explanation(&tree);
    assert_eq!(decoded, tree);

    fn has_long(node: &Explanation, wanted: i64) -> bool {
        node.value() == Some(ExplanationValue::Long(wanted))
            || node.details().iter().any(|c| has_long(c, wanted))
    }
    assert!(has_long(&decoded, 12345));
    assert!(decoded
        .details()
        .iter()
        .any(|child| !child.is_match()));
}

#[test]
fn test_child_order_is_preserved() {
    let tree = Explanation::matched(
        1.0f32,
        "sum",
        (0..10)
            .map(|i| Explanation::matched(i, format!("term {}", i), vec![]))
            .collect(),
    );
    let (decoded, _) = roundtrip_explanation(&tree);
    let descriptions: Vec<&str> = decoded.details().iter().map(|c| c.description()).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("term {}", i)).collect();
    assert_eq!(descriptions, expected);
}

#[test]
fn test_deep_chain_at_default_limit() {
    let tree = make_explanation_chain(64);
    assert_eq!(roundtrip_explanation(&tree).0, tree);

    let mut buf = Vec::new();
    let err = hitwire::encode_explanation(&make_explanation_chain(65), &mut buf).unwrap_err();
    assert_eq!(err, WireError::ExplanationTooDeep { limit: 64 });
    assert!(buf.is_empty());
}
