//! Hostile and corrupt input. Every case must come back as an error, never a
//! panic or a runaway allocation.

use hitwire::binary::WireReader;
use hitwire::codec::{decode_missing_value, decode_sort_field, decode_sort_value};
use hitwire::{decode_explanation, decode_top_docs, encode_top_docs, WireError};

use crate::common::{make_collapsed, make_field_sorted, make_plain};

fn is_malformed<T: std::fmt::Debug>(result: hitwire::Result<T>) -> bool {
    matches!(result, Err(WireError::MalformedStream(_)))
}

#[test]
fn test_unknown_top_docs_tag() {
    let bytes = [3u8, 0, 0, 0, 0, 0, 0, 0];
    assert_eq!(
        decode_top_docs(&bytes).unwrap_err(),
        WireError::UnknownVariant {
            what: "top docs",
            tag: 3
        }
    );
}

#[test]
fn test_every_truncation_is_malformed() {
    for top_docs in [make_plain(3), make_field_sorted(3), make_collapsed(3)] {
        let mut buf = Vec::new();
        encode_top_docs(&top_docs, &mut buf).unwrap();
        for len in 0..buf.len() {
            let result = decode_top_docs(&buf[..len]);
            assert!(
                is_malformed(result.clone()),
                "{} truncated to {} bytes gave {:?}",
                top_docs.variant_name(),
                len,
                result
            );
        }
    }
}

#[test]
fn test_oversized_count_is_rejected_before_allocating() {
    // plain, exactly 0, max score 0, then a count of u32::MAX with no hits
    let bytes = [0u8, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F];
    assert!(is_malformed(decode_top_docs(&bytes)));
}

#[test]
fn test_explanation_child_count_larger_than_input() {
    let bytes = [0u8, 0, 0x7F];
    assert!(is_malformed(decode_explanation(&bytes)));
}

#[test]
fn test_bool_byte_other_than_zero_or_one() {
    // sort field whose has-name flag is 2
    let mut r = WireReader::new(&[2, 1, b'x', 3, 0, 0xFF, 0]);
    assert!(is_malformed(decode_sort_field(&mut r)));

    // explanation whose match flag is 0x80
    assert!(is_malformed(decode_explanation(&[0x80, 0, 0])));
}

#[test]
fn test_invalid_utf8_string() {
    let mut r = WireReader::new(&[1, 2, 0xC3, 0x28]);
    assert!(is_malformed(decode_sort_value(&mut r)));
}

#[test]
fn test_sort_type_ordinal_out_of_range() {
    let mut r = WireReader::new(&[0, 10, 0, 0xFF, 0]);
    assert!(matches!(
        decode_sort_field(&mut r),
        Err(WireError::UnknownVariant {
            what: "sort type",
            tag: 10
        })
    ));
}

#[test]
fn test_unknown_sort_value_tag() {
    for tag in [11u8, 42, 0xFF] {
        let buf = [tag, 0, 0, 0, 0];
        let mut r = WireReader::new(&buf);
        assert!(matches!(
            decode_sort_value(&mut r),
            Err(WireError::UnsupportedType(_))
        ));
    }
}

#[test]
fn test_unknown_missing_value_id() {
    let mut r = WireReader::new(&[3]);
    assert!(matches!(
        decode_missing_value(&mut r),
        Err(WireError::UnsupportedType(_))
    ));
}

#[test]
fn test_unknown_generic_value_tag() {
    // generic follows, tag 7 is not in the table
    let mut r = WireReader::new(&[0, 7, 0, 0, 0, 0]);
    assert!(matches!(
        decode_missing_value(&mut r),
        Err(WireError::UnsupportedType(_))
    ));
}

#[test]
fn test_varint_overflow() {
    let mut bytes = vec![0u8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    bytes.push(0x01);
    assert!(is_malformed(decode_top_docs(&bytes)));
}

#[test]
fn test_unknown_total_hits_relation() {
    let bytes = [0u8, 5, 2, 0, 0, 0, 0, 0];
    assert!(matches!(
        decode_top_docs(&bytes),
        Err(WireError::UnknownVariant { tag: 2, .. })
    ));
}

#[test]
fn test_garbage_big_integer_text() {
    let mut r = WireReader::new(&[10, 3, b'1', b'x', b'2']);
    assert!(is_malformed(decode_sort_value(&mut r)));
}

#[test]
fn test_empty_input() {
    assert!(is_malformed(decode_top_docs(&[])));
    assert!(is_malformed(decode_explanation(&[])));
}
