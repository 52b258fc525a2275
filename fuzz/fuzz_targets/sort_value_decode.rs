// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for sort values, missing values and sort fields.

#![no_main]

use libfuzzer_sys::fuzz_target;
use hitwire::binary::WireReader;
use hitwire::codec::{
    decode_missing_value, decode_sort_field, decode_sort_value, encode_missing_value,
    encode_sort_field, encode_sort_value,
};

fuzz_target!(|data: &[u8]| {
    let mut r = WireReader::new(data);
    if let Ok(value) = decode_sort_value(&mut r) {
        // non-minimal varints are accepted, so compare values, not bytes
        let mut buf = Vec::new();
        encode_sort_value(&value, &mut buf);
        assert!(buf.len() <= r.position());
        let mut again = WireReader::new(&buf);
        assert_eq!(decode_sort_value(&mut again).ok(), Some(value));
    }

    let mut r = WireReader::new(data);
    if let Ok(missing) = decode_missing_value(&mut r) {
        let mut buf = Vec::new();
        encode_missing_value(missing.as_ref(), &mut buf);
        let mut again = WireReader::new(&buf);
        assert_eq!(decode_missing_value(&mut again).ok(), Some(missing));
    }

    let mut r = WireReader::new(data);
    if let Ok(field) = decode_sort_field(&mut r) {
        let mut buf = Vec::new();
        encode_sort_field(&field, &mut buf);
        let mut again = WireReader::new(&buf);
        assert_eq!(decode_sort_field(&mut again).ok(), Some(field));
    }
});
