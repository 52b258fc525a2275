// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for whole shard results.
//!
//! The coordinator decodes whatever a shard sends. Hostile bytes must give an
//! error without panicking or allocating past the input, and anything that
//! does decode must survive a round trip.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use hitwire::{decode_top_docs_with, encode_top_docs_with, CodecOptions};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    strict: bool,
    bytes: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = CodecOptions::default().strict(input.strict);
    let Ok((top_docs, consumed)) = decode_top_docs_with(input.bytes, &options) else {
        return;
    };
    assert!(consumed <= input.bytes.len());

    let mut buf = Vec::new();
    encode_top_docs_with(&top_docs, &mut buf, &options)
        .expect("a decoded result must re-encode");
    let (again, reconsumed) =
        decode_top_docs_with(&buf, &options).expect("a re-encoded result must decode");
    assert_eq!(again, top_docs);
    assert_eq!(reconsumed, buf.len());
});
