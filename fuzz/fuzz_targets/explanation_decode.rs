// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for explanation trees with a fuzzed depth limit.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use hitwire::{decode_explanation_with, encode_explanation_with, CodecOptions, WireError};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    max_depth: u8,
    bytes: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let limit = usize::from(input.max_depth).max(1);
    let options = CodecOptions::default().with_max_explanation_depth(limit);
    match decode_explanation_with(input.bytes, &options) {
        Ok((tree, consumed)) => {
            assert!(consumed <= input.bytes.len());
            assert!(tree.depth() <= limit);

            let mut buf = Vec::new();
            encode_explanation_with(&tree, &mut buf, &options)
                .expect("a decoded tree must re-encode");
            assert!(buf.len() <= consumed);
            let (again, _) = decode_explanation_with(&buf, &options)
                .expect("a re-encoded tree must decode");
            assert_eq!(again, tree);
        }
        Err(WireError::ExplanationTooDeep { limit: reported }) => assert_eq!(reported, limit),
        Err(_) => {}
    }
});
