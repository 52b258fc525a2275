// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) and zigzag decoding.
//!
//! Counts, doc ids, string lengths and integral explanation values all ride
//! on varints. Garbage must come back as Err, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use hitwire::binary::{decode_varint, encode_varint, zigzag_decode, zigzag_encode, WireReader};

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= 10, "varint consumed {} bytes", consumed);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded varint must decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
        // minimal form is never longer than what we were given
        assert!(reencoded.len() <= consumed);

        assert_eq!(zigzag_encode(zigzag_decode(value)), value);
    }

    // 32-bit reads reject anything that doesn't fit instead of truncating
    let mut r = WireReader::new(data);
    if let Ok(v) = r.read_vint() {
        assert_eq!(decode_varint(data).map(|(x, _)| x), Ok(u64::from(v)));
    }
});
