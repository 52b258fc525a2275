// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte-level building blocks shared by every codec.
//!
//! Nothing here knows what a hit or a sort field is. `encoding` has the
//! stream primitives (varints, zigzag, big-endian fixed width, length-prefixed
//! strings) and the [`WireReader`] cursor. `header` has the input limits and
//! the on-disk dump envelope.
//!
//! # Security Considerations
//!
//! Input comes from other nodes and is treated as untrusted:
//! - Counts are checked against remaining bytes before allocating
//! - Bounds checking prevents buffer overreads
//! - Varint decoder has maximum iteration limits
//! - CRC32 footer detects corruption/truncation of dump files

mod encoding;
mod header;

pub use encoding::{
    decode_varint, encode_bool, encode_bytes, encode_f32, encode_f64, encode_i16, encode_i32,
    encode_i64, encode_string, encode_varint, encode_vint, encode_zlong, zigzag_decode,
    zigzag_encode, WireReader,
};
pub use header::{
    read_dump, write_dump, DumpFooter, DumpHeader, DumpKind, DEFAULT_MAX_EXPLANATION_DEPTH,
    FOOTER_MAGIC, MAGIC, MAX_COLLECTION_LEN, MAX_DUMP_SIZE, MAX_VARINT_BYTES, VERSION,
};
