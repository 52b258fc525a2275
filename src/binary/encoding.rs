// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stream primitives: varints, zigzag, fixed-width big-endian numbers,
//! length-prefixed strings and bytes.
//!
//! Writers append to a `Vec<u8>` and cannot fail. Reading goes through
//! [`WireReader`], a forward-only cursor over a borrowed slice. Every read is
//! bounds-checked; running off the end is `MalformedStream`, never a panic.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   Originally from DWARF debugging format (1992+), popularized by Protocol Buffers.
//!   See: DWARF4 specification §7.6 "Variable Length Data", and
//!   Google Protocol Buffers encoding: <https://protobuf.dev/programming-guides/encoding/>
//!
//! - **ZigZag**: maps signed integers onto unsigned ones so that small
//!   magnitudes of either sign stay short. Same Protocol Buffers reference.

use crate::error::{Result, WireError};

use super::header::MAX_VARINT_BYTES;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES or overflows 64 bits (malformed/malicious input)
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize)> {
    if bytes.is_empty() {
        return Err(WireError::malformed("empty buffer for varint"));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        // The 10th byte may only contribute the single remaining bit.
        if i == MAX_VARINT_BYTES - 1 && byte > 0x01 {
            return Err(WireError::malformed("varint overflows 64 bits"));
        }
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((result, i));
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(WireError::malformed(
            "varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(WireError::malformed("incomplete varint"))
    }
}

// ============================================================================
// ZIGZAG
// ============================================================================

#[inline]
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Encode a signed 64-bit integer as a zigzag varint.
pub fn encode_zlong(value: i64, buf: &mut Vec<u8>) {
    encode_varint(zigzag_encode(value), buf);
}

// ============================================================================
// FIXED WIDTH (big-endian) AND LENGTH-PREFIXED WRITERS
// ============================================================================

/// Encode a 32-bit varint ("vint").
#[inline]
pub fn encode_vint(value: u32, buf: &mut Vec<u8>) {
    encode_varint(u64::from(value), buf);
}

#[inline]
pub fn encode_bool(value: bool, buf: &mut Vec<u8>) {
    buf.push(u8::from(value));
}

#[inline]
pub fn encode_i16(value: i16, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn encode_i32(value: i32, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn encode_i64(value: i64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn encode_f32(value: f32, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

#[inline]
pub fn encode_f64(value: f64, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

/// Length-prefixed raw bytes: `[len: vint][bytes]`.
pub fn encode_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    encode_varint(bytes.len() as u64, buf);
    buf.extend_from_slice(bytes);
}

/// Length-prefixed UTF-8: `[byte_len: vint][bytes]`.
pub fn encode_string(value: &str, buf: &mut Vec<u8>) {
    encode_bytes(value.as_bytes(), buf);
}

// ============================================================================
// READER
// ============================================================================

/// Forward-only cursor over an input slice.
///
/// Single pass, no backtracking. `position()` tells the caller how much was
/// consumed once a structure has been read.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        // Use checked arithmetic to prevent overflow on malicious input
        let end = self.pos.checked_add(len).ok_or_else(|| {
            WireError::malformed(format!("{} length {} causes overflow", what, len))
        })?;
        if end > self.bytes.len() {
            return Err(WireError::malformed(format!(
                "truncated {} at offset {} (expected {} bytes, {} left)",
                what,
                self.pos,
                len,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let slice = self.take(N, what)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>("byte")?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Booleans are exactly 0 or 1. Anything else means we're misaligned.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(WireError::malformed(format!(
                "unexpected boolean byte {:#04x} at offset {}",
                other,
                self.pos - 1
            ))),
        }
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.take_array("int16")?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array("int32")?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array("int64")?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(u32::from_be_bytes(
            self.take_array("float32")?,
        )))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(u64::from_be_bytes(
            self.take_array("float64")?,
        )))
    }

    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, consumed) = decode_varint(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// Read a 32-bit varint. Values past `u32::MAX` are rejected.
    pub fn read_vint(&mut self) -> Result<u32> {
        let value = self.read_varint()?;
        u32::try_from(value)
            .map_err(|_| WireError::malformed(format!("vint {} exceeds 32 bits", value)))
    }

    pub fn read_zlong(&mut self) -> Result<i64> {
        Ok(zigzag_decode(self.read_varint()?))
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .map_err(|_| WireError::malformed(format!("byte length {} too large", len)))?;
        Ok(self.take(len, "byte sequence")?.to_vec())
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .map_err(|_| WireError::malformed(format!("string length {} too large", len)))?;
        let start = self.pos;
        let raw = self.take(len, "string")?;
        String::from_utf8(raw.to_vec()).map_err(|e| {
            WireError::malformed(format!("invalid UTF-8 in string at offset {}: {}", start, e))
        })
    }

    /// Read an element count and check it against what is left in the input.
    ///
    /// Every element occupies at least `min_element_size` bytes, so a count
    /// that would need more than the remaining input is rejected before any
    /// allocation happens.
    pub fn read_count(&mut self, min_element_size: usize, limit: usize, what: &str) -> Result<usize> {
        let count = self.read_vint()? as usize;
        if count > limit {
            return Err(WireError::malformed(format!(
                "{} count {} exceeds limit {}",
                what, count, limit
            )));
        }
        let needed = count.saturating_mul(min_element_size.max(1));
        if needed > self.remaining() {
            return Err(WireError::malformed(format!(
                "{} count {} exceeds available bytes {}",
                what,
                count,
                self.remaining()
            )));
        }
        Ok(count)
    }
}


// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================
//
// Run with: cargo kani
//
// Verified properties:
// 1. encode_varint produces between 1 and MAX_VARINT_BYTES bytes
// 2. decode_varint never panics for any byte sequence
// 3. Roundtrip: decode(encode(x)) == x for all x
// 4. zigzag is a bijection

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    fn verify_encode_varint_bounded() {
        let value: u64 = kani::any();
        let mut buf = Vec::new();
        encode_varint(value, &mut buf);

        kani::assert(!buf.is_empty(), "encode_varint must produce at least 1 byte");
        kani::assert(
            buf.len() <= MAX_VARINT_BYTES,
            "encode_varint must produce at most MAX_VARINT_BYTES bytes",
        );
    }

    #[kani::proof]
    #[kani::unwind(12)]
    fn verify_decode_varint_no_panic() {
        let len: usize = kani::any_where(|&n| n <= MAX_VARINT_BYTES + 1);
        let mut bytes = [0u8; 11];
        for i in 0..len {
            bytes[i] = kani::any();
        }

        if let Ok((_, consumed)) = decode_varint(&bytes[..len]) {
            kani::assert(consumed > 0, "Must consume at least 1 byte on success");
            kani::assert(consumed <= len, "Cannot consume more bytes than available");
        }
    }

    #[kani::proof]
    #[kani::unwind(12)]
    fn verify_varint_roundtrip() {
        let original: u64 = kani::any();
        let mut buf = Vec::new();
        encode_varint(original, &mut buf);

        let result = decode_varint(&buf);
        kani::assert(result.is_ok(), "Decoding encoded value must succeed");
        if let Ok((decoded, consumed)) = result {
            kani::assert(decoded == original, "Roundtrip must preserve value");
            kani::assert(consumed == buf.len(), "Must consume exactly the encoded bytes");
        }
    }

    #[kani::proof]
    fn verify_zigzag_roundtrip() {
        let original: i64 = kani::any();
        kani::assert(
            zigzag_decode(zigzag_encode(original)) == original,
            "zigzag must be reversible",
        );
    }
}
