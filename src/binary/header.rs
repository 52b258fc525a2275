// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Limits for untrusted input, and the dump file envelope used by the CLI.
//!
//! The transport format itself has no header: a shard writes the result
//! straight into the response buffer. When a result is saved to disk (for
//! replaying a merge, attaching to a bug report, or feeding the fuzzer) it is
//! wrapped in a small envelope so a truncated or bit-flipped file is caught
//! before the decoder ever looks at it.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ HEADER (10 bytes)                            │
//! │   magic: [u8; 4] = "HWIR"                    │
//! │   version: u8 = 1                            │
//! │   kind: u8  (0 = top docs, 1 = explanation)  │
//! │   payload_len: u32 (big-endian)              │
//! ├──────────────────────────────────────────────┤
//! │ PAYLOAD (wire bytes, exactly as transported) │
//! ├──────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "RIWH"       │
//! └──────────────────────────────────────────────┘
//! ```

use crc32fast::Hasher as Crc32Hasher;

use crate::error::{Result, WireError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "HWIR" in ASCII (header)
pub const MAGIC: [u8; 4] = [0x48, 0x57, 0x49, 0x52];

/// Footer magic: "RIWH" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = [0x52, 0x49, 0x57, 0x48];

/// Current dump envelope version
pub const VERSION: u8 = 1;

// ============================================================================
// SECURITY LIMITS (prevent resource exhaustion from malicious input)
// ============================================================================

/// Maximum varint bytes (u64 needs at most 10 bytes)
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum number of elements in any counted sequence
pub const MAX_COLLECTION_LEN: usize = 10_000_000;

/// Default nesting limit for explanation trees
pub const DEFAULT_MAX_EXPLANATION_DEPTH: usize = 64;

/// Maximum dump file size: 256 MB
pub const MAX_DUMP_SIZE: usize = 256 * 1024 * 1024;

// ============================================================================
// DUMP KIND
// ============================================================================

/// What the payload of a dump file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    TopDocs = 0,
    Explanation = 1,
}

impl DumpKind {
    fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(DumpKind::TopDocs),
            1 => Ok(DumpKind::Explanation),
            other => Err(WireError::malformed(format!("unknown dump kind {}", other))),
        }
    }
}

// ============================================================================
// HEADER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpHeader {
    pub version: u8,
    pub kind: DumpKind,
    pub payload_len: u32,
}

impl DumpHeader {
    // 4 (magic) + 1 (version) + 1 (kind) + 4 (payload_len) = 10
    pub const SIZE: usize = 10;

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&MAGIC);
        buf.push(self.version);
        buf.push(self.kind as u8);
        buf.extend_from_slice(&self.payload_len.to_be_bytes());
    }

    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(WireError::malformed("file too short for dump header"));
        }
        if bytes[..4] != MAGIC {
            return Err(WireError::malformed(format!(
                "invalid magic: expected HWIR, got {:?}",
                &bytes[..4]
            )));
        }
        let version = bytes[4];
        if version != VERSION {
            return Err(WireError::malformed(format!(
                "unsupported dump version {} (expected {})",
                version, VERSION
            )));
        }
        Ok(Self {
            version,
            kind: DumpKind::from_byte(bytes[5])?,
            payload_len: u32::from_be_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]),
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone)]
pub struct DumpFooter {
    /// CRC32 checksum of header + payload (everything before footer)
    pub crc32: u32,
}

impl DumpFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.crc32.to_be_bytes());
        buf.extend_from_slice(&FOOTER_MAGIC);
    }

    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(WireError::malformed("file too short for footer"));
        }

        let footer_start = bytes.len() - Self::SIZE;

        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(WireError::malformed(format!(
                "invalid footer magic: expected RIWH, got {:?}",
                magic
            )));
        }

        let crc32 = u32::from_be_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);

        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}

// ============================================================================
// WHOLE FILE
// ============================================================================

/// Wrap wire bytes in a dump envelope.
pub fn write_dump(kind: DumpKind, payload: &[u8]) -> Result<Vec<u8>> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        WireError::malformed(format!("payload of {} bytes too large to dump", payload.len()))
    })?;

    let mut buf = Vec::with_capacity(DumpHeader::SIZE + payload.len() + DumpFooter::SIZE);
    DumpHeader {
        version: VERSION,
        kind,
        payload_len,
    }
    .write(&mut buf);
    buf.extend_from_slice(payload);

    let crc32 = DumpFooter::compute_crc32(&buf);
    DumpFooter { crc32 }.write(&mut buf);
    Ok(buf)
}

/// Validate a dump file and return its kind and payload slice.
///
/// # Validation
///
/// 1. File size is within MAX_DUMP_SIZE
/// 2. Header magic and version are valid
/// 3. Payload length matches the file size
/// 4. Footer magic is valid and the CRC32 matches
pub fn read_dump(bytes: &[u8]) -> Result<(DumpKind, &[u8])> {
    if bytes.len() > MAX_DUMP_SIZE {
        return Err(WireError::malformed(format!(
            "dump too large: {} bytes (max {})",
            bytes.len(),
            MAX_DUMP_SIZE
        )));
    }

    let header = DumpHeader::read(bytes)?;
    let expected = DumpHeader::SIZE + header.payload_len as usize + DumpFooter::SIZE;
    if bytes.len() != expected {
        return Err(WireError::malformed(format!(
            "dump size {} does not match header (expected {})",
            bytes.len(),
            expected
        )));
    }

    let footer = DumpFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - DumpFooter::SIZE];
    let actual = DumpFooter::compute_crc32(content);
    if actual != footer.crc32 {
        return Err(WireError::malformed(format!(
            "CRC32 mismatch: stored {:#010x}, computed {:#010x}",
            footer.crc32, actual
        )));
    }

    Ok((header.kind, &content[DumpHeader::SIZE..]))
}
