// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! ULEB128 varints and zigzag mapping for signed values.
//!
//! Used for the length prefixes in the document stream and for the delta
//! streams inside the zlib codecs. 7 data bits per byte, bit 7 continues;
//! a u64 needs at most 10 bytes.

use super::CodecError;

/// Append `value` to `out` in ULEB128 form.
pub fn write_varint(value: u64, out: &mut Vec<u8>) {
    let mut v = value;
    loop {
        let byte = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Decode a ULEB128 value from the front of `buf`, returning the value and
/// the number of bytes consumed.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize), CodecError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for (i, byte) in buf.iter().enumerate() {
        if shift >= 64 {
            return Err(CodecError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }
    Err(CodecError::Truncated)
}

/// Map a signed value onto the unsigned varint space: small magnitudes of
/// either sign stay small.
pub const fn zigzag(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

pub const fn unzigzag(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
