// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Delta-coded, deflate-compressed integer arrays (lossless).
//!
//! Index fields like `coordIndex` are long runs of nearby values broken by
//! `-1` face terminators; first-order deltas collapse them into a stream of
//! small magnitudes that deflate compresses well.
//!
//! # Wire format
//!
//! ```text
//! payload = count(varint) | deflate( zigzag_varint(v[0]),
//!                                    zigzag_varint(v[1] - v[0]), ... )
//! ```

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use super::varint::{read_varint, unzigzag, write_varint, zigzag};
use super::CodecError;

/// Encode an i32 array. Empty input encodes to a bare zero count.
pub fn encode(vals: &[i32]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(vals.len() / 2 + 8);
    write_varint(vals.len() as u64, &mut out);
    if vals.is_empty() {
        return Ok(out);
    }

    let mut deltas = Vec::with_capacity(vals.len() * 2);
    let mut prev: i64 = 0;
    for v in vals {
        let v = i64::from(*v);
        write_varint(zigzag(v - prev), &mut deltas);
        prev = v;
    }

    let mut encoder = DeflateEncoder::new(out, Compression::default());
    encoder
        .write_all(&deltas)
        .map_err(|_| CodecError::CompressFailed)?;
    encoder.finish().map_err(|_| CodecError::CompressFailed)
}

/// Decode a payload produced by [`encode`].
pub fn decode(payload: &[u8]) -> Result<Vec<i32>, CodecError> {
    let (count, used) = read_varint(payload)?;
    let count = usize::try_from(count).map_err(|_| CodecError::VarintOverflow)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut deltas = Vec::new();
    DeflateDecoder::new(&payload[used..])
        .read_to_end(&mut deltas)
        .map_err(|_| CodecError::DecompressFailed)?;

    let mut vals = Vec::with_capacity(count);
    let mut prev: i64 = 0;
    let mut pos = 0usize;
    for _ in 0..count {
        let (raw, used) = read_varint(&deltas[pos..])?;
        pos += used;
        let v = prev + unzigzag(raw);
        vals.push(i32::try_from(v).map_err(|_| CodecError::InvalidData)?);
        prev = v;
    }
    Ok(vals)
}
