// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Quantized, delta-coded, deflate-compressed float arrays (lossy).
//!
//! Each value is snapped to the nearest multiple of a step derived from the
//! configured maximum error, so reconstruction error is at most half the
//! step. Quantized integers are then delta-coded and deflated like the
//! integer codec; coordinate streams with spatial locality compress far
//! below raw IEEE floats.
//!
//! # Wire format
//!
//! ```text
//! payload = count(varint) | step(f32, BE) |
//!           deflate( zigzag_varint(q[0]), zigzag_varint(q[1] - q[0]), ... )
//! ```

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use super::varint::{read_varint, unzigzag, write_varint, zigzag};
use super::CodecError;

/// Default maximum quantization error, matching the classic serializer's
/// `-quantizeParam` default.
pub const DEFAULT_MAX_ERROR: f32 = 0.001;

/// Encode an f32 array with reconstruction error bounded by `max_error`.
///
/// Fails on non-finite input or on values too large for the quantization
/// grid; the caller falls back to raw float packing.
pub fn encode(vals: &[f32], max_error: f32) -> Result<Vec<u8>, CodecError> {
    if !(max_error.is_finite() && max_error > 0.0) {
        return Err(CodecError::BadQuantizationStep);
    }

    let mut out = Vec::with_capacity(vals.len() + 16);
    write_varint(vals.len() as u64, &mut out);
    out.extend_from_slice(&max_error.to_be_bytes());
    if vals.is_empty() {
        return Ok(out);
    }

    let mut deltas = Vec::with_capacity(vals.len() * 2);
    let mut prev: i64 = 0;
    for v in vals {
        if !v.is_finite() {
            return Err(CodecError::NonFiniteValue);
        }
        let q = (f64::from(*v) / f64::from(max_error)).round();
        if q.abs() >= i64::MAX as f64 {
            return Err(CodecError::InvalidData);
        }
        let q = q as i64;
        write_varint(zigzag(q - prev), &mut deltas);
        prev = q;
    }

    let mut encoder = DeflateEncoder::new(out, Compression::default());
    encoder
        .write_all(&deltas)
        .map_err(|_| CodecError::CompressFailed)?;
    encoder.finish().map_err(|_| CodecError::CompressFailed)
}

/// Decode a payload produced by [`encode`].
pub fn decode(payload: &[u8]) -> Result<Vec<f32>, CodecError> {
    let (count, used) = read_varint(payload)?;
    let count = usize::try_from(count).map_err(|_| CodecError::VarintOverflow)?;
    let rest = &payload[used..];
    if rest.len() < 4 {
        return Err(CodecError::Truncated);
    }
    let step = f32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]);
    if !(step.is_finite() && step > 0.0) {
        return Err(CodecError::BadQuantizationStep);
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut deltas = Vec::new();
    DeflateDecoder::new(&rest[4..])
        .read_to_end(&mut deltas)
        .map_err(|_| CodecError::DecompressFailed)?;

    let mut vals = Vec::with_capacity(count);
    let mut prev: i64 = 0;
    let mut pos = 0usize;
    for _ in 0..count {
        let (raw, used) = read_varint(&deltas[pos..])?;
        pos += used;
        let q = prev + unzigzag(raw);
        vals.push((q as f64 * f64::from(step)) as f32);
        prev = q;
    }
    Ok(vals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_within(original: &[f32], decoded: &[f32], max_error: f32) {
        assert_eq!(original.len(), decoded.len());
        for (a, b) in original.iter().zip(decoded.iter()) {
            assert!(
                (a - b).abs() <= max_error,
                "error {} exceeds bound {}",
                (a - b).abs(),
                max_error
            );
        }
    }

    #[test]
    fn test_error_stays_within_bound() {
        let vals = [0.0f32, 1.2345, -9.876, 100.001, 0.0005];
        for max_error in [0.001f32, 0.000_001] {
            let decoded = decode(&encode(&vals, max_error).unwrap()).unwrap();
            assert_within(&vals, &decoded, max_error);
        }
    }

    #[test]
    fn test_random_coordinates_within_bound() {
        let max_error = 0.001f32;
        let mut vals = Vec::with_capacity(3_000);
        for _ in 0..3_000 {
            vals.push((fastrand::f32() - 0.5) * 200.0);
        }
        let decoded = decode(&encode(&vals, max_error).unwrap()).unwrap();
        assert_within(&vals, &decoded, max_error);
    }

    #[test]
    fn test_grid_values_roundtrip_exactly() {
        // Values already on the quantization grid come back bit-equal.
        let vals = [0.0f32, 0.25, -0.5, 2.0, 100.75];
        let decoded = decode(&encode(&vals, 0.25).unwrap()).unwrap();
        assert_eq!(decoded, vals);
    }

    #[test]
    fn test_smooth_data_compresses() {
        let vals: Vec<f32> = (0..4_096).map(|i| (i as f32 * 0.01).sin()).collect();
        let payload = encode(&vals, 0.001).unwrap();
        assert!(payload.len() < vals.len() * 4 / 2);
    }

    #[test]
    fn test_empty_array() {
        let payload = encode(&[], 0.001).unwrap();
        assert_eq!(decode(&payload).unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert_eq!(
            encode(&[1.0], 0.0),
            Err(CodecError::BadQuantizationStep)
        );
        assert_eq!(
            encode(&[f32::NAN], 0.001),
            Err(CodecError::NonFiniteValue)
        );
        assert_eq!(
            encode(&[f32::INFINITY], 0.001),
            Err(CodecError::NonFiniteValue)
        );
    }
}
