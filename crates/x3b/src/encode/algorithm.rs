// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Algorithm identifiers and the raw big-endian primitive packers.
//!
//! Ids below 32 are the Fast Infoset built-in encoding algorithm indices;
//! 32 and up are extension algorithms identified by URI, registered in the
//! serializer vocabulary at stream open so a decoder can map them back.

/// Identifier tagging which packing scheme produced a binary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlgorithmId {
    /// Raw big-endian i16 array (built-in SHORT).
    Short = 2,
    /// Raw big-endian i32 array (built-in INT).
    Int = 3,
    /// One byte per value boolean array (built-in BOOLEAN).
    Boolean = 5,
    /// Raw big-endian IEEE f32 array (built-in FLOAT).
    Float = 6,
    /// Raw big-endian IEEE f64 array (built-in DOUBLE).
    Double = 7,
    /// Raw i8 array (extension).
    Byte = 32,
    /// Delta-coded, deflate-compressed i32 array (extension, lossless).
    DeltaZlibInt = 33,
    /// Quantized, delta-coded, deflate-compressed f32 array (extension,
    /// lossy within a configured error bound).
    QuantizedZlibFloat = 34,
}

impl AlgorithmId {
    /// Extension algorithm URI; `None` for Fast Infoset built-ins.
    pub const fn uri(self) -> Option<&'static str> {
        match self {
            AlgorithmId::Byte => Some("encoder://web3d.org/ByteEncoder"),
            AlgorithmId::DeltaZlibInt => Some("encoder://web3d.org/DeltazlibIntArrayEncoder"),
            AlgorithmId::QuantizedZlibFloat => {
                Some("encoder://web3d.org/QuantizedzlibFloatArrayEncoder")
            }
            _ => None,
        }
    }

    /// True for algorithms that reproduce the input exactly.
    pub const fn is_lossless(self) -> bool {
        !matches!(self, AlgorithmId::QuantizedZlibFloat)
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlgorithmId::Short => "SHORT",
            AlgorithmId::Int => "INT",
            AlgorithmId::Boolean => "BOOLEAN",
            AlgorithmId::Float => "FLOAT",
            AlgorithmId::Double => "DOUBLE",
            AlgorithmId::Byte => "BYTE",
            AlgorithmId::DeltaZlibInt => "DELTA_ZLIB_INT",
            AlgorithmId::QuantizedZlibFloat => "QUANTIZED_ZLIB_FLOAT",
        };
        f.write_str(name)
    }
}

/// Packed byte length of a raw f32 array, without building it. Drives the
/// size guard in the array encoder.
pub const fn float_octet_len(count: usize) -> usize {
    count * 4
}

pub fn pack_floats(vals: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vals.len() * 4);
    for v in vals {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

pub fn unpack_floats(buf: &[u8]) -> Option<Vec<f32>> {
    if buf.len() % 4 != 0 {
        return None;
    }
    Some(
        buf.chunks_exact(4)
            .map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

pub fn pack_doubles(vals: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vals.len() * 8);
    for v in vals {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

pub fn unpack_doubles(buf: &[u8]) -> Option<Vec<f64>> {
    if buf.len() % 8 != 0 {
        return None;
    }
    Some(
        buf.chunks_exact(8)
            .map(|c| f64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect(),
    )
}

pub fn pack_ints(vals: &[i32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vals.len() * 4);
    for v in vals {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

pub fn unpack_ints(buf: &[u8]) -> Option<Vec<i32>> {
    if buf.len() % 4 != 0 {
        return None;
    }
    Some(
        buf.chunks_exact(4)
            .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}

pub fn pack_shorts(vals: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vals.len() * 2);
    for v in vals {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

pub fn unpack_shorts(buf: &[u8]) -> Option<Vec<i16>> {
    if buf.len() % 2 != 0 {
        return None;
    }
    Some(
        buf.chunks_exact(2)
            .map(|c| i16::from_be_bytes([c[0], c[1]]))
            .collect(),
    )
}

pub fn pack_bytes(vals: &[i8]) -> Vec<u8> {
    vals.iter().map(|v| *v as u8).collect()
}

pub fn unpack_bytes(buf: &[u8]) -> Vec<i8> {
    buf.iter().map(|v| *v as i8).collect()
}

pub fn pack_bools(vals: &[bool]) -> Vec<u8> {
    vals.iter().map(|v| u8::from(*v)).collect()
}

pub fn unpack_bools(buf: &[u8]) -> Vec<bool> {
    buf.iter().map(|v| *v != 0).collect()
}
