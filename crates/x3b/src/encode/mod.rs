// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Array encoder: algorithm selection and binary packing for typed field
//! values.
//!
//! Selection is driven by the field type and the run-wide encoding method.
//! Binary packing is only used where it wins: float arrays carry a size
//! guard comparing the packed length against the original string, and any
//! value the encoder cannot handle passes through as its literal string —
//! a scene document must stay decodable even when compression falls short.

pub mod algorithm;
pub mod deltazlib;
pub mod quantzlib;
pub mod varint;
pub mod vocabulary;

pub use algorithm::AlgorithmId;
pub use vocabulary::{Vocabulary, EXTERNAL_VOCABULARY_URI};

use crate::field::{FieldType, FieldValue};
use crate::stats::EncoderStats;

/// Error type shared by the binary codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended mid-value.
    Truncated,
    /// Varint too long for u64.
    VarintOverflow,
    /// Deflate compression failed.
    CompressFailed,
    /// Deflate decompression failed.
    DecompressFailed,
    /// Payload structurally invalid (e.g. delta stream leaves i32 range).
    InvalidData,
    /// Quantization step not finite and positive.
    BadQuantizationStep,
    /// Input value not finite; cannot quantize.
    NonFiniteValue,
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Truncated => write!(f, "unexpected end of payload"),
            CodecError::VarintOverflow => write!(f, "varint overflow"),
            CodecError::CompressFailed => write!(f, "deflate compression failed"),
            CodecError::DecompressFailed => write!(f, "deflate decompression failed"),
            CodecError::InvalidData => write!(f, "invalid payload data"),
            CodecError::BadQuantizationStep => write!(f, "quantization step must be finite and positive"),
            CodecError::NonFiniteValue => write!(f, "non-finite value cannot be quantized"),
        }
    }
}

impl std::error::Error for CodecError {}

/// Run-wide encoding method, fixed for the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMethod {
    /// Raw primitive arrays; cheapest to parse back.
    FastestParsing,
    /// Smallest output without losing information.
    #[default]
    SmallestNonlossy,
    /// Smallest output, floats quantized within a configured error bound.
    SmallestLossy,
    /// Everything stays a string; no binary packing at all.
    Strings,
}

/// Per-run encoder configuration.
#[derive(Debug, Clone, Copy)]
pub struct EncoderConfig {
    pub method: EncodingMethod,
    /// Drop fields equal to their schema default.
    pub remove_defaults: bool,
    /// Maximum quantization error for [`EncodingMethod::SmallestLossy`].
    pub quantization_error: f32,
    /// Track per-type occurrence and size counters.
    pub collect_stats: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            method: EncodingMethod::SmallestNonlossy,
            remove_defaults: true,
            quantization_error: quantzlib::DEFAULT_MAX_ERROR,
            collect_stats: true,
        }
    }
}

/// Payload of one encoded attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Original textual value, unpacked.
    Literal(String),
    /// Binary payload packed per the tagged algorithm.
    Algorithm(AlgorithmId, Vec<u8>),
}

impl Payload {
    /// Output byte length, for statistics.
    pub fn len(&self) -> usize {
        match self {
            Payload::Literal(s) => s.len(),
            Payload::Algorithm(_, bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One attribute of the output document stream.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAttribute {
    pub name: String,
    pub payload: Payload,
}

impl EncodedAttribute {
    pub fn literal(name: &str, value: &str) -> EncodedAttribute {
        EncodedAttribute {
            name: name.to_string(),
            payload: Payload::Literal(value.to_string()),
        }
    }

    pub fn algorithm(name: &str, id: AlgorithmId, bytes: Vec<u8>) -> EncodedAttribute {
        EncodedAttribute {
            name: name.to_string(),
            payload: Payload::Algorithm(id, bytes),
        }
    }
}

/// Stateless (apart from configuration) attribute encoder.
#[derive(Debug, Clone, Copy)]
pub struct ArrayEncoder {
    config: EncoderConfig,
}

impl ArrayEncoder {
    pub fn new(config: EncoderConfig) -> ArrayEncoder {
        ArrayEncoder { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a schema-resolved field value.
    ///
    /// Returns `None` for empty arrays: an empty `point=""` carries no
    /// information and is dropped like the classic serializer drops it.
    pub fn encode_field(
        &self,
        name: &str,
        ft: FieldType,
        value: &FieldValue,
        raw: &str,
        stats: &mut EncoderStats,
    ) -> Option<EncodedAttribute> {
        if self.config.method == EncodingMethod::Strings {
            return Some(EncodedAttribute::literal(name, raw));
        }

        let attr = match value {
            FieldValue::FloatArray(vals) => {
                if vals.is_empty() {
                    return None;
                }
                self.encode_float_array(name, vals, raw)
            }
            FieldValue::DoubleArray(vals) => {
                if vals.is_empty() {
                    return None;
                }
                EncodedAttribute::algorithm(name, AlgorithmId::Double, algorithm::pack_doubles(vals))
            }
            FieldValue::IntArray(vals) => {
                if vals.is_empty() {
                    return None;
                }
                match ft {
                    FieldType::MFInt32 => match deltazlib::encode(vals) {
                        Ok(payload) => {
                            EncodedAttribute::algorithm(name, AlgorithmId::DeltaZlibInt, payload)
                        }
                        Err(e) => {
                            log::warn!("[ENCODE] delta-zlib failed for {}: {}", name, e);
                            EncodedAttribute::literal(name, raw)
                        }
                    },
                    // SFImage / MFImage pixel data stays raw: it is already
                    // packed integers with little delta structure.
                    _ => EncodedAttribute::algorithm(name, AlgorithmId::Int, algorithm::pack_ints(vals)),
                }
            }
            FieldValue::BoolArray(vals) => {
                if vals.is_empty() {
                    return None;
                }
                EncodedAttribute::algorithm(name, AlgorithmId::Boolean, algorithm::pack_bools(vals))
            }
            // Scalars and string-kept types ride along as literals; the
            // binary framing already makes them cheap. Byte and short
            // arrays never come out of a typed field parse, only the
            // sniffer produces them, and that path is `encode_sniffed`.
            FieldValue::String(_)
            | FieldValue::Bool(_)
            | FieldValue::Int(_)
            | FieldValue::Long(_)
            | FieldValue::Float(_)
            | FieldValue::Double(_)
            | FieldValue::ByteArray(_)
            | FieldValue::ShortArray(_) => EncodedAttribute::literal(name, raw),
        };

        if self.config.collect_stats {
            stats.record_encoded(ft, attr.payload.len());
        }
        Some(attr)
    }

    /// Encode a value classified by the heuristic sniffer (no schema).
    pub fn encode_sniffed(&self, name: &str, value: &FieldValue, raw: &str) -> EncodedAttribute {
        if self.config.method == EncodingMethod::Strings {
            return EncodedAttribute::literal(name, raw);
        }
        match value {
            FieldValue::ByteArray(vals) => {
                EncodedAttribute::algorithm(name, AlgorithmId::Byte, algorithm::pack_bytes(vals))
            }
            FieldValue::ShortArray(vals) => {
                EncodedAttribute::algorithm(name, AlgorithmId::Short, algorithm::pack_shorts(vals))
            }
            FieldValue::IntArray(vals) => {
                EncodedAttribute::algorithm(name, AlgorithmId::Int, algorithm::pack_ints(vals))
            }
            FieldValue::FloatArray(vals) => {
                EncodedAttribute::algorithm(name, AlgorithmId::Float, algorithm::pack_floats(vals))
            }
            FieldValue::BoolArray(vals) => {
                EncodedAttribute::algorithm(name, AlgorithmId::Boolean, algorithm::pack_bools(vals))
            }
            _ => EncodedAttribute::literal(name, raw),
        }
    }

    fn encode_float_array(&self, name: &str, vals: &[f32], raw: &str) -> EncodedAttribute {
        match self.config.method {
            EncodingMethod::SmallestLossy => {
                match quantzlib::encode(vals, self.config.quantization_error) {
                    Ok(payload) => {
                        EncodedAttribute::algorithm(name, AlgorithmId::QuantizedZlibFloat, payload)
                    }
                    Err(e) => {
                        log::warn!(
                            "[ENCODE] quantization failed for {}: {}; using raw floats",
                            name,
                            e
                        );
                        EncodedAttribute::algorithm(name, AlgorithmId::Float, algorithm::pack_floats(vals))
                    }
                }
            }
            // Binary packing is not always a win: a short array like
            // "0 0 0" is 5 characters but 12 packed bytes.
            _ => {
                let packed_len = algorithm::float_octet_len(vals.len());
                if packed_len <= raw.len() {
                    EncodedAttribute::algorithm(name, AlgorithmId::Float, algorithm::pack_floats(vals))
                } else {
                    EncodedAttribute::literal(name, raw)
                }
            }
        }
    }
}
