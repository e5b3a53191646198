// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! # x3b - Compact binary encoding for X3D/VRML scene documents
//!
//! Encodes XML scene documents into a compact binary stream. Numeric bulk
//! data (coordinate arrays, index lists, color tables) is packed with
//! per-type algorithms; everything else rides along as literal strings
//! inside the binary framing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use x3b::{DocumentEncoder, EncoderConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let mut encoder = DocumentEncoder::with_builtin_schemas(EncoderConfig::default());
//!     encoder.encode_file("scene.x3d".as_ref(), "scene.x3b".as_ref())?;
//!     println!("{}", encoder.stats().report());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! attribute value
//!     |
//!     v
//! resolve ---- schema miss ----> sniff (heuristic classification)
//!     |                              |
//!     v                              v
//! parse (typed)                 array encoder (built-in algorithms)
//!     |
//!     v
//! elide (drop schema defaults)
//!     |
//!     v
//! array encoder (algorithm selection + size guard)
//!     |
//!     v
//! binary writer (tagged record stream)
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DocumentEncoder`] | Single-pass driver from XML text to the binary stream |
//! | [`EncoderConfig`] | Run-wide settings: method, default removal, error bound |
//! | [`EncodingMethod`] | Fastest-parsing, smallest-nonlossy, smallest-lossy, strings |
//! | [`SchemaSet`] | Node field declarations with typed defaults |
//! | [`EncoderStats`] | Per-type occurrence and size counters for one run |
//!
//! ## Modules Overview
//!
//! - [`doc`] - Document driver and binary writer (start here)
//! - [`encode`] - Algorithm table, binary packers, delta and quantized codecs
//! - [`schema`] - Node schema registry and the built-in X3D table
//! - [`field`] - Field type system and typed value parsing
//! - [`sniff`] - Heuristic classification for schema-less values

pub mod doc;
pub mod elide;
pub mod encode;
pub mod error;
pub mod field;
pub mod resolve;
pub mod schema;
pub mod sniff;
pub mod stats;

pub use doc::{BinaryWriter, DocumentEncoder};
pub use encode::{
    AlgorithmId, ArrayEncoder, CodecError, EncodedAttribute, EncoderConfig, EncodingMethod,
    Payload, Vocabulary, EXTERNAL_VOCABULARY_URI,
};
pub use error::{Error, Result};
pub use field::{AccessType, FieldType, FieldValue};
pub use schema::{FieldDecl, NodeSchema, SchemaSet, SchemaSetBuilder};
pub use sniff::SniffClass;
pub use stats::EncoderStats;
