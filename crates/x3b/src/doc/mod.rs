// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Single-pass document driver.
//!
//! Walks an XML scene document in order and streams it to the binary
//! writer. Each attribute goes through one pipeline: schema resolution,
//! typed parse, default elision, then the array encoder. Attributes the
//! schema does not know are classified by the heuristic sniffer instead.
//! One input element maps to one output element; nothing is reordered or
//! buffered past the current attribute.

pub mod writer;

pub use writer::BinaryWriter;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::elide::should_elide;
use crate::encode::{ArrayEncoder, EncodedAttribute, EncoderConfig, EncodingMethod, Vocabulary};
use crate::error::Result;
use crate::field::parse::parse_field;
use crate::resolve::{resolve, Resolution};
use crate::schema::SchemaSet;
use crate::sniff;
use crate::stats::EncoderStats;

/// Drives one document through the encoding pipeline.
///
/// Owns the run configuration, the schema registry and the statistics for
/// the run. Reusable: a second document keeps accumulating into the same
/// counters unless [`DocumentEncoder::take_stats`] resets them.
pub struct DocumentEncoder {
    encoder: ArrayEncoder,
    schemas: SchemaSet,
    stats: EncoderStats,
}

impl DocumentEncoder {
    pub fn new(config: EncoderConfig, schemas: SchemaSet) -> DocumentEncoder {
        DocumentEncoder {
            encoder: ArrayEncoder::new(config),
            schemas,
            stats: EncoderStats::new(),
        }
    }

    /// Encoder over the built-in X3D node schemas.
    pub fn with_builtin_schemas(config: EncoderConfig) -> DocumentEncoder {
        DocumentEncoder::new(config, SchemaSet::builtin())
    }

    pub fn config(&self) -> &EncoderConfig {
        self.encoder.config()
    }

    pub fn stats(&self) -> &EncoderStats {
        &self.stats
    }

    /// Drain the run statistics, resetting the counters.
    pub fn take_stats(&mut self) -> EncoderStats {
        std::mem::take(&mut self.stats)
    }

    /// Encode one XML document string into `out`, returning the sink.
    pub fn encode_str<W: Write>(&mut self, xml: &str, out: W) -> Result<W> {
        let doc = roxmltree::Document::parse(xml)?;
        let method = self.encoder.config().method;
        let vocabulary = Vocabulary::standard();
        let mut writer = BinaryWriter::open(out, &vocabulary, method)?;
        self.encode_element(&mut writer, doc.root_element())?;
        Ok(writer.finish()?)
    }

    /// Encode a file to a file. The output is buffered; a partial file may
    /// remain on error.
    pub fn encode_file(&mut self, input: &Path, output: &Path) -> Result<()> {
        let xml = fs::read_to_string(input)?;
        let sink = BufWriter::new(fs::File::create(output)?);
        let mut sink = self.encode_str(&xml, sink)?;
        sink.flush()?;
        Ok(())
    }

    fn encode_element<W: Write>(
        &mut self,
        writer: &mut BinaryWriter<W>,
        node: roxmltree::Node<'_, '_>,
    ) -> Result<()> {
        let element = node.tag_name().name();
        writer.start_element(element)?;

        for attr in node.attributes() {
            self.encode_attribute(writer, element, attr.name(), attr.value())?;
        }

        for child in node.children() {
            if child.is_element() {
                self.encode_element(writer, child)?;
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    if !text.trim().is_empty() {
                        self.encode_text(writer, text)?;
                    }
                }
            }
            // Comments and processing instructions do not survive encoding.
        }

        writer.end_element()?;
        Ok(())
    }

    fn encode_attribute<W: Write>(
        &mut self,
        writer: &mut BinaryWriter<W>,
        element: &str,
        name: &str,
        raw: &str,
    ) -> Result<()> {
        let config = *self.encoder.config();
        match resolve(&self.schemas, element, name) {
            Resolution::Known(decl) => {
                // The strings rendition is a complete textual form: every
                // known attribute stays as its literal value, defaults
                // included, and none of the typed counters move.
                if config.method == EncodingMethod::Strings {
                    writer.attribute(&EncodedAttribute::literal(name, raw))?;
                    return Ok(());
                }
                let decl = decl.clone();
                if config.collect_stats {
                    self.stats.record_field(decl.field_type, raw.len());
                }
                let parsed = match parse_field(decl.field_type, raw) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        // Fail soft: a malformed value rides through as its
                        // literal string rather than aborting the document.
                        log::warn!(
                            "[DOC] {}.{} failed to parse as {}: {}; passing through",
                            element,
                            name,
                            decl.field_type,
                            e
                        );
                        writer.attribute(&EncodedAttribute::literal(name, raw))?;
                        return Ok(());
                    }
                };
                if config.remove_defaults && should_elide(&parsed, &decl.default) {
                    if config.collect_stats {
                        self.stats.record_elision();
                    }
                    return Ok(());
                }
                if let Some(attr) =
                    self.encoder
                        .encode_field(name, decl.field_type, &parsed, raw, &mut self.stats)
                {
                    writer.attribute(&attr)?;
                }
            }
            Resolution::Event => {
                log::debug!("[DOC] {}.{} is an event; dropped", element, name);
            }
            Resolution::Unknown => {
                let (value, class) = sniff::classify(raw);
                if config.collect_stats {
                    self.stats.record_sniff(class, raw.len());
                }
                let attr = self.encoder.encode_sniffed(name, &value, raw);
                writer.attribute(&attr)?;
            }
        }
        Ok(())
    }

    /// Character data has no schema by definition; it always sniffs.
    fn encode_text<W: Write>(&mut self, writer: &mut BinaryWriter<W>, text: &str) -> Result<()> {
        let (value, class) = sniff::classify(text);
        if self.encoder.config().collect_stats {
            self.stats.record_sniff(class, text.len());
        }
        let attr = self.encoder.encode_sniffed("", &value, text);
        writer.text(&attr.payload)?;
        Ok(())
    }
}

impl Default for DocumentEncoder {
    fn default() -> Self {
        DocumentEncoder::with_builtin_schemas(EncoderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use crate::sniff::SniffClass;

    fn encode(xml: &str, config: EncoderConfig) -> (Vec<u8>, EncoderStats) {
        let mut enc = DocumentEncoder::with_builtin_schemas(config);
        let bytes = enc.encode_str(xml, Vec::new()).unwrap();
        let stats = enc.take_stats();
        (bytes, stats)
    }

    #[test]
    fn test_default_box_size_is_elided() {
        let (_, stats) = encode(
            r#"<Scene><Shape><Box size="2 2 2"/></Shape></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.elided_defaults(), 1);
        assert_eq!(stats.field_occurrences(FieldType::SFVec3f), 1);
    }

    #[test]
    fn test_textual_variant_of_default_still_elides() {
        // "2.0 2.0 2.0" parses to the same value as the default "2 2 2".
        let (_, stats) = encode(
            r#"<Scene><Box size="2.0 2.0 2.0"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.elided_defaults(), 1);
    }

    #[test]
    fn test_save_defaults_keeps_the_attribute() {
        let config = EncoderConfig {
            remove_defaults: false,
            ..EncoderConfig::default()
        };
        let (bytes, stats) = encode(r#"<Scene><Box size="2 2 2"/></Scene>"#, config);
        assert_eq!(stats.elided_defaults(), 0);
        // The literal survives the size guard (5 chars < 12 packed bytes).
        assert!(bytes.windows(5).any(|w| w == b"2 2 2"));
    }

    #[test]
    fn test_non_default_value_is_kept() {
        let (_, stats) = encode(
            r#"<Scene><Box size="1 2 3"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.elided_defaults(), 0);
        assert_eq!(stats.field_occurrences(FieldType::SFVec3f), 1);
    }

    #[test]
    fn test_unknown_attribute_takes_the_sniffer_path() {
        let (_, stats) = encode(
            r#"<Scene><MysteryNode level="1 2 3"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.sniff_occurrences(SniffClass::Byte), 1);
    }

    #[test]
    fn test_event_attributes_are_dropped() {
        let (bytes, stats) = encode(
            r#"<Scene><TimeSensor fraction_changed="0.5"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert!(!bytes.windows(16).any(|w| w == b"fraction_changed"));
        // Neither counted as a field nor sniffed.
        assert_eq!(stats.field_occurrences(FieldType::SFFloat), 0);
        assert_eq!(stats.sniff_occurrences(SniffClass::Float), 0);
    }

    #[test]
    fn test_malformed_value_passes_through_as_literal() {
        let (bytes, _) = encode(
            r#"<Scene><Box size="big big big"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert!(bytes.windows(11).any(|w| w == b"big big big"));
    }

    #[test]
    fn test_text_nodes_are_sniffed() {
        let (_, stats) = encode(
            r#"<Scene><meta>hello world</meta></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.sniff_occurrences(SniffClass::String), 1);
    }

    #[test]
    fn test_whitespace_text_is_ignored() {
        let (_, stats) = encode(
            "<Scene>\n  <Box/>\n</Scene>",
            EncoderConfig::default(),
        );
        assert_eq!(stats.sniff_occurrences(SniffClass::String), 0);
    }

    #[test]
    fn test_strings_method_keeps_default_attributes() {
        // Default removal does not apply to the strings rendition: it must
        // stay a complete textual form of the document.
        let config = EncoderConfig {
            method: EncodingMethod::Strings,
            remove_defaults: true,
            ..EncoderConfig::default()
        };
        let (bytes, stats) = encode(r#"<Scene><Box size="2 2 2"/></Scene>"#, config);
        assert_eq!(stats.elided_defaults(), 0);
        assert!(bytes.windows(5).any(|w| w == b"2 2 2"));
        // No typed parse either, so the field counters stay untouched.
        assert_eq!(stats.field_occurrences(FieldType::SFVec3f), 0);
    }

    #[test]
    fn test_strings_method_is_idempotent_on_documents() {
        let xml = r#"<Scene><Transform translation="1 2 3"><Box size="4 5 6"/></Transform></Scene>"#;
        let config = EncoderConfig {
            method: EncodingMethod::Strings,
            ..EncoderConfig::default()
        };
        let (first, _) = encode(xml, config);
        let (second, _) = encode(xml, config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let mut enc = DocumentEncoder::default();
        assert!(enc.encode_str("<Scene><Box></Scene>", Vec::new()).is_err());
    }

    #[test]
    fn test_coord_index_is_delta_packed() {
        let (bytes, stats) = encode(
            r#"<Scene><IndexedFaceSet coordIndex="0 1 2 -1 3 4 5 -1"/></Scene>"#,
            EncoderConfig::default(),
        );
        assert_eq!(stats.field_occurrences(FieldType::MFInt32), 1);
        assert!(stats.field_encoded_bytes(FieldType::MFInt32) > 0);
        // The textual form must not survive into the stream.
        assert!(!bytes.windows(7).any(|w| w == b"0 1 2 -"));
    }

    #[test]
    fn test_empty_array_attribute_is_dropped() {
        let (bytes, _) = encode(
            r#"<Scene><Coordinate point=""/></Scene>"#,
            EncoderConfig::default(),
        );
        assert!(!bytes.windows(5).any(|w| w == b"point"));
    }
}
