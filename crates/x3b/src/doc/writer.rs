// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Binary document stream writer.
//!
//! Write-only: document decoding is a separate concern with its own
//! consumer. The stream is a flat tag sequence; strings and payloads are
//! varint-length prefixed.
//!
//! # Stream layout
//!
//! ```text
//! header  = "X3B1" | version(u8) | method(u8) |
//!           vocab_uri(str) | vocab_count(varint) |
//!           { algo_id(u8) | algo_uri(str) }*
//! record  = 0x01 element_start(str)
//!         | 0x02 literal_attr(name str, value str)
//!         | 0x03 binary_attr(name str, algo_id u8, payload bytes)
//!         | 0x04 element_end
//!         | 0x05 text(payload as 0x02/0x03 body without name)
//!         | 0x00 document_end
//! str     = len(varint) | utf8 bytes
//! ```

use std::io::Write;

use crate::encode::varint::write_varint;
use crate::encode::{EncodedAttribute, EncodingMethod, Payload, Vocabulary, EXTERNAL_VOCABULARY_URI};

/// Stream magic, version 1.
pub const MAGIC: &[u8; 4] = b"X3B1";

const FORMAT_VERSION: u8 = 1;

const TAG_DOC_END: u8 = 0x00;
const TAG_ELEMENT_START: u8 = 0x01;
const TAG_LITERAL_ATTR: u8 = 0x02;
const TAG_BINARY_ATTR: u8 = 0x03;
const TAG_ELEMENT_END: u8 = 0x04;
const TAG_TEXT: u8 = 0x05;

const fn method_code(method: EncodingMethod) -> u8 {
    match method {
        EncodingMethod::FastestParsing => 0,
        EncodingMethod::SmallestNonlossy => 1,
        EncodingMethod::SmallestLossy => 2,
        EncodingMethod::Strings => 3,
    }
}

/// Writer over any byte sink.
pub struct BinaryWriter<W: Write> {
    out: W,
    scratch: Vec<u8>,
}

impl<W: Write> BinaryWriter<W> {
    /// Open a stream: writes the header and the algorithm vocabulary so a
    /// decoder can map extension ids back to codecs.
    pub fn open(
        mut out: W,
        vocabulary: &Vocabulary,
        method: EncodingMethod,
    ) -> std::io::Result<BinaryWriter<W>> {
        out.write_all(MAGIC)?;
        out.write_all(&[FORMAT_VERSION, method_code(method)])?;

        let mut header = Vec::new();
        push_str(&mut header, EXTERNAL_VOCABULARY_URI);
        write_varint(vocabulary.len() as u64, &mut header);
        for (id, uri) in vocabulary.entries() {
            header.push(id.as_u8());
            push_str(&mut header, uri);
        }
        out.write_all(&header)?;

        Ok(BinaryWriter {
            out,
            scratch: Vec::with_capacity(256),
        })
    }

    pub fn start_element(&mut self, name: &str) -> std::io::Result<()> {
        self.scratch.clear();
        self.scratch.push(TAG_ELEMENT_START);
        push_str(&mut self.scratch, name);
        self.out.write_all(&self.scratch)
    }

    pub fn attribute(&mut self, attr: &EncodedAttribute) -> std::io::Result<()> {
        self.scratch.clear();
        match &attr.payload {
            Payload::Literal(value) => {
                self.scratch.push(TAG_LITERAL_ATTR);
                push_str(&mut self.scratch, &attr.name);
                push_str(&mut self.scratch, value);
            }
            Payload::Algorithm(id, bytes) => {
                self.scratch.push(TAG_BINARY_ATTR);
                push_str(&mut self.scratch, &attr.name);
                self.scratch.push(id.as_u8());
                write_varint(bytes.len() as u64, &mut self.scratch);
                self.scratch.extend_from_slice(bytes);
            }
        }
        self.out.write_all(&self.scratch)
    }

    /// Character data, encoded like an attribute payload without a name.
    pub fn text(&mut self, payload: &Payload) -> std::io::Result<()> {
        self.scratch.clear();
        self.scratch.push(TAG_TEXT);
        match payload {
            Payload::Literal(value) => {
                self.scratch.push(TAG_LITERAL_ATTR);
                push_str(&mut self.scratch, value);
            }
            Payload::Algorithm(id, bytes) => {
                self.scratch.push(TAG_BINARY_ATTR);
                self.scratch.push(id.as_u8());
                write_varint(bytes.len() as u64, &mut self.scratch);
                self.scratch.extend_from_slice(bytes);
            }
        }
        self.out.write_all(&self.scratch)
    }

    pub fn end_element(&mut self) -> std::io::Result<()> {
        self.out.write_all(&[TAG_ELEMENT_END])
    }

    /// Close the stream and flush the sink.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.write_all(&[TAG_DOC_END])?;
        self.out.flush()?;
        Ok(self.out)
    }
}

fn push_str(buf: &mut Vec<u8>, s: &str) {
    write_varint(s.len() as u64, buf);
    buf.extend_from_slice(s.as_bytes());
}
