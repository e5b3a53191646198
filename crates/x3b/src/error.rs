// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Crate-level error type.
//!
//! The per-layer errors stay small and specific; this enum is the seam the
//! document driver and the public API surface speak through.

use crate::encode::CodecError;
use crate::field::parse::ParseError;
use crate::schema::SchemaError;

/// Any failure the document encoder can surface.
#[derive(Debug)]
pub enum Error {
    /// A field value failed to parse under its declared type.
    Parse(ParseError),
    /// A binary codec rejected its input.
    Codec(CodecError),
    /// Schema registration failed.
    Schema(SchemaError),
    /// The input document is not well-formed XML.
    Xml(roxmltree::Error),
    /// Reading the input or writing the output stream failed.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "field parse error: {}", e),
            Error::Codec(e) => write!(f, "codec error: {}", e),
            Error::Schema(e) => write!(f, "schema error: {}", e),
            Error::Xml(e) => write!(f, "malformed XML: {}", e),
            Error::Io(e) => write!(f, "i/o error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Codec(e) => Some(e),
            Error::Schema(e) => Some(e),
            Error::Xml(e) => Some(e),
            Error::Io(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Error {
        Error::Parse(e)
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Error {
        Error::Codec(e)
    }
}

impl From<SchemaError> for Error {
    fn from(e: SchemaError) -> Error {
        Error::Schema(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Error {
        Error::Xml(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
