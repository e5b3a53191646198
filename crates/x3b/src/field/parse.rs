// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Textual field value parsers.
//!
//! Every helper returns an explicit `Result` instead of swallowing parse
//! failures; callers decide whether a failure is fatal (schema path falls
//! back to a literal string payload) or merely clears a candidacy flag
//! (type sniffer).

use super::{FieldType, FieldValue};

/// Error raised when a raw attribute value does not parse under its
/// declared field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Token did not parse as a float.
    BadFloat { token: String },
    /// Token did not parse as an integer.
    BadInt { token: String },
    /// Token was neither "true" nor "false".
    BadBool { token: String },
    /// Fixed-arity value had the wrong component count.
    WrongArity { expected: usize, actual: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BadFloat { token } => write!(f, "bad float token: {:?}", token),
            ParseError::BadInt { token } => write!(f, "bad integer token: {:?}", token),
            ParseError::BadBool { token } => write!(f, "bad boolean token: {:?}", token),
            ParseError::WrongArity { expected, actual } => {
                write!(f, "wrong component count: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn parse_f32(tok: &str) -> Result<f32, ParseError> {
    tok.parse::<f32>().map_err(|_| ParseError::BadFloat {
        token: tok.to_string(),
    })
}

fn parse_f64(tok: &str) -> Result<f64, ParseError> {
    tok.parse::<f64>().map_err(|_| ParseError::BadFloat {
        token: tok.to_string(),
    })
}

fn parse_i32(tok: &str) -> Result<i32, ParseError> {
    tok.parse::<i32>().map_err(|_| ParseError::BadInt {
        token: tok.to_string(),
    })
}

fn parse_i64(tok: &str) -> Result<i64, ParseError> {
    tok.parse::<i64>().map_err(|_| ParseError::BadInt {
        token: tok.to_string(),
    })
}

/// X3D XML booleans are lowercase, but the classic encoding allowed TRUE /
/// FALSE, so the comparison is case-insensitive.
fn parse_bool(tok: &str) -> Result<bool, ParseError> {
    if tok.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if tok.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::BadBool {
            token: tok.to_string(),
        })
    }
}

fn parse_f32_array(raw: &str, arity: Option<usize>) -> Result<Vec<f32>, ParseError> {
    let vals = raw
        .split_whitespace()
        .map(parse_f32)
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(n) = arity {
        if vals.len() != n {
            return Err(ParseError::WrongArity {
                expected: n,
                actual: vals.len(),
            });
        }
    }
    Ok(vals)
}

fn parse_f64_array(raw: &str, arity: Option<usize>) -> Result<Vec<f64>, ParseError> {
    let vals = raw
        .split_whitespace()
        .map(parse_f64)
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(n) = arity {
        if vals.len() != n {
            return Err(ParseError::WrongArity {
                expected: n,
                actual: vals.len(),
            });
        }
    }
    Ok(vals)
}

fn parse_i32_array(raw: &str) -> Result<Vec<i32>, ParseError> {
    raw.split_whitespace().map(parse_i32).collect()
}

fn parse_bool_array(raw: &str) -> Result<Vec<bool>, ParseError> {
    raw.split_whitespace().map(parse_bool).collect()
}

/// Parse a raw attribute value under its declared field type.
///
/// Node references and the list-of-quoted-strings types keep their literal
/// form: they are never binary packed, so there is nothing to parse.
pub fn parse_field(ft: FieldType, raw: &str) -> Result<FieldValue, ParseError> {
    let trimmed = raw.trim();
    match ft {
        FieldType::SFInt32 => parse_i32(trimmed).map(FieldValue::Int),
        FieldType::SFLong => parse_i64(trimmed).map(FieldValue::Long),
        FieldType::SFBool => parse_bool(trimmed).map(FieldValue::Bool),
        FieldType::SFFloat => parse_f32(trimmed).map(FieldValue::Float),
        FieldType::SFDouble | FieldType::SFTime => parse_f64(trimmed).map(FieldValue::Double),
        FieldType::SFString
        | FieldType::MFString
        | FieldType::MFLong
        | FieldType::SFNode
        | FieldType::MFNode => Ok(FieldValue::String(raw.to_string())),
        FieldType::MFBool => parse_bool_array(trimmed).map(FieldValue::BoolArray),
        ft if ft.is_int_array() => parse_i32_array(trimmed).map(FieldValue::IntArray),
        ft if ft.is_float_array() => {
            parse_f32_array(trimmed, ft.fixed_arity()).map(FieldValue::FloatArray)
        }
        ft if ft.is_double_array() => {
            parse_f64_array(trimmed, ft.fixed_arity()).map(FieldValue::DoubleArray)
        }
        // All variants are covered above; the guards confuse exhaustiveness.
        _ => Ok(FieldValue::String(raw.to_string())),
    }
}
