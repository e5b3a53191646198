// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Heuristic type sniffing for attributes with no schema.
//!
//! A raw value is classified by attempting to parse every token under each
//! candidate type at once. Five candidacy flags start true and are cleared
//! by parse failures; once all are gone the value is a string and the scan
//! stops early. Resolution picks the most specific surviving candidate:
//! byte before short before int before float before boolean.
//!
//! The classic serializer's boolean candidacy test (`!eq("true") ||
//! !eq("false")`) can never clear the flag; the intended `&&` is used here,
//! clearing candidacy when a token matches neither literal.

use crate::field::FieldValue;

/// Classification outcome, indexing the sniffer statistics counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SniffClass {
    String = 0,
    Byte,
    Short,
    Int,
    Float,
    Boolean,
}

/// Number of sniffer classes, sized for stats tables.
pub const SNIFF_CLASS_COUNT: usize = 6;

impl SniffClass {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            SniffClass::String => "String",
            SniffClass::Byte => "Byte",
            SniffClass::Short => "Short",
            SniffClass::Int => "Int",
            SniffClass::Float => "Float",
            SniffClass::Boolean => "Boolean",
        }
    }
}

/// A value is only treated as a list if whitespace separates tokens within
/// the first 50 characters; long single tokens stay scalars without
/// scanning the whole string twice.
const LIST_PROBE_LEN: usize = 50;

/// Scalar tokens shorter than this are never accepted as floats: "10"
/// parses as a float but is far more likely a small integer. Ad hoc, but
/// it mirrors the classic serializer.
const SCALAR_FLOAT_MIN_LEN: usize = 4;

#[derive(Debug)]
struct Candidacy {
    float: bool,
    int: bool,
    byte: bool,
    short: bool,
    boolean: bool,
}

impl Candidacy {
    fn new() -> Candidacy {
        Candidacy {
            float: true,
            int: true,
            byte: true,
            short: true,
            boolean: true,
        }
    }

    fn all_cleared(&self) -> bool {
        !self.float && !self.int && !self.byte && !self.short && !self.boolean
    }

    /// Update every flag against one token. Parse failures clear flags;
    /// they are consumed here, never surfaced.
    fn scan(&mut self, tok: &str) {
        if self.float && tok.parse::<f32>().is_err() {
            self.float = false;
        }
        if self.int {
            match tok.parse::<i32>() {
                Ok(v) => {
                    if v < i32::from(i8::MIN) || v > i32::from(i8::MAX) {
                        self.byte = false;
                    }
                    if v < i32::from(i16::MIN) || v > i32::from(i16::MAX) {
                        self.short = false;
                    }
                }
                Err(_) => {
                    self.int = false;
                    self.byte = false;
                    self.short = false;
                }
            }
        }
        if self.boolean
            && !(tok.eq_ignore_ascii_case("true") || tok.eq_ignore_ascii_case("false"))
        {
            self.boolean = false;
        }
    }
}

/// Classify a raw attribute or character-data string.
pub fn classify(raw: &str) -> (FieldValue, SniffClass) {
    let data = raw.trim();
    if data.is_empty() {
        return (FieldValue::String(raw.to_string()), SniffClass::String);
    }

    let probe_end = if data.len() <= LIST_PROBE_LEN {
        data.len()
    } else {
        let mut end = LIST_PROBE_LEN;
        while !data.is_char_boundary(end) {
            end -= 1;
        }
        end
    };
    let is_list = data[..probe_end].split_whitespace().count() > 1;

    let mut flags = Candidacy::new();

    if is_list {
        for tok in data.split_whitespace() {
            flags.scan(tok);
            if flags.all_cleared() {
                // Short-circuit: no numeric or boolean reading survives.
                return (FieldValue::String(raw.to_string()), SniffClass::String);
            }
        }
    } else {
        flags.scan(data);
        if flags.float && data.len() < SCALAR_FLOAT_MIN_LEN {
            flags.float = false;
        }
        if flags.all_cleared() {
            return (FieldValue::String(raw.to_string()), SniffClass::String);
        }
    }

    // Most specific first.
    if flags.int && flags.byte {
        (FieldValue::ByteArray(build(data, 0i8)), SniffClass::Byte)
    } else if flags.int && flags.short {
        (FieldValue::ShortArray(build(data, 0i16)), SniffClass::Short)
    } else if flags.int {
        (FieldValue::IntArray(build(data, 0i32)), SniffClass::Int)
    } else if flags.float {
        (FieldValue::FloatArray(build(data, 0f32)), SniffClass::Float)
    } else if flags.boolean {
        let vals = data
            .split_whitespace()
            .map(|tok| tok.eq_ignore_ascii_case("true"))
            .collect();
        (FieldValue::BoolArray(vals), SniffClass::Boolean)
    } else {
        (FieldValue::String(raw.to_string()), SniffClass::String)
    }
}

/// Final array-building pass. Classification already validated every token,
/// so a failure here is a sniffer bug: log it and leave the zero default in
/// that slot rather than aborting the document.
fn build<T: std::str::FromStr + Copy>(data: &str, zero: T) -> Vec<T> {
    data.split_whitespace()
        .map(|tok| {
            tok.parse::<T>().unwrap_or_else(|_| {
                log::warn!("[SNIFF] token {:?} failed the final parse pass", tok);
                zero
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_byte_list() {
        let (value, class) = classify("1 2 3");
        assert_eq!(class, SniffClass::Byte);
        assert_eq!(value, FieldValue::ByteArray(vec![1, 2, 3]));
    }

    #[test]
    fn test_precedence_short_and_int() {
        let (value, class) = classify("300 -300");
        assert_eq!(class, SniffClass::Short);
        assert_eq!(value, FieldValue::ShortArray(vec![300, -300]));

        let (value, class) = classify("70000 1");
        assert_eq!(class, SniffClass::Int);
        assert_eq!(value, FieldValue::IntArray(vec![70_000, 1]));
    }

    #[test]
    fn test_float_list() {
        let (value, class) = classify("1.5 2.5");
        assert_eq!(class, SniffClass::Float);
        assert_eq!(value, FieldValue::FloatArray(vec![1.5, 2.5]));
    }

    #[test]
    fn test_boolean_list() {
        let (value, class) = classify("true false");
        assert_eq!(class, SniffClass::Boolean);
        assert_eq!(value, FieldValue::BoolArray(vec![true, false]));
    }

    #[test]
    fn test_boolean_candidacy_fix() {
        // With the classic `||` test, "true maybe" kept boolean candidacy
        // and misclassified. The corrected test clears it.
        let (_, class) = classify("true maybe");
        assert_eq!(class, SniffClass::String);
    }

    #[test]
    fn test_mixed_tokens_are_string() {
        let (value, class) = classify("abc 1");
        assert_eq!(class, SniffClass::String);
        assert_eq!(value, FieldValue::String("abc 1".into()));
    }

    #[test]
    fn test_scalar_float_length_guard() {
        // "1.5" parses as float but is only 3 characters.
        let (_, class) = classify("1.5");
        assert_ne!(class, SniffClass::Float);

        let (value, class) = classify("1.50");
        assert_eq!(class, SniffClass::Float);
        assert_eq!(value, FieldValue::FloatArray(vec![1.5]));
    }

    #[test]
    fn test_scalar_integer() {
        let (value, class) = classify("10");
        assert_eq!(class, SniffClass::Byte);
        assert_eq!(value, FieldValue::ByteArray(vec![10]));
    }

    #[test]
    fn test_list_guard_does_not_apply_to_lists() {
        // Short float tokens are fine inside lists.
        let (value, class) = classify("1.5 2.5 3.5");
        assert_eq!(class, SniffClass::Float);
        assert_eq!(value.len(), 3);
    }

    #[test]
    fn test_long_single_token_is_scalar() {
        // No whitespace in the first 50 chars: scalar path.
        let tok = "a".repeat(80);
        let (value, class) = classify(&tok);
        assert_eq!(class, SniffClass::String);
        assert_eq!(value, FieldValue::String(tok));
    }

    #[test]
    fn test_empty_input_is_string() {
        let (_, class) = classify("   ");
        assert_eq!(class, SniffClass::String);
    }

    #[test]
    fn test_short_circuit_on_large_garbage() {
        let raw = "x ".repeat(10_000);
        let (_, class) = classify(&raw);
        assert_eq!(class, SniffClass::String);
    }
}
