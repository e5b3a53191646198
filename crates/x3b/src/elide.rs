// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Default-value elision.
//!
//! A field whose parsed value equals its schema default is dropped from the
//! output; the decoder reconstructs it from the same schema. Float
//! comparisons use a small tolerance to absorb textual round-trip noise
//! ("2.0" vs "2"), which makes this a deliberately lossy filter: a value
//! within `FLOAT_EPS` of the default is treated as the default.

use crate::field::FieldValue;

/// Largest float difference still treated as equality.
pub const FLOAT_EPS: f32 = 0.000_000_9;

const DOUBLE_EPS: f64 = FLOAT_EPS as f64;

/// True if `parsed` should be elided against `default`.
///
/// Arrays elide only when lengths match and every component is within
/// tolerance. Mismatched value shapes (schema default of a different
/// variant) never elide.
pub fn should_elide(parsed: &FieldValue, default: &FieldValue) -> bool {
    match (parsed, default) {
        (FieldValue::String(a), FieldValue::String(b)) => a == b,
        (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
        (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
        (FieldValue::Long(a), FieldValue::Long(b)) => a == b,
        (FieldValue::Float(a), FieldValue::Float(b)) => (a - b).abs() <= FLOAT_EPS,
        (FieldValue::Double(a), FieldValue::Double(b)) => (a - b).abs() <= DOUBLE_EPS,
        (FieldValue::BoolArray(a), FieldValue::BoolArray(b)) => a == b,
        (FieldValue::ByteArray(a), FieldValue::ByteArray(b)) => a == b,
        (FieldValue::ShortArray(a), FieldValue::ShortArray(b)) => a == b,
        (FieldValue::IntArray(a), FieldValue::IntArray(b)) => a == b,
        (FieldValue::FloatArray(a), FieldValue::FloatArray(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| (x - y).abs() <= FLOAT_EPS)
        }
        (FieldValue::DoubleArray(a), FieldValue::DoubleArray(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(x, y)| (x - y).abs() <= DOUBLE_EPS)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_float_within_eps() {
        let def = FieldValue::Float(0.2);
        assert!(should_elide(&FieldValue::Float(0.2), &def));
        assert!(should_elide(&FieldValue::Float(0.2 + 0.000_000_5), &def));
        assert!(!should_elide(&FieldValue::Float(0.200_1), &def));
    }

    #[test]
    fn test_scalar_exact_types() {
        assert!(should_elide(&FieldValue::Int(5), &FieldValue::Int(5)));
        assert!(!should_elide(&FieldValue::Int(5), &FieldValue::Int(6)));
        assert!(should_elide(
            &FieldValue::Bool(true),
            &FieldValue::Bool(true)
        ));
        assert!(should_elide(
            &FieldValue::String("a".into()),
            &FieldValue::String("a".into())
        ));
    }

    #[test]
    fn test_array_elides_componentwise() {
        let def = FieldValue::FloatArray(vec![2.0, 2.0, 2.0]);
        assert!(should_elide(
            &FieldValue::FloatArray(vec![2.0, 2.0, 2.0]),
            &def
        ));
        assert!(!should_elide(
            &FieldValue::FloatArray(vec![2.0, 2.0, 2.5]),
            &def
        ));
    }

    #[test]
    fn test_array_length_mismatch_never_elides() {
        let def = FieldValue::FloatArray(vec![2.0, 2.0, 2.0]);
        assert!(!should_elide(&FieldValue::FloatArray(vec![2.0, 2.0]), &def));
        assert!(!should_elide(&FieldValue::FloatArray(Vec::new()), &def));
    }

    #[test]
    fn test_shape_mismatch_never_elides() {
        assert!(!should_elide(
            &FieldValue::Float(0.0),
            &FieldValue::Int(0)
        ));
        assert!(!should_elide(
            &FieldValue::FloatArray(vec![0.0]),
            &FieldValue::DoubleArray(vec![0.0])
        ));
    }
}
