// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! X3D field type system: the closed SF/MF type set, access categories and
//! the typed value union produced by field parsing and type sniffing.
//!
//! Dispatch over field types is a closed enum resolved at schema-build time;
//! there is no runtime reflection anywhere in the encode path.

pub mod parse;

pub use parse::{parse_field, ParseError};

/// X3D field type tags, one per SF/MF type in the X3D 3.1 field type set.
///
/// The discriminant doubles as the index into the per-type statistics
/// tables, so the enum must stay dense starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
pub enum FieldType {
    SFInt32 = 0,
    MFInt32,
    SFFloat,
    MFFloat,
    SFDouble,
    MFDouble,
    SFLong,
    MFLong,
    SFBool,
    MFBool,
    SFVec2f,
    MFVec2f,
    SFVec2d,
    MFVec2d,
    SFVec3f,
    MFVec3f,
    SFVec3d,
    MFVec3d,
    SFVec4f,
    MFVec4f,
    SFVec4d,
    MFVec4d,
    SFImage,
    MFImage,
    SFTime,
    MFTime,
    SFNode,
    MFNode,
    SFString,
    MFString,
    SFRotation,
    MFRotation,
    SFColor,
    MFColor,
    SFColorRGBA,
    MFColorRGBA,
    SFMatrix3f,
    MFMatrix3f,
    SFMatrix3d,
    MFMatrix3d,
    SFMatrix4f,
    MFMatrix4f,
    SFMatrix4d,
    MFMatrix4d,
}

/// Number of field types, sized for stats tables.
pub const FIELD_TYPE_COUNT: usize = 44;

impl FieldType {
    /// Every field type in discriminant order.
    pub const ALL: [FieldType; FIELD_TYPE_COUNT] = [
        FieldType::SFInt32,
        FieldType::MFInt32,
        FieldType::SFFloat,
        FieldType::MFFloat,
        FieldType::SFDouble,
        FieldType::MFDouble,
        FieldType::SFLong,
        FieldType::MFLong,
        FieldType::SFBool,
        FieldType::MFBool,
        FieldType::SFVec2f,
        FieldType::MFVec2f,
        FieldType::SFVec2d,
        FieldType::MFVec2d,
        FieldType::SFVec3f,
        FieldType::MFVec3f,
        FieldType::SFVec3d,
        FieldType::MFVec3d,
        FieldType::SFVec4f,
        FieldType::MFVec4f,
        FieldType::SFVec4d,
        FieldType::MFVec4d,
        FieldType::SFImage,
        FieldType::MFImage,
        FieldType::SFTime,
        FieldType::MFTime,
        FieldType::SFNode,
        FieldType::MFNode,
        FieldType::SFString,
        FieldType::MFString,
        FieldType::SFRotation,
        FieldType::MFRotation,
        FieldType::SFColor,
        FieldType::MFColor,
        FieldType::SFColorRGBA,
        FieldType::MFColorRGBA,
        FieldType::SFMatrix3f,
        FieldType::MFMatrix3f,
        FieldType::SFMatrix3d,
        FieldType::MFMatrix3d,
        FieldType::SFMatrix4f,
        FieldType::MFMatrix4f,
        FieldType::SFMatrix4d,
        FieldType::MFMatrix4d,
    ];

    /// Stats table index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display label, as it appears in the statistics report.
    pub const fn label(self) -> &'static str {
        match self {
            FieldType::SFInt32 => "SFInt32",
            FieldType::MFInt32 => "MFInt32",
            FieldType::SFFloat => "SFFloat",
            FieldType::MFFloat => "MFFloat",
            FieldType::SFDouble => "SFDouble",
            FieldType::MFDouble => "MFDouble",
            FieldType::SFLong => "SFLong",
            FieldType::MFLong => "MFLong",
            FieldType::SFBool => "SFBool",
            FieldType::MFBool => "MFBool",
            FieldType::SFVec2f => "SFVec2f",
            FieldType::MFVec2f => "MFVec2f",
            FieldType::SFVec2d => "SFVec2d",
            FieldType::MFVec2d => "MFVec2d",
            FieldType::SFVec3f => "SFVec3f",
            FieldType::MFVec3f => "MFVec3f",
            FieldType::SFVec3d => "SFVec3d",
            FieldType::MFVec3d => "MFVec3d",
            FieldType::SFVec4f => "SFVec4f",
            FieldType::MFVec4f => "MFVec4f",
            FieldType::SFVec4d => "SFVec4d",
            FieldType::MFVec4d => "MFVec4d",
            FieldType::SFImage => "SFImage",
            FieldType::MFImage => "MFImage",
            FieldType::SFTime => "SFTime",
            FieldType::MFTime => "MFTime",
            FieldType::SFNode => "SFNode",
            FieldType::MFNode => "MFNode",
            FieldType::SFString => "SFString",
            FieldType::MFString => "MFString",
            FieldType::SFRotation => "SFRotation",
            FieldType::MFRotation => "MFRotation",
            FieldType::SFColor => "SFColor",
            FieldType::MFColor => "MFColor",
            FieldType::SFColorRGBA => "SFColorRGBA",
            FieldType::MFColorRGBA => "MFColorRGBA",
            FieldType::SFMatrix3f => "SFMatrix3f",
            FieldType::MFMatrix3f => "MFMatrix3f",
            FieldType::SFMatrix3d => "SFMatrix3d",
            FieldType::MFMatrix3d => "MFMatrix3d",
            FieldType::SFMatrix4f => "SFMatrix4f",
            FieldType::MFMatrix4f => "MFMatrix4f",
            FieldType::SFMatrix4d => "SFMatrix4d",
            FieldType::MFMatrix4d => "MFMatrix4d",
        }
    }

    /// Returns true for field types whose value parses to an f32 array
    /// (vectors, rotations, colors, f32 matrices and MFFloat).
    pub const fn is_float_array(self) -> bool {
        matches!(
            self,
            FieldType::MFFloat
                | FieldType::SFVec2f
                | FieldType::MFVec2f
                | FieldType::SFVec3f
                | FieldType::MFVec3f
                | FieldType::SFVec4f
                | FieldType::MFVec4f
                | FieldType::SFRotation
                | FieldType::MFRotation
                | FieldType::SFColor
                | FieldType::MFColor
                | FieldType::SFColorRGBA
                | FieldType::MFColorRGBA
                | FieldType::SFMatrix3f
                | FieldType::MFMatrix3f
                | FieldType::SFMatrix4f
                | FieldType::MFMatrix4f
        )
    }

    /// Returns true for field types whose value parses to an f64 array.
    pub const fn is_double_array(self) -> bool {
        matches!(
            self,
            FieldType::MFDouble
                | FieldType::SFVec2d
                | FieldType::MFVec2d
                | FieldType::SFVec3d
                | FieldType::MFVec3d
                | FieldType::SFVec4d
                | FieldType::MFVec4d
                | FieldType::MFTime
                | FieldType::SFMatrix3d
                | FieldType::MFMatrix3d
                | FieldType::SFMatrix4d
                | FieldType::MFMatrix4d
        )
    }

    /// Returns true for field types whose value parses to an i32 array.
    pub const fn is_int_array(self) -> bool {
        matches!(
            self,
            FieldType::MFInt32 | FieldType::SFImage | FieldType::MFImage
        )
    }

    /// Component count for fixed-arity SF types, `None` for variable-length
    /// and scalar types.
    pub const fn fixed_arity(self) -> Option<usize> {
        match self {
            FieldType::SFVec2f | FieldType::SFVec2d => Some(2),
            FieldType::SFVec3f | FieldType::SFVec3d | FieldType::SFColor => Some(3),
            FieldType::SFVec4f
            | FieldType::SFVec4d
            | FieldType::SFRotation
            | FieldType::SFColorRGBA => Some(4),
            FieldType::SFMatrix3f | FieldType::SFMatrix3d => Some(9),
            FieldType::SFMatrix4f | FieldType::SFMatrix4d => Some(16),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Field access category per the X3D/VRML object model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// Plain initialize-only field.
    Field,
    /// Field with paired set_/…_changed events.
    ExposedField,
    /// Input-only event; carries no parse-time data.
    EventIn,
    /// Output-only event; carries no parse-time data.
    EventOut,
}

impl AccessType {
    /// Events never carry a default or a serializable value.
    pub const fn is_event(self) -> bool {
        matches!(self, AccessType::EventIn | AccessType::EventOut)
    }
}

/// A strongly typed field value.
///
/// Produced by [`parse_field`] (schema path) or by the type sniffer
/// (schema-less path), consumed by the elision filter and the array
/// encoder. Never retained beyond one attribute's encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BoolArray(Vec<bool>),
    ByteArray(Vec<i8>),
    ShortArray(Vec<i16>),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
}

impl FieldValue {
    /// The schema-less "zero value" used when a node type registers a field
    /// without an explicit default.
    pub fn zero(ft: FieldType) -> FieldValue {
        match ft {
            FieldType::SFInt32 => FieldValue::Int(0),
            FieldType::SFLong => FieldValue::Long(0),
            FieldType::SFBool => FieldValue::Bool(false),
            FieldType::SFFloat => FieldValue::Float(0.0),
            FieldType::SFDouble | FieldType::SFTime => FieldValue::Double(0.0),
            FieldType::SFString | FieldType::MFString | FieldType::MFLong => {
                FieldValue::String(String::new())
            }
            FieldType::SFNode | FieldType::MFNode => FieldValue::String(String::new()),
            FieldType::MFBool => FieldValue::BoolArray(Vec::new()),
            ft if ft.is_int_array() => FieldValue::IntArray(Vec::new()),
            ft if ft.is_float_array() => match ft.fixed_arity() {
                Some(n) => FieldValue::FloatArray(vec![0.0; n]),
                None => FieldValue::FloatArray(Vec::new()),
            },
            ft if ft.is_double_array() => match ft.fixed_arity() {
                Some(n) => FieldValue::DoubleArray(vec![0.0; n]),
                None => FieldValue::DoubleArray(Vec::new()),
            },
            _ => FieldValue::String(String::new()),
        }
    }

    /// Element count for array values, 1 for scalars.
    pub fn len(&self) -> usize {
        match self {
            FieldValue::BoolArray(v) => v.len(),
            FieldValue::ByteArray(v) => v.len(),
            FieldValue::ShortArray(v) => v.len(),
            FieldValue::IntArray(v) => v.len(),
            FieldValue::FloatArray(v) => v.len(),
            FieldValue::DoubleArray(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
