// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Node-type schema registry: per-node field tables with declared types,
//! access categories and default values.
//!
//! Schemas are built once, validated eagerly and read-only afterwards.
//! A malformed registration (two conflicting declarations for the same
//! field name) fails at build time, never during resolution.

use std::collections::HashMap;

use crate::field::{parse_field, AccessType, FieldType, FieldValue};

/// Error raised while building a schema set.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The same field name was declared twice with different type or access.
    ConflictingField {
        node: String,
        field: String,
    },
    /// A literal default did not parse under the declared field type.
    BadDefault {
        node: String,
        field: String,
        reason: String,
    },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::ConflictingField { node, field } => {
                write!(f, "conflicting declarations for {}.{}", node, field)
            }
            SchemaError::BadDefault { node, field, reason } => {
                write!(f, "bad default for {}.{}: {}", node, field, reason)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// A single field declaration within a node schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: FieldType,
    pub access: AccessType,
    pub default: FieldValue,
}

/// Immutable per-node-type field table.
#[derive(Debug, Clone, Default)]
pub struct NodeSchema {
    fields: Vec<FieldDecl>,
    by_name: HashMap<String, usize>,
}

impl NodeSchema {
    /// Index of a field by name, or `None` if the node has no such field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Declaration at a previously resolved index.
    pub fn field_decl(&self, index: usize) -> Option<&FieldDecl> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Registry of node schemas keyed by element name.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    nodes: HashMap<String, NodeSchema>,
}

impl SchemaSet {
    /// Empty registry; every attribute will take the sniffer path.
    pub fn empty() -> SchemaSet {
        SchemaSet::default()
    }

    /// Start building a registry.
    pub fn builder() -> SchemaSetBuilder {
        SchemaSetBuilder::default()
    }

    /// Schema for an element name, if the node type is known.
    pub fn node(&self, element: &str) -> Option<&NodeSchema> {
        self.nodes.get(element)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Starter registry covering the common X3D nodes.
    ///
    /// Defaults follow the X3D 3.1 Immersive profile. Callers with custom
    /// node sets build their own registry or extend this one via
    /// [`SchemaSetBuilder::merge`].
    pub fn builtin() -> SchemaSet {
        builtin_schemas().expect("builtin schema table is valid")
    }
}

/// Builder with fail-fast validation.
#[derive(Debug, Default)]
pub struct SchemaSetBuilder {
    nodes: HashMap<String, NodeSchema>,
    error: Option<SchemaError>,
}

impl SchemaSetBuilder {
    /// Declare one field of one node type, with the default given in its
    /// textual form and parsed under the declared type.
    pub fn field(
        mut self,
        node: &str,
        name: &str,
        field_type: FieldType,
        access: AccessType,
        default: Option<&str>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }

        let default = match default {
            Some(raw) => match parse_field(field_type, raw) {
                Ok(v) => v,
                Err(e) => {
                    self.error = Some(SchemaError::BadDefault {
                        node: node.to_string(),
                        field: name.to_string(),
                        reason: e.to_string(),
                    });
                    return self;
                }
            },
            None => FieldValue::zero(field_type),
        };
        self.field_value(node, name, field_type, access, default)
    }

    /// Fold another schema set into this builder.
    pub fn merge(mut self, other: &SchemaSet) -> Self {
        for (node, schema) in &other.nodes {
            for decl in &schema.fields {
                let d = decl.clone();
                self = self.field_value(node, &d.name, d.field_type, d.access, d.default);
            }
        }
        self
    }

    fn field_value(
        mut self,
        node: &str,
        name: &str,
        field_type: FieldType,
        access: AccessType,
        default: FieldValue,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        let schema = self.nodes.entry(node.to_string()).or_default();
        if let Some(idx) = schema.by_name.get(name) {
            let existing = &schema.fields[*idx];
            if existing.field_type != field_type || existing.access != access {
                self.error = Some(SchemaError::ConflictingField {
                    node: node.to_string(),
                    field: name.to_string(),
                });
            }
            // Identical re-registration is harmless.
            return self;
        }
        schema.by_name.insert(name.to_string(), schema.fields.len());
        schema.fields.push(FieldDecl {
            name: name.to_string(),
            field_type,
            access,
            default,
        });
        self
    }

    pub fn build(self) -> Result<SchemaSet, SchemaError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(SchemaSet { nodes: self.nodes }),
        }
    }
}

fn builtin_schemas() -> Result<SchemaSet, SchemaError> {
    use AccessType::{ExposedField, Field};
    use FieldType::*;

    SchemaSet::builder()
        // Geometry
        .field("Box", "size", SFVec3f, Field, Some("2 2 2"))
        .field("Box", "solid", SFBool, Field, Some("true"))
        .field("Sphere", "radius", SFFloat, Field, Some("1"))
        .field("Sphere", "solid", SFBool, Field, Some("true"))
        .field("Cylinder", "radius", SFFloat, Field, Some("1"))
        .field("Cylinder", "height", SFFloat, Field, Some("2"))
        .field("Cylinder", "bottom", SFBool, Field, Some("true"))
        .field("Cylinder", "side", SFBool, Field, Some("true"))
        .field("Cylinder", "top", SFBool, Field, Some("true"))
        .field("Cone", "bottomRadius", SFFloat, Field, Some("1"))
        .field("Cone", "height", SFFloat, Field, Some("2"))
        .field("Cone", "bottom", SFBool, Field, Some("true"))
        .field("Cone", "side", SFBool, Field, Some("true"))
        // Grouping
        .field("Transform", "translation", SFVec3f, ExposedField, Some("0 0 0"))
        .field("Transform", "rotation", SFRotation, ExposedField, Some("0 0 1 0"))
        .field("Transform", "scale", SFVec3f, ExposedField, Some("1 1 1"))
        .field(
            "Transform",
            "scaleOrientation",
            SFRotation,
            ExposedField,
            Some("0 0 1 0"),
        )
        .field("Transform", "center", SFVec3f, ExposedField, Some("0 0 0"))
        .field("Transform", "bboxCenter", SFVec3f, Field, Some("0 0 0"))
        .field("Transform", "bboxSize", SFVec3f, Field, Some("-1 -1 -1"))
        .field("Group", "bboxCenter", SFVec3f, Field, Some("0 0 0"))
        .field("Group", "bboxSize", SFVec3f, Field, Some("-1 -1 -1"))
        // Appearance
        .field("Material", "ambientIntensity", SFFloat, ExposedField, Some("0.2"))
        .field("Material", "diffuseColor", SFColor, ExposedField, Some("0.8 0.8 0.8"))
        .field("Material", "emissiveColor", SFColor, ExposedField, Some("0 0 0"))
        .field("Material", "shininess", SFFloat, ExposedField, Some("0.2"))
        .field("Material", "specularColor", SFColor, ExposedField, Some("0 0 0"))
        .field("Material", "transparency", SFFloat, ExposedField, Some("0"))
        .field("ImageTexture", "url", MFString, ExposedField, None)
        .field("ImageTexture", "repeatS", SFBool, Field, Some("true"))
        .field("ImageTexture", "repeatT", SFBool, Field, Some("true"))
        // Coordinates and indexed geometry
        .field("Coordinate", "point", MFVec3f, ExposedField, None)
        .field("Normal", "vector", MFVec3f, ExposedField, None)
        .field("Color", "color", MFColor, ExposedField, None)
        .field("ColorRGBA", "color", MFColorRGBA, ExposedField, None)
        .field("TextureCoordinate", "point", MFVec2f, ExposedField, None)
        .field("IndexedFaceSet", "coordIndex", MFInt32, Field, None)
        .field("IndexedFaceSet", "colorIndex", MFInt32, Field, None)
        .field("IndexedFaceSet", "normalIndex", MFInt32, Field, None)
        .field("IndexedFaceSet", "texCoordIndex", MFInt32, Field, None)
        .field("IndexedFaceSet", "ccw", SFBool, Field, Some("true"))
        .field("IndexedFaceSet", "convex", SFBool, Field, Some("true"))
        .field("IndexedFaceSet", "solid", SFBool, Field, Some("true"))
        .field("IndexedFaceSet", "colorPerVertex", SFBool, Field, Some("true"))
        .field("IndexedFaceSet", "normalPerVertex", SFBool, Field, Some("true"))
        .field("IndexedFaceSet", "creaseAngle", SFFloat, Field, Some("0"))
        .field("IndexedLineSet", "coordIndex", MFInt32, Field, None)
        .field("IndexedLineSet", "colorIndex", MFInt32, Field, None)
        .field("IndexedLineSet", "colorPerVertex", SFBool, Field, Some("true"))
        // Sensors and interpolators: event fields exercise the skip path.
        .field("TimeSensor", "cycleInterval", SFTime, ExposedField, Some("1"))
        .field("TimeSensor", "enabled", SFBool, ExposedField, Some("true"))
        .field("TimeSensor", "loop", SFBool, ExposedField, Some("false"))
        .field("TimeSensor", "startTime", SFTime, ExposedField, Some("0"))
        .field("TimeSensor", "stopTime", SFTime, ExposedField, Some("0"))
        .field(
            "TimeSensor",
            "fraction_changed",
            SFFloat,
            AccessType::EventOut,
            None,
        )
        .field("TimeSensor", "isActive", SFBool, AccessType::EventOut, None)
        .field(
            "PositionInterpolator",
            "key",
            MFFloat,
            ExposedField,
            None,
        )
        .field(
            "PositionInterpolator",
            "keyValue",
            MFVec3f,
            ExposedField,
            None,
        )
        .field(
            "PositionInterpolator",
            "set_fraction",
            SFFloat,
            AccessType::EventIn,
            None,
        )
        .field(
            "OrientationInterpolator",
            "key",
            MFFloat,
            ExposedField,
            None,
        )
        .field(
            "OrientationInterpolator",
            "keyValue",
            MFRotation,
            ExposedField,
            None,
        )
        // Viewing
        .field("Viewpoint", "position", SFVec3f, ExposedField, Some("0 0 10"))
        .field("Viewpoint", "orientation", SFRotation, ExposedField, Some("0 0 1 0"))
        .field("Viewpoint", "fieldOfView", SFFloat, ExposedField, Some("0.785398"))
        .field("Viewpoint", "jump", SFBool, ExposedField, Some("true"))
        .field("Viewpoint", "description", SFString, Field, None)
        .field("NavigationInfo", "headlight", SFBool, ExposedField, Some("true"))
        .field("NavigationInfo", "speed", SFFloat, ExposedField, Some("1"))
        .field("NavigationInfo", "type", MFString, ExposedField, None)
        .field("NavigationInfo", "avatarSize", MFFloat, ExposedField, None)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_builds() {
        let set = SchemaSet::builtin();
        assert!(set.node_count() > 10);
        let tx = set.node("Transform").unwrap();
        let idx = tx.field_index("translation").unwrap();
        let decl = tx.field_decl(idx).unwrap();
        assert_eq!(decl.field_type, FieldType::SFVec3f);
        assert_eq!(decl.default, FieldValue::FloatArray(vec![0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_conflicting_declaration_fails_fast() {
        let result = SchemaSet::builder()
            .field("Box", "size", FieldType::SFVec3f, AccessType::Field, Some("2 2 2"))
            .field("Box", "size", FieldType::MFFloat, AccessType::Field, None)
            .build();
        assert_eq!(
            result.unwrap_err(),
            SchemaError::ConflictingField {
                node: "Box".into(),
                field: "size".into()
            }
        );
    }

    #[test]
    fn test_identical_redeclaration_is_harmless() {
        let set = SchemaSet::builder()
            .field("Box", "size", FieldType::SFVec3f, AccessType::Field, Some("2 2 2"))
            .field("Box", "size", FieldType::SFVec3f, AccessType::Field, Some("2 2 2"))
            .build()
            .unwrap();
        assert_eq!(set.node("Box").unwrap().len(), 1);
    }

    #[test]
    fn test_bad_default_fails_fast() {
        let result = SchemaSet::builder()
            .field("Box", "size", FieldType::SFVec3f, AccessType::Field, Some("2 2"))
            .build();
        assert!(matches!(result, Err(SchemaError::BadDefault { .. })));
    }

    #[test]
    fn test_missing_default_is_zero_value() {
        let set = SchemaSet::builder()
            .field("Coordinate", "point", FieldType::MFVec3f, AccessType::ExposedField, None)
            .build()
            .unwrap();
        let node = set.node("Coordinate").unwrap();
        let decl = node.field_decl(node.field_index("point").unwrap()).unwrap();
        assert_eq!(decl.default, FieldValue::FloatArray(Vec::new()));
    }
}
