// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Field type resolution: element + attribute name -> declared field type.
//!
//! A miss is not an error. It signals that the attribute has no schema and
//! must take the heuristic sniffer path instead.

use crate::schema::{FieldDecl, SchemaSet};

/// Outcome of a schema lookup for one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// Schema entry found; carries the declaration with type, access
    /// category and default.
    Known(&'a FieldDecl),
    /// The field is an eventIn/eventOut. These are DTD artifacts with no
    /// parse-time data and are dropped from the output entirely.
    Event,
    /// Unknown node type or unknown field: fall back to type sniffing.
    Unknown,
}

/// Pure lookup; no side effects, no allocation.
pub fn resolve<'a>(schemas: &'a SchemaSet, element: &str, attribute: &str) -> Resolution<'a> {
    let Some(node) = schemas.node(element) else {
        return Resolution::Unknown;
    };
    let Some(idx) = node.field_index(attribute) else {
        return Resolution::Unknown;
    };
    let decl = node
        .field_decl(idx)
        .expect("index came from the same schema");
    if decl.access.is_event() {
        Resolution::Event
    } else {
        Resolution::Known(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{AccessType, FieldType};

    #[test]
    fn test_known_field_resolves() {
        let schemas = SchemaSet::builtin();
        match resolve(&schemas, "Box", "size") {
            Resolution::Known(decl) => {
                assert_eq!(decl.field_type, FieldType::SFVec3f);
                assert_eq!(decl.access, AccessType::Field);
            }
            other => panic!("expected Known, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_node_and_field_fall_back() {
        let schemas = SchemaSet::builtin();
        assert_eq!(resolve(&schemas, "NoSuchNode", "size"), Resolution::Unknown);
        assert_eq!(resolve(&schemas, "Box", "noSuchField"), Resolution::Unknown);
    }

    #[test]
    fn test_events_are_skipped_not_sniffed() {
        let schemas = SchemaSet::builtin();
        assert_eq!(
            resolve(&schemas, "TimeSensor", "fraction_changed"),
            Resolution::Event
        );
        assert_eq!(
            resolve(&schemas, "PositionInterpolator", "set_fraction"),
            Resolution::Event
        );
    }
}
