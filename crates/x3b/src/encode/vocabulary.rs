// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Serializer vocabulary: the algorithm table registered at stream open.
//!
//! A decoder is handed the same table (it is emitted in the document
//! header) to map algorithm ids back to decoders. Built-in ids are implied
//! by the format; only extension algorithms carry URIs.

use super::AlgorithmId;

/// URI naming the external vocabulary itself, carried in the header.
pub const EXTERNAL_VOCABULARY_URI: &str = "urn:external-vocabulary";

/// Ordered table of extension algorithms for one serializer run.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    entries: Vec<(AlgorithmId, &'static str)>,
}

impl Vocabulary {
    /// The standard table: every extension algorithm this crate can emit.
    pub fn standard() -> Vocabulary {
        let ids = [
            AlgorithmId::Byte,
            AlgorithmId::DeltaZlibInt,
            AlgorithmId::QuantizedZlibFloat,
        ];
        Vocabulary {
            entries: ids
                .iter()
                .map(|id| (*id, id.uri().expect("extension ids carry URIs")))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[(AlgorithmId, &'static str)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URI for an id, if it is registered here.
    pub fn uri_for(&self, id: AlgorithmId) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(e, _)| *e == id)
            .map(|(_, uri)| *uri)
    }
}
