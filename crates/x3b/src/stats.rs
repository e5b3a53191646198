// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! Per-run encoding statistics.
//!
//! Purely additive counters, owned by one encoder instance per run (no
//! globals). `report` is read out once at end of document.

use std::fmt::Write as _;

use crate::field::{FieldType, FIELD_TYPE_COUNT};
use crate::sniff::{SniffClass, SNIFF_CLASS_COUNT};

/// Counters for one serializer run.
#[derive(Debug, Clone)]
pub struct EncoderStats {
    field_count: [u64; FIELD_TYPE_COUNT],
    field_orig_bytes: [u64; FIELD_TYPE_COUNT],
    field_new_bytes: [u64; FIELD_TYPE_COUNT],
    sniff_count: [u64; SNIFF_CLASS_COUNT],
    sniff_orig_bytes: [u64; SNIFF_CLASS_COUNT],
    elided: u64,
}

impl Default for EncoderStats {
    fn default() -> Self {
        EncoderStats::new()
    }
}

impl EncoderStats {
    pub fn new() -> EncoderStats {
        EncoderStats {
            field_count: [0; FIELD_TYPE_COUNT],
            field_orig_bytes: [0; FIELD_TYPE_COUNT],
            field_new_bytes: [0; FIELD_TYPE_COUNT],
            sniff_count: [0; SNIFF_CLASS_COUNT],
            sniff_orig_bytes: [0; SNIFF_CLASS_COUNT],
            elided: 0,
        }
    }

    /// One schema-resolved field seen, with its original textual length.
    pub fn record_field(&mut self, ft: FieldType, orig_len: usize) {
        self.field_count[ft.index()] += 1;
        self.field_orig_bytes[ft.index()] += orig_len as u64;
    }

    /// Encoded output size for a schema-resolved field.
    pub fn record_encoded(&mut self, ft: FieldType, encoded_len: usize) {
        self.field_new_bytes[ft.index()] += encoded_len as u64;
    }

    /// One default-valued field dropped from the output.
    pub fn record_elision(&mut self) {
        self.elided += 1;
    }

    /// One schema-less value classified by the sniffer.
    pub fn record_sniff(&mut self, class: SniffClass, orig_len: usize) {
        self.sniff_count[class.index()] += 1;
        self.sniff_orig_bytes[class.index()] += orig_len as u64;
    }

    pub fn elided_defaults(&self) -> u64 {
        self.elided
    }

    pub fn field_occurrences(&self, ft: FieldType) -> u64 {
        self.field_count[ft.index()]
    }

    pub fn field_original_bytes(&self, ft: FieldType) -> u64 {
        self.field_orig_bytes[ft.index()]
    }

    pub fn field_encoded_bytes(&self, ft: FieldType) -> u64 {
        self.field_new_bytes[ft.index()]
    }

    pub fn sniff_occurrences(&self, class: SniffClass) -> u64 {
        self.sniff_count[class.index()]
    }

    /// End-of-document summary.
    ///
    /// Types never seen are skipped. Average lengths guard the zero-count
    /// case instead of dividing through.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} default fields removed", self.elided);

        if self.field_count.iter().any(|c| *c > 0) {
            let _ = writeln!(out, "Field type stats");
            for ft in FieldType::ALL {
                let count = self.field_count[ft.index()];
                if count == 0 {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "{:<12}: {:<8} orig: {:<8} new: {}",
                    ft.label(),
                    count,
                    self.field_orig_bytes[ft.index()],
                    self.field_new_bytes[ft.index()],
                );
            }
        }

        if self.sniff_count.iter().any(|c| *c > 0) {
            let _ = writeln!(out, "Datatype stats (no schema)");
            for class in [
                SniffClass::String,
                SniffClass::Byte,
                SniffClass::Short,
                SniffClass::Int,
                SniffClass::Float,
                SniffClass::Boolean,
            ] {
                let count = self.sniff_count[class.index()];
                let avg = if count == 0 {
                    0
                } else {
                    self.sniff_orig_bytes[class.index()] / count
                };
                let _ = writeln!(
                    out,
                    "{:<8}: {:<8} avg len: {}",
                    class.label(),
                    count,
                    avg
                );
            }
        }

        out
    }
}
