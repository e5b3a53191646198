// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

//! End-to-end pipeline tests: XML text in, binary stream out.

use x3b::{
    DocumentEncoder, EncoderConfig, EncoderStats, EncodingMethod, FieldType, SniffClass,
};

const SCENE: &str = r#"<X3D version="3.1">
  <Scene>
    <Transform translation="0 1.5 0" rotation="0 1 0 0.785">
      <Shape>
        <Appearance>
          <Material diffuseColor="0.8 0.2 0.2" transparency="0"/>
        </Appearance>
        <IndexedFaceSet coordIndex="0 1 2 -1 2 3 0 -1" solid="true">
          <Coordinate point="0 0 0 1 0 0 1 1 0 0 1 0"/>
        </IndexedFaceSet>
      </Shape>
    </Transform>
    <Box size="2 2 2"/>
  </Scene>
</X3D>
"#;

fn run(xml: &str, config: EncoderConfig) -> (Vec<u8>, EncoderStats) {
    let mut encoder = DocumentEncoder::with_builtin_schemas(config);
    let bytes = encoder.encode_str(xml, Vec::new()).unwrap();
    let stats = encoder.take_stats();
    (bytes, stats)
}

#[test]
fn test_stream_starts_with_magic() {
    let (bytes, _) = run(SCENE, EncoderConfig::default());
    assert_eq!(&bytes[..4], b"X3B1");
}

#[test]
fn test_defaults_are_removed() {
    let (bytes, stats) = run(SCENE, EncoderConfig::default());
    // Box size "2 2 2", Material transparency "0" and IndexedFaceSet
    // solid "true" all match their schema defaults.
    assert_eq!(stats.elided_defaults(), 3);
    assert!(!bytes.windows(4).any(|w| w == b"size"));
}

#[test]
fn test_save_defaults_disables_elision() {
    let config = EncoderConfig {
        remove_defaults: false,
        ..EncoderConfig::default()
    };
    let (bytes, stats) = run(SCENE, config);
    assert_eq!(stats.elided_defaults(), 0);
    assert!(bytes.windows(4).any(|w| w == b"size"));
}

#[test]
fn test_coord_index_never_survives_as_text() {
    let (bytes, stats) = run(SCENE, EncoderConfig::default());
    assert_eq!(stats.field_occurrences(FieldType::MFInt32), 1);
    assert!(!bytes.windows(9).any(|w| w == b"0 1 2 -1 "));
}

#[test]
fn test_stats_track_known_and_sniffed_fields() {
    let (_, stats) = run(SCENE, EncoderConfig::default());
    // translation, rotation, diffuseColor, transparency, coordIndex,
    // solid, point, size all resolve against the built-in schemas.
    assert!(stats.field_occurrences(FieldType::SFVec3f) >= 2);
    assert_eq!(stats.field_occurrences(FieldType::SFRotation), 1);
    // The X3D "version" attribute has no schema entry and is sniffed.
    assert!(stats.sniff_occurrences(SniffClass::Float) + stats.sniff_occurrences(SniffClass::String) >= 1);
}

#[test]
fn test_encoded_bytes_never_exceed_original_for_known_floats() {
    // The size guard admits binary only when it is not larger.
    let (_, stats) = run(SCENE, EncoderConfig::default());
    for ft in [FieldType::MFVec3f, FieldType::SFVec3f, FieldType::SFColor] {
        if stats.field_occurrences(ft) > 0 {
            assert!(
                stats.field_encoded_bytes(ft) <= stats.field_original_bytes(ft),
                "{} grew past its textual form",
                ft
            );
        }
    }
}

#[test]
fn test_lossy_run_is_smaller_than_nonlossy_on_dense_floats() {
    let points: String = (0..600)
        .map(|i| format!("{:.4} ", (i as f32) * 0.0137))
        .collect();
    let xml = format!(
        r#"<Scene><Coordinate point="{}"/></Scene>"#,
        points.trim_end()
    );

    let (nonlossy, _) = run(&xml, EncoderConfig::default());
    let lossy_config = EncoderConfig {
        method: EncodingMethod::SmallestLossy,
        ..EncoderConfig::default()
    };
    let (lossy, _) = run(&xml, lossy_config);
    assert!(lossy.len() < nonlossy.len());
}

#[test]
fn test_strings_method_keeps_all_values_textual() {
    let config = EncoderConfig {
        method: EncodingMethod::Strings,
        remove_defaults: false,
        ..EncoderConfig::default()
    };
    let (bytes, _) = run(SCENE, config);
    assert!(bytes.windows(9).any(|w| w == b"0 1 2 -1 "));
    assert!(bytes.windows(5).any(|w| w == b"2 2 2"));
}

#[test]
fn test_repeat_runs_are_byte_identical() {
    let (first, _) = run(SCENE, EncoderConfig::default());
    let (second, _) = run(SCENE, EncoderConfig::default());
    assert_eq!(first, second);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scene.x3d");
    let output = dir.path().join("scene.x3b");
    std::fs::write(&input, SCENE).unwrap();

    let mut encoder = DocumentEncoder::with_builtin_schemas(EncoderConfig::default());
    encoder.encode_file(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let (in_memory, _) = run(SCENE, EncoderConfig::default());
    assert_eq!(bytes, in_memory);
}

#[test]
fn test_report_mentions_removed_defaults() {
    let mut encoder = DocumentEncoder::with_builtin_schemas(EncoderConfig::default());
    encoder.encode_str(SCENE, Vec::new()).unwrap();
    let report = encoder.stats().report();
    assert!(report.contains("default fields removed"));
    assert!(report.contains("MFInt32"));
}

#[test]
fn test_random_float_scenes_encode_cleanly() {
    // Stress the float path with arbitrary magnitudes.
    for _ in 0..20 {
        let n = 3 * (1 + fastrand::usize(..200));
        let points: String = (0..n)
            .map(|_| format!("{} ", fastrand::f32() * 2000.0 - 1000.0))
            .collect();
        let xml = format!(r#"<Scene><Coordinate point="{}"/></Scene>"#, points.trim_end());
        let (bytes, stats) = run(&xml, EncoderConfig::default());
        assert_eq!(&bytes[..4], b"X3B1");
        assert_eq!(stats.field_occurrences(FieldType::MFVec3f), 1);
    }
}
