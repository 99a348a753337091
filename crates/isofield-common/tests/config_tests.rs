//! Tests for loading and validating visualizer configuration files.

use isofield_common::{FieldError, NodeCrossingPolicy, SaddlePolicy, VisualizerConfig};
use std::io::Write;

const FULL_CONFIG: &str = r##"{
    "version": "1.1",
    "domain": { "a": -1.0, "b": 1.0, "c": 0.0, "d": 2.0 },
    "palette": ["#000080", "blue", "cyan", [255, 255, 0], {"r": 255, "g": 0, "b": 0, "a": 255}],
    "grid": { "columns": 21, "rows": 11 },
    "grid_lines": { "color": "gray" },
    "isolines": {
        "levels": [0.25, 0.5],
        "line_color": "#FFFFFF",
        "saddle": "average_tie_break",
        "node_crossings": "merge"
    }
}"##;

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_full_config() {
    let config = VisualizerConfig::from_json(FULL_CONFIG).unwrap();
    config.validate().unwrap();

    assert_eq!(config.version, "1.1");
    assert_eq!(config.domain.a(), -1.0);
    assert_eq!(config.domain.height(), 2.0);

    let palette = config.palette().unwrap();
    assert_eq!(palette.len(), 5);
    assert_eq!(palette.get(0), Some([0, 0, 128, 255]));
    assert_eq!(palette.get(3), Some([255, 255, 0, 255]));
    assert_eq!(palette.last(), [255, 0, 0, 255]);

    let grid = config.grid.unwrap();
    assert_eq!(grid.columns(), 21);
    assert_eq!(grid.rows(), 11);

    assert_eq!(config.grid_lines.color.to_rgba().unwrap(), [128, 128, 128, 255]);
    assert_eq!(config.isolines.levels, Some(vec![0.25, 0.5]));
    assert_eq!(config.isolines.saddle, SaddlePolicy::AverageTieBreak);
    assert_eq!(config.isolines.node_crossings, NodeCrossingPolicy::Merge);
    // Marker color falls back to red
    assert_eq!(config.isolines.marker_color.to_rgba().unwrap(), [255, 0, 0, 255]);
}

#[test]
fn test_parse_rejects_small_grid() {
    let json = r##"{"domain":{"a":0,"b":1,"c":0,"d":1},"palette":["red"],"grid":{"columns":1,"rows":4}}"##;
    assert!(matches!(
        VisualizerConfig::from_json(json),
        Err(FieldError::Config(_))
    ));
}

#[test]
fn test_parse_rejects_missing_domain() {
    let json = r##"{"palette":["red"]}"##;
    assert!(VisualizerConfig::from_json(json).is_err());
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_validate_rejects_empty_palette() {
    let json = r##"{"domain":{"a":0,"b":1,"c":0,"d":1},"palette":[]}"##;
    let config = VisualizerConfig::from_json(json).unwrap();
    assert!(matches!(config.validate(), Err(FieldError::EmptyPalette)));
}

#[test]
fn test_validate_rejects_bad_color() {
    let json = r##"{"domain":{"a":0,"b":1,"c":0,"d":1},"palette":["red","#12345"]}"##;
    let config = VisualizerConfig::from_json(json).unwrap();
    assert!(matches!(config.validate(), Err(FieldError::InvalidColor(_))));
}

#[test]
fn test_validate_rejects_non_positive_interval() {
    let json = r##"{"domain":{"a":0,"b":1,"c":0,"d":1},"palette":["red"],"isolines":{"interval":0}}"##;
    let config = VisualizerConfig::from_json(json).unwrap();
    assert!(matches!(config.validate(), Err(FieldError::Config(_))));
}

// ============================================================================
// File loading tests
// ============================================================================

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let config = VisualizerConfig::from_file(file.path()).unwrap();
    assert_eq!(config.palette().unwrap().len(), 5);
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = VisualizerConfig::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(FieldError::Io(_))));
}
