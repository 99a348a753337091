//! Resolved drawing styles for grid lines and isolines.

use image::Rgba;
use isofield_common::style::{GridLineConfig, IsolineConfig};
use isofield_common::FieldResult;

use crate::contour::{generate_contour_levels, ContourOptions};

/// Appearance of the grid overlay. Lines are 1 px wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLineStyle {
    pub color: Rgba<u8>,
}

impl Default for GridLineStyle {
    fn default() -> Self {
        Self {
            color: Rgba([0, 0, 0, 255]),
        }
    }
}

impl GridLineStyle {
    pub fn from_config(config: &GridLineConfig) -> FieldResult<Self> {
        Ok(Self {
            color: Rgba(config.color.to_rgba()?),
        })
    }
}

/// Appearance and classification options of isolines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolineStyle {
    /// Color of the 1 px contour segments
    pub line_color: Rgba<u8>,
    /// Color of the small circles marking each crossing
    pub marker_color: Rgba<u8>,
    /// Radius of crossing markers in pixels
    pub marker_radius: i32,
    pub options: ContourOptions,
}

impl Default for IsolineStyle {
    fn default() -> Self {
        Self {
            line_color: Rgba([0, 0, 0, 255]),
            marker_color: Rgba([255, 0, 0, 255]),
            marker_radius: 1,
            options: ContourOptions::default(),
        }
    }
}

impl IsolineStyle {
    pub fn from_config(config: &IsolineConfig) -> FieldResult<Self> {
        Ok(Self {
            line_color: Rgba(config.line_color.to_rgba()?),
            marker_color: Rgba(config.marker_color.to_rgba()?),
            options: ContourOptions {
                saddle: config.saddle,
                node_crossings: config.node_crossings,
            },
            ..Self::default()
        })
    }
}

/// Levels requested by an isoline configuration for a field spanning
/// `[data_min, data_max]`.
///
/// Explicit levels win; otherwise levels are generated from the interval.
/// Without either, no levels are produced.
pub fn configured_levels(config: &IsolineConfig, data_min: f64, data_max: f64) -> Vec<f64> {
    if let Some(ref levels) = config.levels {
        return levels.clone();
    }

    match config.interval {
        Some(interval) => generate_contour_levels(data_min, data_max, interval),
        None => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isofield_common::{Color, NodeCrossingPolicy, SaddlePolicy};

    #[test]
    fn test_isoline_style_from_config() {
        let config = IsolineConfig {
            line_color: Color::Hex("#00FF00".to_string()),
            saddle: SaddlePolicy::AverageTieBreak,
            node_crossings: NodeCrossingPolicy::Merge,
            ..IsolineConfig::default()
        };

        let style = IsolineStyle::from_config(&config).unwrap();
        assert_eq!(style.line_color, Rgba([0, 255, 0, 255]));
        assert_eq!(style.marker_color, Rgba([255, 0, 0, 255]));
        assert_eq!(style.options.saddle, SaddlePolicy::AverageTieBreak);
        assert_eq!(style.options.node_crossings, NodeCrossingPolicy::Merge);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let config = GridLineConfig {
            color: Color::Hex("#12".to_string()),
        };
        assert!(GridLineStyle::from_config(&config).is_err());
    }

    #[test]
    fn test_configured_levels_precedence() {
        let mut config = IsolineConfig {
            levels: Some(vec![1.5]),
            interval: Some(1.0),
            ..IsolineConfig::default()
        };
        assert_eq!(configured_levels(&config, 0.0, 3.0), vec![1.5]);

        config.levels = None;
        assert_eq!(configured_levels(&config, 0.0, 3.0), vec![0.0, 1.0, 2.0, 3.0]);

        config.interval = None;
        assert!(configured_levels(&config, 0.0, 3.0).is_empty());
    }
}
